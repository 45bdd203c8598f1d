// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Mutex;

use crate::Error;
use crate::ErrorKind;
use crate::trap::Trap;

/// A trap that remembers what it caught.
#[derive(Debug, Default)]
pub(crate) struct RecordingTrap {
    caught: Mutex<Vec<(ErrorKind, String)>>,
}

impl RecordingTrap {
    pub(crate) fn kinds(&self) -> Vec<ErrorKind> {
        self.caught().into_iter().map(|(kind, _)| kind).collect()
    }

    pub(crate) fn caught(&self) -> Vec<(ErrorKind, String)> {
        self.caught.lock().unwrap().clone()
    }
}

impl Trap for RecordingTrap {
    fn trap(&self, err: &Error) {
        let entry = (err.kind(), err.to_string());
        self.caught.lock().unwrap().push(entry);
    }
}
