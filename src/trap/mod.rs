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

//! Traps for errors that cannot be returned to the caller.
//!
//! The archive file appender never fails a write because of a rotation problem. Instead, every
//! failure on the rotation path is handed to a [`Trap`], which by default prints it to standard
//! error.

use std::fmt;
use std::sync::Arc;

use crate::Error;

mod default;
#[cfg(test)]
pub(crate) mod testing;

pub use self::default::DefaultTrap;

/// A sink for errors the appender recovers from.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Report an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap + ?Sized> Trap for Arc<T> {
    fn trap(&self, err: &Error) {
        (**self).trap(err);
    }
}
