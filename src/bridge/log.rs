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

use crate::Error;
use crate::ErrorKind;
use crate::append::Append;
use crate::append::ArchiveFile;

impl log::Log for ArchiveFile {
    fn enabled(&self, _: &log::Metadata) -> bool {
        self.is_enabled()
    }

    fn log(&self, record: &log::Record) {
        if let Err(err) = Append::append(self, record) {
            self.trap().trap(&err);
        }
    }

    fn flush(&self) {
        if let Err(err) = Append::flush(self) {
            self.trap().trap(&err);
        }
    }
}

/// Install `appender` as the logger of the `log` crate.
///
/// Every record that passes [`log::max_level`] is written; the max level is set to
/// [`log::LevelFilter::Trace`].
///
/// # Errors
///
/// Return an error if a global logger has already been set.
pub fn setup_log_crate(appender: ArchiveFile) -> Result<(), Error> {
    log::set_boxed_logger(Box::new(appender)).map_err(|err| {
        Error::new(ErrorKind::Unexpected, "failed to set up the global logger").with_source(err)
    })?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
