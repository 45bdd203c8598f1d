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

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;

/// The file log lines are currently appended to.
///
/// Its size is tracked as the size at open plus the bytes written through this handle, so that
/// writes never need to stat the file.
#[derive(Debug)]
pub(crate) struct ActiveFile {
    path: PathBuf,
    file: File,
    size_at_open: u64,
    written: u64,
}

impl ActiveFile {
    /// Opens `path` for appending, creating it if it does not exist.
    ///
    /// If `truncate` is set, existing content is discarded instead.
    pub(crate) fn open(path: &Path, truncate: bool) -> Result<ActiveFile, Error> {
        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let file = options.open(path).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to open active log file")
                .with_context("path", path.display())
                .with_source(err)
        })?;
        let size_at_open = file.metadata().map_or(0, |metadata| metadata.len());

        Ok(ActiveFile {
            path: path.to_path_buf(),
            file,
            size_at_open,
            written: 0,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn size(&self) -> u64 {
        self.size_at_open + self.written
    }

    /// Flushes and closes the handle.
    pub(crate) fn close(mut self) -> Result<(), Error> {
        self.file.flush().map_err(|err| {
            Error::new(ErrorKind::Io, "failed to flush active log file")
                .with_context("path", self.path.display())
                .with_source(err)
        })
    }
}

impl Write for ActiveFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .write(buf)
            .inspect(|&n| self.written += n as u64)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
