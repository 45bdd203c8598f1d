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

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::append::archive_file::RotationPolicy;
use crate::append::archive_file::active::ActiveFile;
use crate::append::archive_file::clock::Clock;
use crate::append::archive_file::rotate::rotate;
use crate::trap::DefaultTrap;

/// A writer that archives the active log file once it grows past a size threshold.
///
/// The size check happens before each write, on the writing thread: the write that crosses the
/// threshold still lands in the current file, and the next one lands in a fresh file.
#[derive(Debug)]
pub struct ArchiveFileWriter {
    state: State,
    // `None` only after the active file could not be reopened; the next write retries.
    active: Option<ActiveFile>,
}

impl ArchiveFileWriter {
    /// Creates a new [`ArchiveFileWriterBuilder`] for the active file at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logforth_append_archive::append::archive_file::ArchiveFileWriter;
    ///
    /// let builder = ArchiveFileWriter::builder("logs/app.log");
    /// ```
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> ArchiveFileWriterBuilder {
        ArchiveFileWriterBuilder::new(path)
    }

    /// Returns the absolute path of the active file.
    pub fn path(&self) -> &Path {
        &self.state.path
    }

    fn prepare(&mut self) -> io::Result<&mut ActiveFile> {
        let active = match self.active.take() {
            Some(active) if self.state.policy.should_rotate(active.size()) => {
                let now = self.state.clock.now();
                rotate(active, &self.state.policy, now, self.state.trap.as_ref())
            }
            Some(active) => Ok(active),
            None => ActiveFile::open(&self.state.path, false),
        };

        let active = active.map_err(io::Error::other)?;
        Ok(self.active.insert(active))
    }
}

impl Write for ArchiveFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.prepare()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // check once, so that a line is never split across two files
        self.prepare()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.active.as_mut() {
            Some(active) => active.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for ArchiveFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            let err = Error::from_io_error(err).with_context("path", self.state.path.display());
            self.state.trap.trap(&err);
        }
    }
}

/// A builder for configuring [`ArchiveFileWriter`].
#[derive(Debug)]
pub struct ArchiveFileWriterBuilder {
    // required
    path: PathBuf,

    // has default
    policy: RotationPolicy,
    truncate: bool,
    clock: Clock,
    trap: Arc<dyn Trap>,
}

impl ArchiveFileWriterBuilder {
    /// Creates a new [`ArchiveFileWriterBuilder`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: RotationPolicy::default(),
            truncate: false,
            clock: Clock::DefaultClock,
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Set the rotation policy.
    #[must_use]
    pub fn policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Discard the content of an existing active file when the writer is built.
    ///
    /// Default to `false`: existing content is kept and new lines are appended.
    #[must_use]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Set the trap for errors during rotation.
    ///
    /// Default to [`DefaultTrap`].
    #[must_use]
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    pub(crate) fn shared_trap(mut self, trap: Arc<dyn Trap>) -> Self {
        self.trap = trap;
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`ArchiveFileWriter`], opening the active file.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The path has no file name.
    /// * The log directory cannot be created.
    /// * The active file cannot be opened.
    pub fn build(self) -> Result<ArchiveFileWriter, Error> {
        let Self {
            path,
            policy,
            truncate,
            clock,
            trap,
        } = self;

        if path.file_name().is_none() {
            return Err(
                Error::new(ErrorKind::PathResolution, "log file path has no file name")
                    .with_context("path", path.display()),
            );
        }
        let path = std::path::absolute(&path).map_err(|err| {
            Error::new(ErrorKind::PathResolution, "failed to resolve log file path")
                .with_context("path", path.display())
                .with_source(err)
        })?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|err| {
                Error::new(ErrorKind::Io, "failed to create log directory")
                    .with_context("dir", dir.display())
                    .with_source(err)
            })?;
        }

        let active = ActiveFile::open(&path, truncate)?;
        let state = State {
            path,
            policy,
            clock,
            trap,
        };

        Ok(ArchiveFileWriter {
            state,
            active: Some(active),
        })
    }
}

#[derive(Debug)]
struct State {
    path: PathBuf,
    policy: RotationPolicy,
    clock: Clock,
    trap: Arc<dyn Trap>,
}
