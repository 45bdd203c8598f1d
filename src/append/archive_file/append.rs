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

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::ErrorKind;
use crate::Layout;
use crate::Trap;
use crate::append::Append;
use crate::append::archive_file::ArchiveFileWriter;
use crate::append::archive_file::ArchiveFileWriterBuilder;
use crate::append::archive_file::CollisionStrategy;
use crate::append::archive_file::DefaultPathResolver;
use crate::append::archive_file::PathResolver;
use crate::append::archive_file::RotationPolicy;
use crate::layout::TextLayout;
use crate::trap::DefaultTrap;

#[cfg(windows)]
const LINE_ENDING: &[u8] = b"\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &[u8] = b"\n";

#[derive(Debug)]
enum Target {
    Path(PathBuf),
    App(String),
}

/// A builder to configure and create an [`ArchiveFile`] appender.
#[derive(Debug)]
pub struct ArchiveFileBuilder {
    target: Target,
    resolver: Box<dyn PathResolver>,
    policy: RotationPolicy,
    enabled: bool,
    truncate: bool,
    layout: Box<dyn Layout>,
    trap: Arc<dyn Trap>,
}

impl ArchiveFileBuilder {
    /// Create a new builder writing to the active file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Target::Path(path.into()))
    }

    /// Create a new builder writing to the default log file of `app_name`.
    ///
    /// The path is resolved when the appender is built, with [`DefaultPathResolver`] unless
    /// [`path_resolver`](ArchiveFileBuilder::path_resolver) is set.
    pub fn for_app(app_name: impl Into<String>) -> Self {
        Self::with_target(Target::App(app_name.into()))
    }

    fn with_target(target: Target) -> Self {
        Self {
            target,
            resolver: Box::new(DefaultPathResolver::default()),
            policy: RotationPolicy::default(),
            enabled: true,
            truncate: false,
            layout: Box::new(TextLayout::default()),
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Build the [`ArchiveFile`] appender, opening the active file.
    ///
    /// An appender built with `enabled(false)` opens nothing and ignores every write.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * No usable log file path can be resolved.
    /// * The log directory cannot be created.
    /// * The active file cannot be opened.
    pub fn build(self) -> Result<ArchiveFile, Error> {
        let writer = self.open_writer()?;
        Ok(ArchiveFile::new(writer, self.layout, self.trap))
    }

    /// Build the [`ArchiveFile`] appender, falling back to a disabled appender on failure.
    ///
    /// The failure is reported once through the trap; the returned appender then ignores every
    /// write for its whole lifetime.
    pub fn build_or_disabled(self) -> ArchiveFile {
        let writer = match self.open_writer() {
            Ok(writer) => writer,
            Err(err) => {
                self.trap.trap(&err);
                None
            }
        };
        ArchiveFile::new(writer, self.layout, self.trap)
    }

    fn open_writer(&self) -> Result<Option<ArchiveFileWriter>, Error> {
        if !self.enabled {
            return Ok(None);
        }

        let path = match &self.target {
            Target::Path(path) => path.clone(),
            Target::App(app_name) => self.resolver.resolve(app_name).ok_or_else(|| {
                Error::new(ErrorKind::PathResolution, "could not set a log file")
                    .with_context("app", app_name)
            })?,
        };

        let writer = ArchiveFileWriterBuilder::new(path)
            .policy(self.policy.clone())
            .truncate(self.truncate)
            .shared_trap(self.trap.clone())
            .build()?;
        Ok(Some(writer))
    }

    /// Set the resolver for the log file of an application.
    ///
    /// Only used by builders created with [`for_app`](ArchiveFileBuilder::for_app).
    pub fn path_resolver(mut self, resolver: impl Into<Box<dyn PathResolver>>) -> Self {
        self.resolver = resolver.into();
        self
    }

    /// Set the whole rotation policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
    /// use logforth_append_archive::append::archive_file::RotationPolicy;
    ///
    /// let builder = ArchiveFileBuilder::new("logs/app.log").policy(RotationPolicy::default());
    /// ```
    pub fn policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Archive the active file once it holds at least `n` bytes. `0` disables rotation.
    ///
    /// Default to 1 MiB.
    pub fn max_size(mut self, n: u64) -> Self {
        self.policy.max_size_bytes = n;
        self
    }

    /// Set the number of archives to keep.
    ///
    /// Default to 5.
    pub fn max_archive_count(mut self, n: usize) -> Self {
        self.policy.max_archive_count = n;
        self
    }

    /// Set the behavior on a same-second archive name collision.
    ///
    /// Default to [`CollisionStrategy::Disambiguate`].
    pub fn on_collision(mut self, strategy: CollisionStrategy) -> Self {
        self.policy.on_collision = strategy;
        self
    }

    /// Turn the appender on or off. A disabled appender never touches the filesystem.
    ///
    /// Default to `true`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Discard the content of an existing active file when the appender is built.
    ///
    /// Default to `false`: lines are appended, and the file is created if missing.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`TextLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap for handling errors during logging.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }
}

/// An appender that writes log records to a size-limited file with timestamped archives.
///
/// # Examples
///
/// ```
/// use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
///
/// let dir = tempfile::tempdir().unwrap();
/// let file = ArchiveFileBuilder::new(dir.path().join("app.log"))
///     .max_size(1024 * 1024)
///     .max_archive_count(5)
///     .build()
///     .unwrap();
///
/// file.write("[2017-08-02 09:33:06:0000] [info] started\n");
/// ```
#[derive(Debug)]
pub struct ArchiveFile {
    // `None` once the appender is disabled.
    writer: Option<Mutex<ArchiveFileWriter>>,
    layout: Box<dyn Layout>,
    trap: Arc<dyn Trap>,
}

impl ArchiveFile {
    fn new(writer: Option<ArchiveFileWriter>, layout: Box<dyn Layout>, trap: Arc<dyn Trap>) -> Self {
        let writer = writer.map(Mutex::new);
        Self {
            writer,
            layout,
            trap,
        }
    }

    /// Returns whether the appender writes anything at all.
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Returns the absolute path of the active file, `None` if the appender is disabled.
    pub fn path(&self) -> Option<PathBuf> {
        self.writer().map(|writer| writer.path().to_path_buf())
    }

    /// Appends pre-formatted `text`, archiving the active file first if it is full.
    ///
    /// Failures are reported through the trap and never returned. A disabled appender ignores
    /// the call.
    pub fn write(&self, text: impl AsRef<[u8]>) {
        let Some(mut writer) = self.writer() else {
            return;
        };

        if let Err(err) = writer.write_all(text.as_ref()) {
            let err = Error::new(ErrorKind::Io, "failed to write log")
                .with_context("path", writer.path().display())
                .with_source(err);
            self.trap.trap(&err);
        }
    }

    fn writer(&self) -> Option<MutexGuard<'_, ArchiveFileWriter>> {
        let writer = self.writer.as_ref()?;
        Some(writer.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub(crate) fn trap(&self) -> &dyn Trap {
        self.trap.as_ref()
    }
}

impl Append for ArchiveFile {
    fn append(&self, record: &log::Record) -> Result<(), Error> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut bytes = self.layout.format(record)?;
        bytes.extend_from_slice(LINE_ENDING);
        self.write(bytes);
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        if let Some(mut writer) = self.writer() {
            writer.flush().map_err(Error::from_io_error)?;
        }
        Ok(())
    }
}
