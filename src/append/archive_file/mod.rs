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

//! Appender for writing log records to a size-limited file with timestamped archives.
//!
//! The active file is written until it holds at least
//! [`max_size_bytes`](RotationPolicy::max_size_bytes). Before the next write it is renamed to
//! `<stem>__<YYYYMMDD>_<HHMMSS>.log` (UTC), a fresh active file is opened, and archives beyond
//! [`max_archive_count`](RotationPolicy::max_archive_count) are deleted, oldest first.
//!
//! ```text
//! logs/
//! ├── app.log
//! ├── app__20170802_093306.log
//! └── app__20170801_170412.log
//! ```
//!
//! # Example
//!
//!```
//! use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = ArchiveFileBuilder::new(dir.path().join("app.log"))
//!     .max_size(1024 * 1024)
//!     .max_archive_count(5)
//!     .build()
//!     .unwrap();
//!
//! logforth_append_archive::bridge::setup_log_crate(file).unwrap();
//!
//! log::info!("This log will be written to an archiving file.");
//! ```

pub use self::append::ArchiveFile;
pub use self::append::ArchiveFileBuilder;
pub use self::naming::archive_path;
pub use self::naming::archive_path_with_sequence;
pub use self::naming::pad_zeros;
pub use self::naming::parse_archive_timestamp;
pub use self::path::DefaultPathResolver;
pub use self::path::PathResolver;
pub use self::policy::CollisionStrategy;
pub use self::policy::RotationPolicy;
pub use self::scan::ArchiveRecord;
pub use self::scan::list_archives;
pub use self::writer::ArchiveFileWriter;
pub use self::writer::ArchiveFileWriterBuilder;

mod active;
mod append;
mod clock;
mod naming;
mod path;
mod policy;
mod rotate;
mod scan;
mod writer;
