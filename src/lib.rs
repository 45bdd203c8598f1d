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

//! A Logforth-style appender that writes log lines to a single active file and archives it once
//! it grows past a size threshold.
//!
//! # Overview
//!
//! Archives are named after the active file and the UTC time of the rotation, e.g. `app.log` is
//! archived as `app__20170802_093306.log`. Only the newest archives are kept. Failures on the
//! rotation path never reach the caller: they are reported through a [`Trap`], and writing
//! continues to the unrotated file.
//!
//! # Examples
//!
//! Writing pre-formatted lines:
//!
//! ```
//! use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = ArchiveFileBuilder::new(dir.path().join("app.log"))
//!     .max_size(64 * 1024)
//!     .build()
//!     .unwrap();
//!
//! file.write("[2017-08-02 09:33:06:0000] [info] started\n");
//! ```
//!
//! Using the appender as the logger of the `log` crate:
//!
//! ```no_run
//! use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
//!
//! let file = ArchiveFileBuilder::for_app("my-app").build_or_disabled();
//! logforth_append_archive::bridge::setup_log_crate(file).unwrap();
//!
//! log::warn!("Hello warn!");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod layout;
pub mod trap;

pub use append::Append;
pub use layout::Layout;
pub use trap::Trap;

mod error;
pub use error::Error;
pub use error::ErrorKind;
