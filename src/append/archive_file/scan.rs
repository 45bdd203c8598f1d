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
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::append::archive_file::naming::ARCHIVE_EXT;
use crate::append::archive_file::naming::ARCHIVE_SEP;
use crate::append::archive_file::naming::STAMP_LEN;
use crate::append::archive_file::naming::parse_archive_timestamp;

/// An archive of the active file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    /// Path of the archive.
    pub path: PathBuf,
    /// The timestamp embedded in the name, `None` if it is not a valid date and time.
    pub timestamp: Option<Timestamp>,
    /// The `YYYYMMDD_HHMMSS` text of the name, kept even when `timestamp` is `None`.
    pub stamp: String,
    /// The same-second collision sequence, `0` for archives without one.
    pub sequence: u32,
}

/// Lists the archives of `active` in its directory.
///
/// Only regular files named `<stem>__<8 digits>_<6 digits>.log`, optionally with a `-<n>`
/// sequence before `.log`, are returned. The order of the records is unspecified.
///
/// # Errors
///
/// Return an error if the directory cannot be read.
pub fn list_archives(active: &Path) -> Result<Vec<ArchiveRecord>, Error> {
    let log_dir = match active.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    // if the stem is not a UTF-8 string, no archive name can match it.
    let Some(stem) = active.file_stem().and_then(|s| s.to_str()) else {
        return Ok(vec![]);
    };
    let prefix = format!("{stem}{ARCHIVE_SEP}");

    let read_dir = fs::read_dir(log_dir).map_err(|err| {
        Error::new(ErrorKind::Scan, "failed to read log dir")
            .with_context("dir", log_dir.display())
            .with_source(err)
    })?;

    let records = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;

            // the appender only creates archives as regular files; never touch a dir or symlink.
            let file_type = entry.file_type().ok()?;
            if !file_type.is_file() {
                return None;
            }

            let filename = entry.file_name();
            // if the filename is not a UTF-8 string, skip it.
            let filename = filename.to_str()?;
            let rest = filename.strip_prefix(&prefix)?;
            let sequence = match_archive_stamp(rest)?;
            let stamp = rest.get(..STAMP_LEN)?.to_string();

            Some(ArchiveRecord {
                path: entry.path(),
                timestamp: parse_archive_timestamp(filename),
                stamp,
                sequence,
            })
        })
        .collect();

    Ok(records)
}

/// Matches `<8 digits>_<6 digits>[-<digits>].log` and returns the sequence.
fn match_archive_stamp(stamp: &str) -> Option<u32> {
    let rest = stamp.strip_suffix(ARCHIVE_EXT)?;
    let rest = skip_digits(rest, 8)?;
    let rest = rest.strip_prefix('_')?;
    let rest = skip_digits(rest, 6)?;

    if rest.is_empty() {
        return Some(0);
    }
    let sequence = rest.strip_prefix('-')?;
    if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    sequence.parse().ok()
}

fn skip_digits(s: &str, n: usize) -> Option<&str> {
    let digits = s.get(..n)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(&s[n..])
}
