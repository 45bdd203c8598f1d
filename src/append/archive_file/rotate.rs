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

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::append::archive_file::CollisionStrategy;
use crate::append::archive_file::RotationPolicy;
use crate::append::archive_file::active::ActiveFile;
use crate::append::archive_file::naming::archive_path_with_sequence;
use crate::append::archive_file::naming::archive_stamp;
use crate::append::archive_file::scan::ArchiveRecord;
use crate::append::archive_file::scan::list_archives;

/// Archives `active` and returns the file to write to next.
///
/// Rename and prune failures are sent to `trap`; the returned file is then the unrotated one.
/// An error is returned only when no file could be opened at the active path.
pub(crate) fn rotate(
    active: ActiveFile,
    policy: &RotationPolicy,
    now: Timestamp,
    trap: &dyn Trap,
) -> Result<ActiveFile, Error> {
    let path = active.path().to_path_buf();
    if let Err(err) = active.close() {
        trap.trap(&err);
    }

    match archive(&path, now, policy.on_collision) {
        Ok(_) => {
            prune(&path, policy.max_archive_count, trap);
        }
        Err(err) => trap.trap(&err),
    }

    ActiveFile::open(&path, false)
}

/// Renames `active` to its archive name for `now`, returning the archive path.
fn archive(
    active: &Path,
    now: Timestamp,
    on_collision: CollisionStrategy,
) -> Result<PathBuf, Error> {
    let archive = free_archive_path(active, now, on_collision)?;
    fs::rename(active, &archive).map_err(|err| {
        Error::new(ErrorKind::Rotation, "failed to archive log")
            .with_context("from", active.display())
            .with_context("to", archive.display())
            .with_source(err)
    })?;
    Ok(archive)
}

// `rename` replaces an existing target on Unix, so a collision must be detected beforehand.
fn free_archive_path(
    active: &Path,
    now: Timestamp,
    on_collision: CollisionStrategy,
) -> Result<PathBuf, Error> {
    let sequence = match on_collision {
        CollisionStrategy::Abandon => 0,
        CollisionStrategy::Disambiguate => next_sequence(active, now)?,
    };

    let archive = archive_path_with_sequence(active, now, sequence);
    let taken = fs::exists(&archive).map_err(|err| {
        Error::new(ErrorKind::Rotation, "failed to check archive")
            .with_context("archive", archive.display())
            .with_source(err)
    })?;
    if taken {
        return Err(Error::new(ErrorKind::Rotation, "archive already exists")
            .with_context("from", active.display())
            .with_context("to", archive.display()));
    }
    Ok(archive)
}

/// Returns the sequence after the newest archive of the same second, `0` if there is none.
///
/// Earlier sequences may have been pruned already; reusing them would make the newest archive
/// sort as the oldest one of its second.
fn next_sequence(active: &Path, now: Timestamp) -> Result<u32, Error> {
    let stamp = archive_stamp(now);
    let latest = list_archives(active)?
        .into_iter()
        .filter(|record| record.stamp == stamp)
        .map(|record| record.sequence)
        .max();

    match latest {
        None => Ok(0),
        Some(sequence) => sequence.checked_add(1).ok_or_else(|| {
            Error::new(ErrorKind::Rotation, "no free archive name within this second")
                .with_context("from", active.display())
        }),
    }
}

/// Deletes the archives of `active` beyond the newest `max_archive_count`.
///
/// A directory that cannot be listed counts as holding no archives. Returns the deleted paths.
pub(crate) fn prune(active: &Path, max_archive_count: usize, trap: &dyn Trap) -> Vec<PathBuf> {
    let records = match list_archives(active) {
        Ok(records) => records,
        Err(err) => {
            trap.trap(&err);
            return vec![];
        }
    };

    delete_archives(aged_out(records, max_archive_count), trap)
}

/// Sorts `records` newest first and returns those past the first `max_archive_count`.
///
/// Archives whose timestamp cannot be parsed sort as the oldest. The sort is stable.
pub(crate) fn aged_out(
    mut records: Vec<ArchiveRecord>,
    max_archive_count: usize,
) -> Vec<ArchiveRecord> {
    records.sort_by(compare_newest_first);
    if records.len() <= max_archive_count {
        return vec![];
    }
    records.split_off(max_archive_count)
}

fn compare_newest_first(a: &ArchiveRecord, b: &ArchiveRecord) -> Ordering {
    // `None < Some(_)`, so unknown ages end up last
    (b.timestamp, b.sequence).cmp(&(a.timestamp, a.sequence))
}

fn delete_archives(records: Vec<ArchiveRecord>, trap: &dyn Trap) -> Vec<PathBuf> {
    let mut deleted = Vec::with_capacity(records.len());
    for record in records {
        match fs::remove_file(&record.path) {
            Ok(()) => deleted.push(record.path),
            Err(err) => {
                let err = Error::new(ErrorKind::Deletion, "failed to remove old archive")
                    .with_context("path", record.path.display())
                    .with_source(err);
                trap.trap(&err);
            }
        }
    }
    deleted
}
