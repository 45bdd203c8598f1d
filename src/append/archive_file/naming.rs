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

//! Archive file names.
//!
//! An archive of the active file `<dir>/<stem>.<ext>` is named
//! `<dir>/<stem>__<YYYYMMDD>_<HHMMSS>.log`, stamped with the UTC time of the rotation. A rotation
//! that collides with an archive of the same second may add a `-<n>` sequence before `.log`.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

/// Separates the stem of the active file from the archive stamp.
pub(crate) const ARCHIVE_SEP: &str = "__";

/// The extension of every archive, whatever the extension of the active file.
pub(crate) const ARCHIVE_EXT: &str = ".log";

/// Length of the `YYYYMMDD_HHMMSS` stamp.
pub(crate) const STAMP_LEN: usize = 15;

/// Pads a number or numeral with leading zeros up to `width`.
///
/// Values that are already `width` characters or longer are returned unchanged, never truncated.
///
/// ```
/// use logforth_append_archive::append::archive_file::pad_zeros;
///
/// assert_eq!(pad_zeros(2, 2), "02");
/// assert_eq!(pad_zeros(22, 2), "22");
/// assert_eq!(pad_zeros(123, 2), "123");
/// ```
pub fn pad_zeros(value: impl ToString, width: usize) -> String {
    let value = value.to_string();
    format!("{value:0>width$}")
}

/// Formats `timestamp` in UTC as `YYYYMMDD_HHMMSS`.
pub(crate) fn archive_stamp(timestamp: Timestamp) -> String {
    let utc = timestamp.to_zoned(TimeZone::UTC);
    format!(
        "{}{}{}_{}{}{}",
        pad_zeros(utc.year(), 4),
        pad_zeros(utc.month(), 2),
        pad_zeros(utc.day(), 2),
        pad_zeros(utc.hour(), 2),
        pad_zeros(utc.minute(), 2),
        pad_zeros(utc.second(), 2),
    )
}

/// Returns the path the active file is renamed to when it is archived at `timestamp`.
///
/// The trailing extension of the active file is replaced by the archive stamp and `.log`, and
/// the archive lives next to the active file.
///
/// ```
/// use std::path::Path;
///
/// use logforth_append_archive::append::archive_file::archive_path;
///
/// let now = "2017-08-02T09:33:06Z".parse().unwrap();
/// let archive = archive_path(Path::new("/var/log/app.log"), now);
/// assert_eq!(archive, Path::new("/var/log/app__20170802_093306.log"));
/// ```
pub fn archive_path(active: &Path, timestamp: Timestamp) -> PathBuf {
    archive_path_with_sequence(active, timestamp, 0)
}

/// Like [`archive_path`], with a `-<sequence>` disambiguator when `sequence` is not zero.
pub fn archive_path_with_sequence(active: &Path, timestamp: Timestamp, sequence: u32) -> PathBuf {
    let mut filename = active
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    filename.push(ARCHIVE_SEP);
    filename.push(archive_stamp(timestamp));
    if sequence > 0 {
        filename.push(format!("-{sequence}"));
    }
    filename.push(ARCHIVE_EXT);
    active.with_file_name(filename)
}

/// Parses the UTC timestamp embedded in an archive file name.
///
/// The name must contain the `__` separator exactly once. Returns `None` if any date or time
/// field is not a numeral of the expected width, or if the fields do not form a valid calendar
/// date and time.
///
/// ```
/// use logforth_append_archive::append::archive_file::parse_archive_timestamp;
///
/// let ts = parse_archive_timestamp("app__20170802_093306.log").unwrap();
/// assert_eq!(ts.to_string(), "2017-08-02T09:33:06Z");
///
/// assert!(parse_archive_timestamp("app__20171302_093306.log").is_none());
/// assert!(parse_archive_timestamp("my__app__20170802_093306.log").is_none());
/// ```
pub fn parse_archive_timestamp(filename: &str) -> Option<Timestamp> {
    let mut parts = filename.split(ARCHIVE_SEP);
    let stamp = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(stamp), None) => stamp,
        _ => return None,
    };

    let year = numeral(stamp, 0, 4)?;
    let month = numeral(stamp, 4, 2)?;
    let day = numeral(stamp, 6, 2)?;
    // offset 8 is the `_` between date and time
    let hour = numeral(stamp, 9, 2)?;
    let minute = numeral(stamp, 11, 2)?;
    let second = numeral(stamp, 13, 2)?;

    let datetime = DateTime::new(
        year,
        i8::try_from(month).ok()?,
        i8::try_from(day).ok()?,
        i8::try_from(hour).ok()?,
        i8::try_from(minute).ok()?,
        i8::try_from(second).ok()?,
        0,
    )
    .ok()?;
    let zoned = datetime.to_zoned(TimeZone::UTC).ok()?;
    Some(zoned.timestamp())
}

fn numeral(stamp: &str, offset: usize, width: usize) -> Option<i16> {
    let digits = stamp.get(offset..offset + width)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
