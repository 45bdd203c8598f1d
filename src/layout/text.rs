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

use std::fmt::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;
use crate::append::archive_file::pad_zeros;
use crate::layout::Layout;

/// A layout that formats log record as bracketed text.
///
/// Output format:
///
/// ```text
/// [2017-08-02 11:33:06:0072] [error] Hello error!
/// [2017-08-02 11:33:06:0073] [warn] Hello warn!
/// [2017-08-02 11:33:06:0073] [info] Hello info!
/// ```
///
/// The milliseconds are padded to four digits. Timestamps are rendered in the system timezone
/// unless [`timezone`](TextLayout::timezone) is set.
///
/// # Examples
///
/// ```
/// use logforth_append_archive::layout::TextLayout;
///
/// let layout = TextLayout::default();
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    timezone: TimeZone,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            timezone: TimeZone::system(),
        }
    }
}

impl TextLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logforth_append_archive::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    fn format_at(&self, record: &log::Record, ts: Timestamp) -> Result<Vec<u8>, Error> {
        let time = ts.to_zoned(self.timezone.clone());
        let level = record.level().as_str().to_ascii_lowercase();

        let mut text = String::new();
        write!(
            &mut text,
            "[{}:{}] [{level}] {}",
            time.strftime("%Y-%m-%d %H:%M:%S"),
            pad_zeros(time.millisecond(), 4),
            record.args(),
        )
        .map_err(|err| {
            Error::new(ErrorKind::Unexpected, "failed to format log record").with_source(err)
        })?;

        Ok(text.into_bytes())
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &log::Record) -> Result<Vec<u8>, Error> {
        self.format_at(record, Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;
    use jiff::tz::TimeZone;
    use log::Level;
    use log::Record;

    use super::*;

    #[test]
    fn test_text_format() {
        let layout = TextLayout::default().timezone(TimeZone::UTC);
        let ts = Timestamp::from_str("2017-08-02T09:33:06.072Z").unwrap();

        let bytes = layout
            .format_at(
                &Record::builder()
                    .args(format_args!("disk {} full", "/var"))
                    .level(Level::Warn)
                    .build(),
                ts,
            )
            .unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[2017-08-02 09:33:06:0072] [warn] disk /var full"
        );
    }

    #[test]
    fn test_text_format_in_timezone() {
        let layout = TextLayout::default().timezone(TimeZone::fixed(jiff::tz::offset(2)));
        let ts = Timestamp::from_str("2017-08-02T23:00:00Z").unwrap();

        let bytes = layout
            .format_at(
                &Record::builder()
                    .args(format_args!("midnight"))
                    .level(Level::Error)
                    .build(),
                ts,
            )
            .unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[2017-08-03 01:00:00:0000] [error] midnight"
        );
    }
}
