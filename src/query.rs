//! Conversion of a station-local calendar date into the instant the
//! energy-balance endpoint is queried with.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::{Asia::Bangkok, Tz};

use crate::error::{Error, Result};

pub const STATION_TIMEZONE: Tz = Bangkok;

// Asia/Bangkok has no DST, so a fixed offset is exact
pub const STATION_OFFSET: FixedOffset = match FixedOffset::east_opt(7 * 3600) {
    Some(offset) => offset,
    None => panic!("UTC+7 is a valid offset"),
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in station-local time together with both encodings the API wants.
///
/// `queryTime` and `dateStr` are always derived from the same `DateTime`, so
/// they can't drift apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryInstant {
    at: DateTime<FixedOffset>,
}

impl QueryInstant {
    /// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(input: &str) -> Result<Self> {
        if !has_four_digit_year(input) {
            return Err(Error::Parse {
                input: input.to_string(),
            });
        }

        let naive = if input.contains(' ') {
            NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT)
        } else {
            NaiveDate::parse_from_str(input, DATE_FORMAT).map(|date| date.and_time(NaiveTime::MIN))
        }
        .map_err(|_| Error::Parse {
            input: input.to_string(),
        })?;

        // chrono reads second 60 as a leap second, which has no epoch value of its own
        if naive.nanosecond() >= 1_000_000_000 {
            return Err(Error::Parse {
                input: input.to_string(),
            });
        }

        Self::from_local(naive).ok_or_else(|| Error::Parse {
            input: input.to_string(),
        })
    }

    pub fn from_date(day: NaiveDate) -> Result<Self> {
        Self::from_local(day.and_time(NaiveTime::MIN)).ok_or_else(|| Error::Parse {
            input: day.to_string(),
        })
    }

    fn from_local(naive: NaiveDateTime) -> Option<Self> {
        STATION_OFFSET
            .from_local_datetime(&naive)
            .single()
            .map(|at| Self { at })
    }

    pub fn epoch_millis(&self) -> i64 {
        self.at.timestamp_millis()
    }

    /// Canonical `YYYY-MM-DD HH:MM:SS` in station time.
    pub fn date_str(&self) -> String {
        self.at.format(DATE_TIME_FORMAT).to_string()
    }

    pub fn file_stem(&self) -> String {
        self.at.format(DATE_FORMAT).to_string()
    }
}

pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let parse_error = || Error::Parse {
        input: input.to_string(),
    };

    if !has_four_digit_year(input) {
        return Err(parse_error());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| parse_error())
}

// %Y alone also takes signed and five-digit years
fn has_four_digit_year(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}
