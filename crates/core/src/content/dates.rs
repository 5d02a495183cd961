//! Conversion of loosely typed date input into UTC instants.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Formats carrying an explicit UTC offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%z",
    "%Y%m%dT%H%M%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
];

/// Formats without an offset; the instant is taken to be UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Zone names that may follow a date-time (the RFC 2822 set), with their
/// offset from UTC in hours.
const ZONE_NAMES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("UT", 0),
    ("GMT", 0),
    ("Z", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

/// Anything that can be turned into an optional UTC timestamp.
///
/// `Ok(None)` means "no date": null, empty strings and non-positive epochs.
pub trait ToUtc {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>>;
}

impl ToUtc for Value {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        match self {
            Value::Null => Ok(None),
            Value::String(s) => s.as_str().to_utc(),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(secs), _) => secs.to_utc(),
                (None, Some(secs)) => secs.to_utc(),
                (None, None) => Err(Error::InvalidDate(n.to_string())),
            },
            Value::Tagged(tagged) => tagged.value.to_utc(),
            other => Err(Error::InvalidDate(crate::values::to_string_or_empty(other))),
        }
    }
}

impl ToUtc for &Value {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        (*self).to_utc()
    }
}

impl ToUtc for &str {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        let text = self.trim();
        if text.is_empty() {
            return Ok(None);
        }
        parse_datetime(text).map(Some).ok_or_else(|| Error::InvalidDate(text.to_string()))
    }
}

impl ToUtc for String {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        self.as_str().to_utc()
    }
}

impl ToUtc for i64 {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        if *self <= 0 {
            return Ok(None);
        }
        DateTime::from_timestamp(*self, 0)
            .map(Some)
            .ok_or_else(|| Error::InvalidDate(self.to_string()))
    }
}

impl ToUtc for f64 {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        if !self.is_finite() {
            return Err(Error::InvalidDate(self.to_string()));
        }
        if *self <= 0.0 {
            return Ok(None);
        }
        let secs = self.trunc() as i64;
        let nanos = (self.fract() * 1e9).round() as u32;
        DateTime::from_timestamp(secs, nanos.min(999_999_999))
            .map(Some)
            .ok_or_else(|| Error::InvalidDate(self.to_string()))
    }
}

impl<Tz: TimeZone> ToUtc for DateTime<Tz> {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(Some(self.with_timezone(&Utc)))
    }
}

impl ToUtc for NaiveDateTime {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(Some(self.and_utc()))
    }
}

impl ToUtc for NaiveDate {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
    }
}

impl<T: ToUtc> ToUtc for Option<T> {
    fn to_utc(&self) -> Result<Option<DateTime<Utc>>> {
        match self {
            Some(value) => value.to_utc(),
            None => Ok(None),
        }
    }
}

/// Parses a date string against the known formats; the first match wins.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    parse_naive(text).map(|dt| dt.and_utc()).or_else(|| parse_named_zone(text))
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(text, format).ok().and_then(|d| d.and_hms_opt(0, 0, 0))
            })
        })
}

/// A date-time followed by a zone name, with or without a space between.
fn parse_named_zone(text: &str) -> Option<DateTime<Utc>> {
    ZONE_NAMES.iter().find_map(|(name, hours)| {
        let split = text.len().checked_sub(name.len())?;
        if !text.is_char_boundary(split) || !text[split..].eq_ignore_ascii_case(name) {
            return None;
        }

        let head = text[..split].trim_end();
        if !head.ends_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let naive = parse_naive(head)?;
        let offset = FixedOffset::east_opt(hours * 3600)?;
        offset.from_local_datetime(&naive).single().map(|dt| dt.with_timezone(&Utc))
    })
}
