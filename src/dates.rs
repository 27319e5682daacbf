//! Date normalization: raw date values of unknown shape to a canonical instant.
//!
//! Precedence:
//! 1) blank input (missing, empty text, zero timestamp) is absent;
//! 2) the day-first locale pattern `D/M/YYYY[, H:MM[:SS] [am|pm]]` (`/` or `-`);
//! 3) unambiguous generic shapes (RFC 3339, ISO date-time, ISO date, RFC 2822).
//!
//! Anything else is absent. Numeric forms that fail the day-first pattern
//! (two-digit years, year-first with slashes) are never re-read month-first.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::CivilZone;
use crate::data::{JobRecord, RawDate};

static LOCALE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([0-9]{1,2})[/\-]([0-9]{1,2})[/\-]([0-9]{4})(?:[,\s]+([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?\s*(am|pm)?)?$",
    )
    .unwrap()
});

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// A normalized point in time, or the absent marker.
///
/// Present instants are always expressed in the civil zone they were
/// normalized with. Absent compares as time zero when sorting and
/// serializes as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CanonicalInstant(Option<DateTime<FixedOffset>>);

impl CanonicalInstant {
    /// The absent marker.
    pub const ABSENT: CanonicalInstant = CanonicalInstant(None);

    /// Returns `true` for the absent marker.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Concrete instant, if present.
    pub fn get(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Milliseconds since the Unix epoch, with absent treated as zero.
    pub fn sort_key(&self) -> i64 {
        self.0.map(|instant| instant.timestamp_millis()).unwrap_or(0)
    }

    /// Civil calendar date of this instant in `zone`.
    pub fn civil_date(&self, zone: CivilZone) -> Option<NaiveDate> {
        self.0
            .map(|instant| instant.with_timezone(&zone.offset()).date_naive())
    }

    /// Returns `true` when this instant falls on `date` in `zone`; time-of-day is ignored.
    pub fn falls_on(&self, date: NaiveDate, zone: CivilZone) -> bool {
        self.civil_date(zone) == Some(date)
    }

    /// Raw form that normalizes back to this instant (absent stays absent).
    pub fn to_raw(&self) -> Option<RawDate> {
        self.0
            .map(|instant| RawDate::Timestamp(instant.timestamp_millis()))
    }
}

/// Normalize a raw date value into a canonical instant in `zone`.
pub fn normalize_date(raw: Option<&RawDate>, zone: CivilZone) -> CanonicalInstant {
    let Some(raw) = raw.filter(|raw| !raw.is_blank()) else {
        return CanonicalInstant::ABSENT;
    };
    let instant = match raw {
        RawDate::Timestamp(ms) => from_epoch_millis(*ms, zone),
        RawDate::Text(text) => parse_date_text(text.trim(), zone),
    };
    CanonicalInstant(instant)
}

/// Canonical instant for a record: `updated_at` first, `date_added` as fallback.
pub fn canonical_instant(record: &JobRecord, zone: CivilZone) -> CanonicalInstant {
    normalize_date(record.preferred_date(), zone)
}

fn from_epoch_millis(ms: i64, zone: CivilZone) -> Option<DateTime<FixedOffset>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|instant| instant.with_timezone(&zone.offset()))
}

fn parse_date_text(text: &str, zone: CivilZone) -> Option<DateTime<FixedOffset>> {
    if let Some(caps) = LOCALE_DATE_RE.captures(text) {
        // A pattern match is final: out-of-range components are absent, not rolled over.
        return locale_date_time(&caps).and_then(|naive| localize(naive, zone));
    }
    parse_generic(text, zone)
}

fn locale_date_time(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let number = |idx: usize| -> Option<u32> {
        match caps.get(idx) {
            Some(found) => found.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let day = number(1)?;
    let month = number(2)?;
    let year = caps.get(3)?.as_str().parse::<i32>().ok()?;
    let mut hour = number(4)?;
    let minute = number(5)?;
    let second = number(6)?;

    if let Some(meridiem) = caps.get(7) {
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        if hour == 12 {
            hour = if is_pm { 12 } else { 0 };
        } else if is_pm {
            hour += 12;
        }
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn parse_generic(text: &str, zone: CivilZone) -> Option<DateTime<FixedOffset>> {
    let offset = zone.offset();
    if !has_iso_year_prefix(text) {
        return DateTime::parse_from_rfc2822(text)
            .ok()
            .map(|instant| instant.with_timezone(&offset));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&offset));
    }
    let zoned = zulu_as_offset(text);
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(&zoned, format) {
            return Some(instant.with_timezone(&offset));
        }
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return localize(naive, zone);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| localize(naive, zone))
}

/// ISO shapes must open with `YYYY-`; chrono's `%Y` would otherwise accept `10-03-24`.
fn has_iso_year_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

/// `%z` has no `Z` form, so a trailing `Z` is rewritten as `+0000`.
fn zulu_as_offset(text: &str) -> Cow<'_, str> {
    match text.strip_suffix(|ch| ch == 'Z' || ch == 'z') {
        Some(stripped) => Cow::Owned(format!("{stripped}+0000")),
        None => Cow::Borrowed(text),
    }
}

fn localize(naive: NaiveDateTime, zone: CivilZone) -> Option<DateTime<FixedOffset>> {
    zone.offset().from_local_datetime(&naive).single()
}
