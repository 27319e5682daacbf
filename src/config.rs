use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::constants::status::STATUS_APPLIED;
use crate::errors::MonitorError;

/// Fixed UTC offset in which civil date components are read and written.
///
/// Locale date strings carry no zone, so the normalizer needs one to turn
/// `10/03/2024, 9:00am` into an instant. Day filtering and display formatting
/// use the same zone, which keeps "same calendar day" consistent end to end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CivilZone {
    offset: FixedOffset,
}

impl CivilZone {
    /// Zone at UTC+00:00.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Build a zone from seconds east of UTC (must be strictly within ±24h).
    pub fn from_offset_seconds(seconds: i32) -> Result<Self, MonitorError> {
        FixedOffset::east_opt(seconds)
            .map(|offset| Self { offset })
            .ok_or_else(|| {
                MonitorError::Configuration(format!("utc offset {seconds}s is out of range"))
            })
    }

    /// Underlying chrono offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current civil date in this zone.
    ///
    /// Only callers that want an implicit "today" should use this; the pipeline
    /// itself always takes the filter date as a parameter.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

impl Default for CivilZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

impl FromStr for CivilZone {
    type Err = MonitorError;

    /// Accepts `Z`, `UTC`, `+HH:MM`, `-HH:MM`, `+HHMM`, or `+HH`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        let invalid = || MonitorError::Configuration(format!("invalid utc offset '{trimmed}'"));
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|ch| *ch != ':').collect();
        if !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        let (hours, minutes) = match digits.len() {
            2 => (digits.parse::<i32>().map_err(|_| invalid())?, 0),
            4 => (
                digits[..2].parse::<i32>().map_err(|_| invalid())?,
                digits[2..].parse::<i32>().map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };
        if minutes >= 60 {
            return Err(invalid());
        }
        Self::from_offset_seconds(sign * (hours * 3600 + minutes * 60))
    }
}

/// Calendar layout used when rendering canonical instants for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayLocale {
    /// `dd/mm/yyyy` and `dd/mm/yyyy, HH:MM:SS`.
    #[default]
    EnGb,
    /// `mm/dd/yyyy` and `mm/dd/yyyy, h:MM:SS AM`.
    EnUs,
    /// `yyyy-mm-dd` and `yyyy-mm-dd HH:MM:SS`.
    Iso,
}

impl FromStr for DisplayLocale {
    type Err = MonitorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-gb" => Ok(Self::EnGb),
            "en-us" => Ok(Self::EnUs),
            "iso" => Ok(Self::Iso),
            other => Err(MonitorError::Configuration(format!(
                "unsupported display locale '{other}'"
            ))),
        }
    }
}

/// Top-level monitor configuration.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Status label that marks an application as active (compared case-insensitively).
    pub reference_status: Cow<'static, str>,
    /// Civil zone for date normalization, day filtering, and display.
    pub zone: CivilZone,
    /// Calendar layout for display formatting.
    pub locale: DisplayLocale,
}

impl MonitorConfig {
    /// Return a copy with `reference_status` replaced, rejecting blank labels.
    pub fn with_reference_status(mut self, label: &str) -> Result<Self, MonitorError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(MonitorError::Configuration(
                "reference status must not be empty".to_string(),
            ));
        }
        self.reference_status = Cow::Owned(label.to_lowercase());
        Ok(self)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reference_status: Cow::Borrowed(STATUS_APPLIED),
            zone: CivilZone::utc(),
            locale: DisplayLocale::EnGb,
        }
    }
}
