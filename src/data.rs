use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use crate::types::{OwnerId, RecordId, StatusLabel};

/// Raw, unnormalized date value as supplied by the fetch payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Native timestamp in milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Textual date of unknown shape (ISO, RFC 2822, `D/M/YYYY[, H:MM[:SS] am]`, ...).
    Text(String),
}

impl RawDate {
    /// Build a textual raw date.
    pub fn text(value: impl Into<String>) -> Self {
        RawDate::Text(value.into())
    }

    /// Mirror of "falsy": empty/blank text and a zero timestamp carry no date.
    pub fn is_blank(&self) -> bool {
        match self {
            RawDate::Timestamp(ms) => *ms == 0,
            RawDate::Text(text) => text.trim().is_empty(),
        }
    }

    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(RawDate::Text(text)),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms as i64))
                .map(RawDate::Timestamp),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for RawDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RawDate::from_json(value)
            .ok_or_else(|| serde::de::Error::custom("expected a date string or millisecond timestamp"))
    }
}

/// One entry of a record's status timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimelineEntry {
    /// Bare status label, e.g. `"applied"`.
    PlainStatus(String),
    /// Structured event carrying a `status` field (absent when malformed).
    StructuredEvent {
        /// Status label carried by the event.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
}

impl TimelineEntry {
    /// Lowercased status label of this entry, regardless of its shape.
    ///
    /// A structured event with a missing or empty `status` yields `None`.
    pub fn status_label(&self) -> Option<StatusLabel> {
        let raw = match self {
            TimelineEntry::PlainStatus(status) => Some(status.as_str()),
            TimelineEntry::StructuredEvent { status } => {
                status.as_deref().filter(|status| !status.is_empty())
            }
        };
        raw.map(str::to_lowercase)
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::String(status) => TimelineEntry::PlainStatus(status),
            Value::Object(mut fields) => TimelineEntry::StructuredEvent {
                status: fields.remove("status").and_then(lenient_text_value),
            },
            _ => TimelineEntry::StructuredEvent { status: None },
        }
    }
}

impl<'de> Deserialize<'de> for TimelineEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TimelineEntry::from_json(Value::deserialize(deserializer)?))
    }
}

/// Job-application record as produced by the fetch collaborator.
///
/// Read-only to the pipeline: every derived value (canonical instant, active
/// flag, census) is computed alongside and never written back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Opaque record identifier.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Secondary job identifier used when `id` is missing.
    #[serde(
        rename = "jobID",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_id: Option<String>,
    /// Client that owns this record; records without one are excluded from grouped views.
    #[serde(
        rename = "userID",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<OwnerId>,
    /// Job title; rendered as a placeholder when missing.
    #[serde(
        rename = "jobTitle",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Company name; rendered as a placeholder when missing.
    #[serde(
        rename = "companyName",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
    /// Free-text top-level status, compared case-insensitively.
    #[serde(
        rename = "currentStatus",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_status: Option<String>,
    /// Ordered status history; the last entry is the most recent.
    #[serde(default, deserialize_with = "lenient_timeline")]
    pub timeline: Vec<TimelineEntry>,
    /// Preferred date source.
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<RawDate>,
    /// Fallback date source when `updated_at` is missing or blank.
    #[serde(
        rename = "dateAdded",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<RawDate>,
    /// Posting URL, part of the fallback record key.
    #[serde(
        rename = "joblink",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_link: Option<String>,
    /// Free-form description payload (string or structured JSON).
    #[serde(
        rename = "jobDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Value>,
}

impl JobRecord {
    /// Owner id, treating an empty string as missing.
    pub fn owner(&self) -> Option<&str> {
        non_empty(self.owner_id.as_deref())
    }

    /// Display identity: `id`, else `job_id`, else `"{owner}-{job_link}"`.
    pub fn record_key(&self) -> RecordId {
        if let Some(id) = non_empty(self.id.as_deref()) {
            return id.to_string();
        }
        if let Some(job_id) = non_empty(self.job_id.as_deref()) {
            return job_id.to_string();
        }
        format!(
            "{}-{}",
            self.owner_id.as_deref().unwrap_or_default(),
            self.job_link.as_deref().unwrap_or_default()
        )
    }

    /// Raw date preferred for normalization: `updated_at` unless blank, else `date_added`.
    pub fn preferred_date(&self) -> Option<&RawDate> {
        self.updated_at
            .as_ref()
            .filter(|raw| !raw.is_blank())
            .or(self.date_added.as_ref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Scalar to text, with falsy scalars (`""`, `0`, `false`) treated as missing.
fn lenient_text_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64().is_some_and(|n| n == 0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some(true.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text_value(Value::deserialize(deserializer)?))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<RawDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawDate::from_json(Value::deserialize(deserializer)?))
}

fn lenient_timeline<'de, D>(deserializer: D) -> Result<Vec<TimelineEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries.into_iter().map(TimelineEntry::from_json).collect()),
        _ => Ok(Vec::new()),
    }
}
