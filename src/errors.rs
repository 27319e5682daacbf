use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for fetch-boundary, payload, IO, and configuration failures.
///
/// Record-level problems never surface here; they resolve to defaults.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The source could not produce a collection.
    #[error("job source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Id of the failing source.
        source_id: SourceId,
        /// Human-readable cause.
        reason: String,
    },
    /// The payload was not valid JSON.
    #[error("invalid job payload: {0}")]
    Payload(String),
    /// Underlying filesystem error.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Invalid offset, locale, or reference status.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for MonitorError {
    fn from(err: serde_json::Error) -> Self {
        MonitorError::Payload(err.to_string())
    }
}
