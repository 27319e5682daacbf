use serde_json::Value;
use tracing::warn;

use crate::constants::ingestion::{
    PAYLOAD_JOBS_FIELD, SKIP_NON_OBJECT_MSG, SKIP_UNDECODABLE_MSG,
};
use crate::data::JobRecord;
use crate::errors::MonitorError;

/// Decode a raw fetch payload.
///
/// Invalid JSON is an error. A missing or non-array `jobDB` field yields an
/// empty collection, and individual entries that are not objects are skipped.
pub fn decode_job_payload(bytes: &[u8]) -> Result<Vec<JobRecord>, MonitorError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(decode_job_payload_value(value))
}

/// Decode an already-parsed payload value; never fails.
pub fn decode_job_payload_value(value: Value) -> Vec<JobRecord> {
    let entries = match value {
        Value::Object(mut fields) => match fields.remove(PAYLOAD_JOBS_FIELD) {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(position, "{}", SKIP_NON_OBJECT_MSG);
            continue;
        }
        match serde_json::from_value::<JobRecord>(entry) {
            Ok(record) => records.push(record),
            Err(err) => warn!(position, error = %err, "{}", SKIP_UNDECODABLE_MSG),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_job_array() {
        let payload = br#"{"jobDB": [
            {"_id": "1", "userID": "U1", "currentStatus": "Applied", "timeline": ["applied"]},
            {"_id": "2", "userID": "U2"}
        ]}"#;
        let records = decode_job_payload(payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].owner(), Some("U1"));
        assert_eq!(records[1].record_key(), "2");
    }

    #[test]
    fn missing_or_non_array_job_field_is_empty() {
        assert!(decode_job_payload(br#"{}"#).unwrap().is_empty());
        assert!(decode_job_payload(br#"{"jobDB": null}"#).unwrap().is_empty());
        assert!(decode_job_payload(br#"{"jobDB": {"_id": "1"}}"#).unwrap().is_empty());
        assert!(decode_job_payload(br#"[1, 2, 3]"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_payload_error() {
        let err = decode_job_payload(b"{not json").unwrap_err();
        assert!(matches!(err, MonitorError::Payload(_)));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let records = decode_job_payload_value(json!({
            "jobDB": ["oops", 7, null, {"_id": "kept", "userID": "U1"}]
        }));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_key(), "kept");
    }
}
