//! Active-application classification.
//!
//! A record is active only when its top-level status and its most recent
//! timeline entry agree on the reference label. Partially-updated records
//! (status changed without a matching timeline entry, or the reverse) are not
//! active.

use crate::constants::status::STATUS_UNKNOWN;
use crate::data::{JobRecord, TimelineEntry};
use crate::types::StatusLabel;

/// Lowercased label of the last timeline entry, or `None` for an empty or malformed tail.
pub fn last_timeline_status(timeline: &[TimelineEntry]) -> Option<StatusLabel> {
    timeline.last().and_then(TimelineEntry::status_label)
}

/// Lowercased top-level status, `"unknown"` when missing or empty.
pub fn current_status_label(record: &JobRecord) -> StatusLabel {
    match record.current_status.as_deref() {
        Some(status) if !status.is_empty() => status.to_lowercase(),
        _ => STATUS_UNKNOWN.to_string(),
    }
}

/// Returns `true` when both status signals equal `reference` (case-insensitive).
pub fn is_active_application(record: &JobRecord, reference: &str) -> bool {
    let reference = reference.to_lowercase();
    let current = record
        .current_status
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if current != reference {
        return false;
    }
    last_timeline_status(&record.timeline).as_deref() == Some(reference.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::status::STATUS_APPLIED;

    fn record(current: Option<&str>, timeline: Vec<TimelineEntry>) -> JobRecord {
        JobRecord {
            owner_id: Some("U1".into()),
            current_status: current.map(str::to_string),
            timeline,
            ..JobRecord::default()
        }
    }

    fn plain(status: &str) -> TimelineEntry {
        TimelineEntry::PlainStatus(status.to_string())
    }

    fn event(status: Option<&str>) -> TimelineEntry {
        TimelineEntry::StructuredEvent {
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn empty_timeline_is_never_active() {
        for current in [Some("applied"), Some("Applied"), Some("rejected"), None] {
            assert!(!is_active_application(&record(current, Vec::new()), STATUS_APPLIED));
        }
    }

    #[test]
    fn both_signals_must_agree() {
        let matching = record(Some("applied"), vec![plain("saved"), plain("applied")]);
        assert!(is_active_application(&matching, STATUS_APPLIED));

        let stale_timeline = record(Some("applied"), vec![plain("applied"), plain("saved")]);
        assert!(!is_active_application(&stale_timeline, STATUS_APPLIED));

        let stale_status = record(Some("interviewing"), vec![plain("applied")]);
        assert!(!is_active_application(&stale_status, STATUS_APPLIED));

        let missing_status = record(None, vec![plain("applied")]);
        assert!(!is_active_application(&missing_status, STATUS_APPLIED));
    }

    #[test]
    fn comparison_ignores_case_on_every_side() {
        let mixed = record(Some("APPLIED"), vec![event(Some("Applied"))]);
        assert!(is_active_application(&mixed, STATUS_APPLIED));
        assert!(is_active_application(&mixed, "ApPlIeD"));
    }

    #[test]
    fn malformed_structured_tail_is_not_active() {
        let missing = record(Some("applied"), vec![plain("applied"), event(None)]);
        assert!(!is_active_application(&missing, STATUS_APPLIED));

        let empty = record(Some("applied"), vec![event(Some(""))]);
        assert!(!is_active_application(&empty, STATUS_APPLIED));
    }

    #[test]
    fn last_timeline_status_unwraps_either_shape() {
        assert_eq!(last_timeline_status(&[]), None);
        assert_eq!(
            last_timeline_status(&[plain("Saved"), event(Some("Offer"))]).as_deref(),
            Some("offer")
        );
        assert_eq!(
            last_timeline_status(&[event(Some("offer")), plain("HIRED")]).as_deref(),
            Some("hired")
        );
    }

    #[test]
    fn current_status_label_defaults_to_unknown() {
        assert_eq!(current_status_label(&record(None, Vec::new())), "unknown");
        assert_eq!(current_status_label(&record(Some(""), Vec::new())), "unknown");
        assert_eq!(
            current_status_label(&record(Some("On-Hold"), Vec::new())),
            "on-hold"
        );
    }
}
