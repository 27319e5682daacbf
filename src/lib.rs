#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Reusable CLI runners.
pub mod apps;
/// Status census types.
pub mod census;
/// Monitor configuration types.
pub mod config;
/// Centralized constants used across classification, display, and ingestion.
pub mod constants;
/// Job record data model.
pub mod data;
/// Date normalization into canonical instants.
pub mod dates;
/// Display formatting with explicit locale and zone.
pub mod format;
/// Owner partitioning.
pub mod index;
/// Snapshot store and memoized owner views.
pub mod ingestion;
/// Filter/sort pipeline producing per-owner views.
pub mod pipeline;
/// Job source traits and built-in sources.
pub mod source;
/// Active-application classification.
pub mod status;
/// Shared type aliases.
pub mod types;

mod errors;

pub use census::{StatusCensus, StatusShare, status_census};
pub use config::{CivilZone, DisplayLocale, MonitorConfig};
pub use data::{JobRecord, RawDate, TimelineEntry};
pub use dates::{CanonicalInstant, canonical_instant, normalize_date};
pub use errors::MonitorError;
pub use index::{RecordIndex, default_owner, owner_ids, owner_partition};
pub use ingestion::JobStore;
pub use pipeline::{
    OwnerReport, OwnerView, RankedRecord, ReportEntry, active_set, build_owner_view,
    build_partition_view, day_bounded_subset, sorted_active_set,
};
pub use source::{FileJobSource, InMemoryJobSource, JobSource, decode_job_payload};
pub use status::{current_status_label, is_active_application, last_timeline_status};
pub use types::{DisplayText, LogMessage, OwnerId, RecordId, SourceId, StatusLabel};
