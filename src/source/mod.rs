//! Job sources: the seam between the monitor and whatever fetches records.
//!
//! Ownership model:
//! - `JobSource` is the monitor-facing interface that produces one full
//!   collection per fetch cycle.
//! - `decode_job_payload` turns the wire payload (`{"jobDB": [...]}`) into
//!   records, tolerating malformed entries.
//! - `InMemoryJobSource` and `FileJobSource` are the built-in implementations;
//!   network-backed sources live outside this crate.

use crate::data::JobRecord;
use crate::errors::MonitorError;

/// File-backed payload source.
pub mod file;
/// Static in-memory source.
pub mod memory;
/// Payload decoding helpers.
pub mod payload;

pub use file::FileJobSource;
pub use memory::InMemoryJobSource;
pub use payload::{decode_job_payload, decode_job_payload_value};

/// Monitor-facing job source.
///
/// Every `fetch` returns the complete collection for one cycle; the caller
/// replaces (never merges) whatever it held before. An empty collection is a
/// valid result.
pub trait JobSource: Send + Sync {
    /// Stable source identifier used in logs and errors.
    fn id(&self) -> &str;
    /// Fetch the full record collection.
    fn fetch(&self) -> Result<Vec<JobRecord>, MonitorError>;
}

impl<T> JobSource for Box<T>
where
    T: JobSource + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }

    fn fetch(&self) -> Result<Vec<JobRecord>, MonitorError> {
        (**self).fetch()
    }
}
