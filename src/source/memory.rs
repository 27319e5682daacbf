use std::sync::Arc;

use super::JobSource;
use crate::constants::ingestion::IN_MEMORY_SOURCE_ID;
use crate::data::JobRecord;
use crate::errors::MonitorError;
use crate::types::SourceId;

/// Source that serves a fixed, prebuilt collection.
#[derive(Clone, Debug)]
pub struct InMemoryJobSource {
    id: SourceId,
    records: Arc<Vec<JobRecord>>,
}

impl InMemoryJobSource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<JobRecord>) -> Self {
        Self {
            id: id.into(),
            records: Arc::new(records),
        }
    }

    /// Create an in-memory source with the default id.
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        Self::new(IN_MEMORY_SOURCE_ID, records)
    }
}

impl JobSource for InMemoryJobSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<Vec<JobRecord>, MonitorError> {
        Ok(self.records.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_full_collection_each_time() {
        let source = InMemoryJobSource::from_records(vec![
            JobRecord {
                id: Some("a".into()),
                ..JobRecord::default()
            },
            JobRecord {
                id: Some("b".into()),
                ..JobRecord::default()
            },
        ]);
        assert_eq!(source.id(), "memory");
        assert_eq!(source.fetch().unwrap().len(), 2);
        assert_eq!(source.fetch().unwrap().len(), 2);
    }

    #[test]
    fn empty_source_is_valid() {
        let source = InMemoryJobSource::new("empty", Vec::new());
        assert!(source.fetch().unwrap().is_empty());
    }
}
