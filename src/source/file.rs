use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::JobSource;
use super::payload::decode_job_payload;
use crate::constants::ingestion::FILE_SOURCE_ID_PREFIX;
use crate::data::JobRecord;
use crate::errors::MonitorError;
use crate::types::SourceId;

/// Source that re-reads a JSON payload file on every fetch.
#[derive(Clone, Debug)]
pub struct FileJobSource {
    id: SourceId,
    path: PathBuf,
}

impl FileJobSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: format!("{}{}", FILE_SOURCE_ID_PREFIX, path.display()),
            path,
        }
    }

    /// Payload file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobSource for FileJobSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<Vec<JobRecord>, MonitorError> {
        let bytes = fs::read(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => MonitorError::SourceUnavailable {
                source_id: self.id.clone(),
                reason: format!("payload file {} not found", self.path.display()),
            },
            _ => MonitorError::Io(err),
        })?;
        let records = decode_job_payload(&bytes)?;
        debug!(source = %self.id, records = records.len(), "loaded job payload");
        Ok(records)
    }
}
