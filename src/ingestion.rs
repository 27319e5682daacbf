use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::MonitorConfig;
use crate::data::JobRecord;
use crate::errors::MonitorError;
use crate::index::RecordIndex;
use crate::pipeline::{OwnerReport, build_partition_view};
use crate::source::JobSource;
use crate::types::{LogMessage, OwnerId};

/// Thread-safe holder of the current fetch cycle's records and derived views.
///
/// Each successful or failed refresh replaces the whole collection and bumps
/// the generation; memoized views from earlier generations are dropped.
#[derive(Clone)]
pub struct JobStore {
    inner: Arc<RwLock<JobStoreInner>>,
    config: MonitorConfig,
}

/// Internal mutable state behind `JobStore` locks.
struct JobStoreInner {
    records: Arc<[JobRecord]>,
    index: RecordIndex,
    generation: u64,
    last_error: Option<LogMessage>,
    views: HashMap<(OwnerId, Option<NaiveDate>), Arc<OwnerReport>>,
}

impl JobStoreInner {
    fn replace(&mut self, records: Vec<JobRecord>, error: Option<LogMessage>) {
        self.index = RecordIndex::build(&records);
        self.records = records.into();
        self.generation = self.generation.saturating_add(1);
        self.last_error = error;
        self.views.clear();
    }
}

impl JobStore {
    /// Create an empty store (generation 0) using `config` for every derived view.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(JobStoreInner {
                records: Arc::from(Vec::new()),
                index: RecordIndex::default(),
                generation: 0,
                last_error: None,
                views: HashMap::new(),
            })),
            config,
        }
    }

    /// Configuration used for derived views.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Replace the collection with `records`, invalidating derived views.
    pub fn replace(&self, records: Vec<JobRecord>) -> u64 {
        let mut inner = self.inner.write().expect("job store poisoned");
        inner.replace(records, None);
        debug!(
            generation = inner.generation,
            records = inner.records.len(),
            "replaced job snapshot"
        );
        inner.generation
    }

    /// Fetch a new collection from `source` and install it.
    ///
    /// On failure the store falls back to an empty collection, remembers the
    /// error text, and returns the error.
    pub fn refresh(&self, source: &dyn JobSource) -> Result<u64, MonitorError> {
        match source.fetch() {
            Ok(records) => Ok(self.replace(records)),
            Err(err) => {
                let message = format!("job source '{}' refresh failed: {}", source.id(), err);
                warn!("{}", message);
                let mut inner = self.inner.write().expect("job store poisoned");
                inner.replace(Vec::new(), Some(message));
                Err(err)
            }
        }
    }

    /// Current generation; increases on every replacement.
    pub fn generation(&self) -> u64 {
        self.inner.read().expect("job store poisoned").generation
    }

    /// Error text from the most recent failed refresh, cleared by the next replacement.
    pub fn last_error(&self) -> Option<LogMessage> {
        self.inner
            .read()
            .expect("job store poisoned")
            .last_error
            .clone()
    }

    /// Number of records in the current collection.
    pub fn len(&self) -> usize {
        self.inner.read().expect("job store poisoned").index.total()
    }

    /// Number of records in the current collection that have no owner.
    pub fn unowned_count(&self) -> usize {
        self.inner
            .read()
            .expect("job store poisoned")
            .index
            .unowned_count()
    }

    /// Returns `true` when the current collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct owners of the current collection in first-occurrence order.
    pub fn owners(&self) -> Vec<OwnerId> {
        self.inner.read().expect("job store poisoned").index.owners()
    }

    /// Derived views for `owner` on `filter_date`, memoized per generation.
    pub fn owner_report(&self, owner: &str, filter_date: Option<NaiveDate>) -> Arc<OwnerReport> {
        let key = (owner.to_string(), filter_date);
        let inner = self.inner.read().expect("job store poisoned");
        if let Some(report) = inner.views.get(&key) {
            return report.clone();
        }
        let records = inner.records.clone();
        let generation = inner.generation;
        let partition = inner.index.partition(&records, owner);
        drop(inner);

        debug!(owner, generation, "computing owner view");
        let view = build_partition_view(owner, partition, filter_date, &self.config);
        let report = Arc::new(view.to_report());

        let mut inner = self.inner.write().expect("job store poisoned");
        // A refresh may have landed while computing; never cache against a newer snapshot.
        if inner.generation == generation {
            inner.views.insert(key, report.clone());
        }
        report
    }

    /// Number of memoized views for the current generation.
    pub fn cached_view_count(&self) -> usize {
        self.inner.read().expect("job store poisoned").views.len()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}
