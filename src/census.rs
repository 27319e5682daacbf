use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::status::COMMON_STATUS_ORDER;
use crate::data::JobRecord;
use crate::status::current_status_label;
use crate::types::StatusLabel;

/// Per-status record counts for one owner partition.
///
/// Keys are lowercased labels (`"unknown"` for records without one). Counts
/// always sum to the size of the partition the census was computed from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCensus {
    counts: IndexMap<StatusLabel, usize>,
}

/// One census entry with its share of the partition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusShare {
    /// Lowercased status label.
    pub label: StatusLabel,
    /// Records carrying the label.
    pub count: usize,
    /// Fraction of the partition, in `0.0..=1.0`.
    pub share: f64,
}

impl StatusCensus {
    /// Count of records carrying `label` (lowercase), zero when absent.
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of records counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when the census covers no records.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels for display: well-known labels first in their fixed order,
    /// then the remaining labels alphabetically.
    pub fn display_order(&self) -> Vec<StatusLabel> {
        let mut ordered: Vec<StatusLabel> = COMMON_STATUS_ORDER
            .iter()
            .filter(|label| self.get(label) > 0)
            .map(|label| label.to_string())
            .collect();
        let mut rest: Vec<StatusLabel> = self
            .counts
            .keys()
            .filter(|label| !COMMON_STATUS_ORDER.contains(&label.as_str()))
            .cloned()
            .collect();
        rest.sort();
        ordered.extend(rest);
        ordered
    }

    /// Entries in display order with their share of the partition.
    pub fn shares(&self) -> Vec<StatusShare> {
        let total = self.total();
        self.display_order()
            .into_iter()
            .map(|label| {
                let count = self.get(&label);
                StatusShare {
                    share: if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64
                    },
                    label,
                    count,
                }
            })
            .collect()
    }

    /// Iterate `(label, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }
}

/// Count records per lowercased status label; recomputed from scratch on every call.
pub fn status_census<'a, I>(partition: I) -> StatusCensus
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut counts: IndexMap<StatusLabel, usize> = IndexMap::new();
    for record in partition {
        *counts.entry(current_status_label(record)).or_insert(0) += 1;
    }
    StatusCensus { counts }
}
