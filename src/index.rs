//! Owner partitioning for record collections.
//!
//! Every record with a non-empty owner lands in exactly one partition;
//! records without an owner are counted but never grouped. Partitions keep
//! input order so later stable sorts stay deterministic.

use indexmap::{IndexMap, IndexSet};

use crate::data::JobRecord;
use crate::types::OwnerId;

/// Distinct owner ids in first-occurrence order.
pub fn owner_ids(records: &[JobRecord]) -> Vec<OwnerId> {
    let owners: IndexSet<&str> = records.iter().filter_map(JobRecord::owner).collect();
    owners.into_iter().map(str::to_string).collect()
}

/// Records owned by `owner`, in input order.
pub fn owner_partition<'a>(records: &'a [JobRecord], owner: &str) -> Vec<&'a JobRecord> {
    records
        .iter()
        .filter(|record| record.owner() == Some(owner))
        .collect()
}

/// First owner in the list, used when the caller has not picked one yet.
pub fn default_owner(owners: &[OwnerId]) -> Option<&str> {
    owners.first().map(String::as_str)
}

/// Precomputed owner partitions over one record collection.
///
/// Stores input positions rather than records, so the index borrows nothing
/// and stays valid for exactly the collection it was built from.
#[derive(Clone, Debug, Default)]
pub struct RecordIndex {
    partitions: IndexMap<OwnerId, Vec<usize>>,
    unowned: usize,
    total: usize,
}

impl RecordIndex {
    /// Build partitions for every owner in a single pass.
    pub fn build(records: &[JobRecord]) -> Self {
        let mut partitions: IndexMap<OwnerId, Vec<usize>> = IndexMap::new();
        let mut unowned = 0usize;
        for (idx, record) in records.iter().enumerate() {
            match record.owner() {
                Some(owner) => partitions.entry(owner.to_string()).or_default().push(idx),
                None => unowned += 1,
            }
        }
        Self {
            partitions,
            unowned,
            total: records.len(),
        }
    }

    /// Owner ids in first-occurrence order.
    pub fn owners(&self) -> Vec<OwnerId> {
        self.partitions.keys().cloned().collect()
    }

    /// Input positions of `owner`'s records (empty for unknown owners).
    pub fn positions(&self, owner: &str) -> &[usize] {
        self.partitions
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve `owner`'s partition against the collection the index was built from.
    ///
    /// Positions outside `records` are skipped, so a mismatched collection
    /// degrades to a shorter partition instead of panicking.
    pub fn partition<'a>(&self, records: &'a [JobRecord], owner: &str) -> Vec<&'a JobRecord> {
        self.positions(owner)
            .iter()
            .filter_map(|idx| records.get(*idx))
            .collect()
    }

    /// Number of records without an owner.
    pub fn unowned_count(&self) -> usize {
        self.unowned
    }

    /// Number of records in the indexed collection.
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(owner: Option<&str>, id: &str) -> JobRecord {
        JobRecord {
            id: Some(id.to_string()),
            owner_id: owner.map(str::to_string),
            ..JobRecord::default()
        }
    }

    fn sample() -> Vec<JobRecord> {
        vec![
            owned(Some("U2"), "a"),
            owned(Some("U1"), "b"),
            owned(None, "c"),
            owned(Some("U2"), "d"),
            owned(Some(""), "e"),
            owned(Some("U3"), "f"),
        ]
    }

    #[test]
    fn owner_ids_follow_first_occurrence_and_skip_unowned() {
        assert_eq!(owner_ids(&sample()), vec!["U2", "U1", "U3"]);
        assert!(owner_ids(&[]).is_empty());
    }

    #[test]
    fn partitions_cover_every_owned_record_exactly_once() {
        let records = sample();
        let index = RecordIndex::build(&records);
        let owned_total: usize = index
            .owners()
            .iter()
            .map(|owner| index.positions(owner).len())
            .sum();
        assert_eq!(owned_total + index.unowned_count(), index.total());
        assert_eq!(index.unowned_count(), 2);

        let mut seen: Vec<usize> = index
            .owners()
            .iter()
            .flat_map(|owner| index.positions(owner).to_vec())
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), owned_total);
    }

    #[test]
    fn index_partition_matches_direct_filter() {
        let records = sample();
        let index = RecordIndex::build(&records);
        for owner in owner_ids(&records) {
            let direct: Vec<_> = owner_partition(&records, &owner)
                .iter()
                .map(|record| record.record_key())
                .collect();
            let indexed: Vec<_> = index
                .partition(&records, &owner)
                .iter()
                .map(|record| record.record_key())
                .collect();
            assert_eq!(direct, indexed);
        }
        assert_eq!(
            owner_partition(&records, "U2")
                .iter()
                .map(|record| record.record_key())
                .collect::<Vec<_>>(),
            vec!["a", "d"]
        );
    }

    #[test]
    fn unknown_owner_and_mismatched_collection_degrade_to_empty() {
        let records = sample();
        let index = RecordIndex::build(&records);
        assert!(index.positions("missing").is_empty());
        assert!(index.partition(&records[..1], "U3").is_empty());
        assert!(owner_partition(&records, "missing").is_empty());
    }

    #[test]
    fn default_owner_picks_first() {
        let owners = owner_ids(&sample());
        assert_eq!(default_owner(&owners), Some("U2"));
        assert_eq!(default_owner(&[]), None);
    }
}
