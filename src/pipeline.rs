//! Filter/sort pipeline composing classification, partitioning, and dates.
//!
//! All functions are pure over their inputs. Callers pass the owner and the
//! filter date explicitly; there is no implicit "today".

use chrono::NaiveDate;
use serde::Serialize;

use crate::census::{StatusCensus, status_census};
use crate::config::{CivilZone, MonitorConfig};
use crate::data::JobRecord;
use crate::dates::{CanonicalInstant, canonical_instant};
use crate::index::owner_partition;
use crate::status::is_active_application;
use crate::types::OwnerId;

/// A record paired with its canonical instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedRecord<'a> {
    /// Borrowed source record.
    pub record: &'a JobRecord,
    /// Normalized `updated_at`/`date_added`.
    pub instant: CanonicalInstant,
}

/// Active records of a partition, in input order.
pub fn active_set<'a, I>(partition: I, reference: &str) -> Vec<&'a JobRecord>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    partition
        .into_iter()
        .filter(|record| is_active_application(record, reference))
        .collect()
}

/// Active records ordered newest first.
///
/// Absent instants rank as time zero. The sort is stable, so equal instants
/// (including two absent ones) keep input order.
pub fn sorted_active_set<'a, I>(partition: I, config: &MonitorConfig) -> Vec<RankedRecord<'a>>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut ranked: Vec<RankedRecord<'a>> = active_set(partition, &config.reference_status)
        .into_iter()
        .map(|record| RankedRecord {
            record,
            instant: canonical_instant(record, config.zone),
        })
        .collect();
    ranked.sort_by(|a, b| b.instant.sort_key().cmp(&a.instant.sort_key()));
    ranked
}

/// Entries whose instant falls on `date` in `zone`, keeping the given order.
pub fn day_bounded_subset<'a>(
    sorted: &[RankedRecord<'a>],
    date: NaiveDate,
    zone: CivilZone,
) -> Vec<RankedRecord<'a>> {
    sorted
        .iter()
        .filter(|entry| entry.instant.falls_on(date, zone))
        .copied()
        .collect()
}

/// Every derived view for one owner over one record collection.
#[derive(Clone, Debug)]
pub struct OwnerView<'a> {
    /// Owner the view was built for.
    pub owner: OwnerId,
    /// Status counts over the whole partition.
    pub census: StatusCensus,
    /// Active records, newest first.
    pub applied: Vec<RankedRecord<'a>>,
    /// Date the day subset was filtered on; `None` means no date was picked.
    pub filter_date: Option<NaiveDate>,
    /// Active records falling on `filter_date`, newest first.
    pub applied_on: Vec<RankedRecord<'a>>,
}

impl OwnerView<'_> {
    /// Number of active records on the filter date (zero when no date is picked).
    pub fn applied_on_count(&self) -> usize {
        self.applied_on.len()
    }

    /// Detach the view from the borrowed collection.
    pub fn to_report(&self) -> OwnerReport {
        let entries = |ranked: &[RankedRecord<'_>]| -> Vec<ReportEntry> {
            ranked
                .iter()
                .map(|entry| ReportEntry {
                    record: entry.record.clone(),
                    instant: entry.instant,
                })
                .collect()
        };
        OwnerReport {
            owner: self.owner.clone(),
            census: self.census.clone(),
            applied: entries(&self.applied),
            filter_date: self.filter_date,
            applied_on: entries(&self.applied_on),
        }
    }
}

/// Owned record plus canonical instant, used by detached reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportEntry {
    /// Copy of the source record.
    pub record: JobRecord,
    /// Normalized `updated_at`/`date_added`.
    pub instant: CanonicalInstant,
}

/// Owned counterpart of [`OwnerView`], safe to cache across snapshots.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OwnerReport {
    /// Owner the report was built for.
    pub owner: OwnerId,
    /// Status counts over the whole partition.
    pub census: StatusCensus,
    /// Active records, newest first.
    pub applied: Vec<ReportEntry>,
    /// Date the day subset was filtered on.
    pub filter_date: Option<NaiveDate>,
    /// Active records falling on `filter_date`, newest first.
    pub applied_on: Vec<ReportEntry>,
}

impl OwnerReport {
    /// Number of active records on the filter date (zero when no date is picked).
    pub fn applied_on_count(&self) -> usize {
        self.applied_on.len()
    }
}

/// Build the census, sorted active set, and day subset for `owner`.
pub fn build_owner_view<'a>(
    records: &'a [JobRecord],
    owner: &str,
    filter_date: Option<NaiveDate>,
    config: &MonitorConfig,
) -> OwnerView<'a> {
    build_partition_view(owner, owner_partition(records, owner), filter_date, config)
}

/// Same as [`build_owner_view`] for a partition the caller already resolved.
pub fn build_partition_view<'a>(
    owner: &str,
    partition: Vec<&'a JobRecord>,
    filter_date: Option<NaiveDate>,
    config: &MonitorConfig,
) -> OwnerView<'a> {
    let census = status_census(partition.iter().copied());
    let applied = sorted_active_set(partition, config);
    let applied_on = match filter_date {
        Some(date) => day_bounded_subset(&applied, date, config.zone),
        None => Vec::new(),
    };
    OwnerView {
        owner: owner.to_string(),
        census,
        applied,
        filter_date,
        applied_on,
    }
}
