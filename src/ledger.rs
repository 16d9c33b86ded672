//! RevenueLedger: aggregate queries over the imported revenue records
//!
//! The ledger owns the flat, immutable set of records the importer produced.
//! Every query is a pure derivation over that set; an empty ledger yields
//! empty/zero results, never an error. Negative amounts count as zero in
//! every sum so that sparse CSV-derived data cannot poison totals.

use crate::model::{Money, Period, Platform, RevenueRecord, Territory};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// One point of the chronological monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub period: Period,
    pub revenue: Money,
    pub streams: u64,
}

/// Revenue and stream totals for one territory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerritoryTotals {
    pub revenue: Money,
    pub streams: u64,
}

/// Aggregate figures for one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackTotals {
    pub track_id: Uuid,
    pub revenue: Money,
    pub streams: u64,
}

/// Owned store of imported revenue records.
///
/// Matches the import lifecycle: the set is replaced wholesale or appended
/// to on each import, and individual records are never edited.
#[derive(Debug, Clone, Default)]
pub struct RevenueLedger {
    records: Vec<RevenueRecord>,
}

fn pos(amount: Money) -> Money {
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}

impl RevenueLedger {
    pub fn new() -> Self {
        RevenueLedger::default()
    }

    pub fn from_records(records: Vec<RevenueRecord>) -> Self {
        RevenueLedger { records }
    }

    /// Append a freshly imported batch to the existing set.
    pub fn append(&mut self, records: impl IntoIterator<Item = RevenueRecord>) {
        self.records.extend(records);
    }

    /// Replace the whole set with a new import.
    pub fn replace_all(&mut self, records: Vec<RevenueRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[RevenueRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of revenue over all records, including those without a usable
    /// territory or platform.
    pub fn total_revenue(&self) -> Money {
        self.records.iter().map(|r| pos(r.revenue)).sum()
    }

    pub fn total_streams(&self) -> u64 {
        self.records.iter().map(|r| r.streams).sum()
    }

    /// Revenue grouped by platform, in first-seen order.
    ///
    /// Callers wanting a top-N must go through [`top_platforms`], which
    /// sorts by revenue explicitly instead of truncating this grouping.
    ///
    /// [`top_platforms`]: RevenueLedger::top_platforms
    pub fn revenue_by_platform(&self) -> Vec<(Platform, Money)> {
        let mut index: HashMap<Platform, usize> = HashMap::new();
        let mut groups: Vec<(Platform, Money)> = Vec::new();
        for record in &self.records {
            match index.get(&record.platform) {
                Some(&i) => groups[i].1 += pos(record.revenue),
                None => {
                    index.insert(record.platform.clone(), groups.len());
                    groups.push((record.platform.clone(), pos(record.revenue)));
                }
            }
        }
        groups
    }

    /// The `n` highest-revenue platforms, descending, ties kept in
    /// first-seen order.
    pub fn top_platforms(&self, n: usize) -> Vec<(Platform, Money)> {
        let mut groups = self.revenue_by_platform();
        groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        groups.truncate(n);
        groups
    }

    /// Revenue and streams grouped by territory, in first-seen order.
    ///
    /// Records without a recognized territory code are excluded from this
    /// view entirely; they still count toward [`total_revenue`].
    ///
    /// [`total_revenue`]: RevenueLedger::total_revenue
    pub fn revenue_by_territory(&self) -> Vec<(Territory, TerritoryTotals)> {
        let mut index: HashMap<Territory, usize> = HashMap::new();
        let mut groups: Vec<(Territory, TerritoryTotals)> = Vec::new();
        for record in &self.records {
            let Some(territory) = &record.territory else {
                continue;
            };
            match index.get(territory) {
                Some(&i) => {
                    groups[i].1.revenue += pos(record.revenue);
                    groups[i].1.streams += record.streams;
                }
                None => {
                    index.insert(territory.clone(), groups.len());
                    groups.push((
                        territory.clone(),
                        TerritoryTotals {
                            revenue: pos(record.revenue),
                            streams: record.streams,
                        },
                    ));
                }
            }
        }
        groups
    }

    /// One entry per distinct period present in the data, chronological.
    /// Empty ledger yields an empty series, not an error.
    pub fn monthly_series(&self) -> Vec<MonthlyPoint> {
        let mut months: BTreeMap<Period, (Money, u64)> = BTreeMap::new();
        for record in &self.records {
            let entry = months.entry(record.period).or_insert((0.0, 0));
            entry.0 += pos(record.revenue);
            entry.1 += record.streams;
        }
        months
            .into_iter()
            .map(|(period, (revenue, streams))| MonthlyPoint {
                period,
                revenue,
                streams,
            })
            .collect()
    }

    /// Up to `n` tracks, strictly descending by revenue, ties kept in
    /// first-seen order (stable sort).
    pub fn top_tracks(&self, n: usize) -> Vec<TrackTotals> {
        let mut totals = self.totals_by_track();
        totals.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        totals.truncate(n);
        totals
    }

    /// Per-track totals in first-seen order.
    pub fn totals_by_track(&self) -> Vec<TrackTotals> {
        let mut index: HashMap<Uuid, usize> = HashMap::new();
        let mut totals: Vec<TrackTotals> = Vec::new();
        for record in &self.records {
            match index.get(&record.track_id) {
                Some(&i) => {
                    totals[i].revenue += pos(record.revenue);
                    totals[i].streams += record.streams;
                }
                None => {
                    index.insert(record.track_id, totals.len());
                    totals.push(TrackTotals {
                        track_id: record.track_id,
                        revenue: pos(record.revenue),
                        streams: record.streams,
                    });
                }
            }
        }
        totals
    }

    /// Per-artist revenue totals in first-seen order.
    pub fn totals_by_artist(&self) -> Vec<(Uuid, Money)> {
        let mut index: HashMap<Uuid, usize> = HashMap::new();
        let mut totals: Vec<(Uuid, Money)> = Vec::new();
        for record in &self.records {
            match index.get(&record.artist_id) {
                Some(&i) => totals[i].1 += pos(record.revenue),
                None => {
                    index.insert(record.artist_id, totals.len());
                    totals.push((record.artist_id, pos(record.revenue)));
                }
            }
        }
        totals
    }

    /// Artists that have at least one revenue record, in first-seen order.
    pub fn artist_ids(&self) -> Vec<Uuid> {
        self.totals_by_artist().into_iter().map(|(id, _)| id).collect()
    }
}
