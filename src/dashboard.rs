//! DashboardAggregator: the figures the operator dashboard renders
//!
//! Stateless composition of the ledger, the contract book, and the split
//! calculator. Every call re-derives from current store state, so a fresh
//! import or contract edit is reflected immediately with no cache to
//! invalidate.

use crate::contracts::ContractBook;
use crate::ledger::{MonthlyPoint, RevenueLedger};
use crate::model::{Artist, Money};
use crate::split::RoyaltySplitCalculator;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Organization-wide revenue and margin figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OrganizationTotals {
    pub total_revenue: Money,
    pub operator_share: Money,
    pub artist_share: Money,
}

/// One row of the top-artists card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub artist_id: Uuid,
    pub name: String,
    pub total_revenue: Money,
    pub total_streams: u64,
}

pub struct DashboardAggregator<'a> {
    ledger: &'a RevenueLedger,
    book: &'a ContractBook,
    calculator: RoyaltySplitCalculator,
}

impl<'a> DashboardAggregator<'a> {
    pub fn new(ledger: &'a RevenueLedger, book: &'a ContractBook) -> Self {
        DashboardAggregator {
            ledger,
            book,
            calculator: RoyaltySplitCalculator::new(),
        }
    }

    pub fn with_calculator(
        ledger: &'a RevenueLedger,
        book: &'a ContractBook,
        calculator: RoyaltySplitCalculator,
    ) -> Self {
        DashboardAggregator {
            ledger,
            book,
            calculator,
        }
    }

    /// Sum the per-artist splits for every artist with at least one revenue
    /// record, each under their primary contract.
    ///
    /// Splitting per artist (instead of once globally) is what weights
    /// artists on different contract percentages correctly.
    pub fn organization_totals(&self, artists: &[Artist]) -> OrganizationTotals {
        let with_records: HashSet<Uuid> = self.ledger.artist_ids().into_iter().collect();

        let mut totals = OrganizationTotals::default();
        for artist in artists.iter().filter(|a| with_records.contains(&a.id)) {
            let split = self
                .calculator
                .split(artist, self.book.primary_contract(artist.id));
            totals.total_revenue += artist.total_revenue.max(0.0);
            totals.artist_share += split.artist_share;
            totals.operator_share += split.operator_share;
        }
        totals
    }

    /// Up to `n` artists, descending by total revenue, ties kept in the
    /// caller's order. `n` is a parameter: the dashboard asks for 3, the
    /// artist roster for 5.
    pub fn top_artists(&self, artists: &[Artist], n: usize) -> Vec<ArtistSummary> {
        let mut summaries: Vec<ArtistSummary> = artists
            .iter()
            .map(|a| ArtistSummary {
                artist_id: a.id,
                name: a.name.clone(),
                total_revenue: a.total_revenue,
                total_streams: a.total_streams,
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.total_revenue
                .partial_cmp(&a.total_revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summaries.truncate(n);
        summaries
    }

    /// The last `last_n` points of the monthly series. Returns every
    /// available period when fewer exist; never pads, never errors.
    pub fn monthly_trend(&self, last_n: usize) -> Vec<MonthlyPoint> {
        let series = self.ledger.monthly_series();
        let skip = series.len().saturating_sub(last_n);
        series.into_iter().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ContractDraft;
    use crate::model::{Period, Platform, RevenueRecord, ServiceType, Territory};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn artist(name: &str, revenue: Money) -> Artist {
        Artist {
            id: Uuid::new_v4(),
            name: name.to_string(),
            total_revenue: revenue,
            total_streams: 0,
        }
    }

    fn record(artist_id: Uuid, period: &str, revenue: Money) -> RevenueRecord {
        RevenueRecord {
            track_id: Uuid::new_v4(),
            artist_id,
            platform: Platform::normalize("Spotify"),
            territory: Territory::parse("ES"),
            period: Period::parse(period).unwrap(),
            streams: 100,
            revenue,
        }
    }

    fn percentage_draft(artist_id: Uuid, service_type: ServiceType, pct: i64) -> ContractDraft {
        ContractDraft {
            id: Uuid::new_v4(),
            artist_id,
            service_type,
            percentage: pct,
            fixed_amount: None,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        }
    }

    #[test]
    fn organization_totals_split_per_artist_not_globally() {
        let a = artist("A", 10_000.0);
        let b = artist("B", 5_000.0);

        let ledger = RevenueLedger::from_records(vec![
            record(a.id, "2024-01", 10_000.0),
            record(b.id, "2024-01", 5_000.0),
        ]);
        let mut book = ContractBook::new();
        book.upsert(percentage_draft(a.id, ServiceType::Distribution, 80))
            .unwrap();
        book.upsert(percentage_draft(b.id, ServiceType::Distribution, 50))
            .unwrap();

        let totals =
            DashboardAggregator::new(&ledger, &book).organization_totals(&[a, b]);
        assert_eq!(totals.total_revenue, 15_000.0);
        // 80% of 10000 + 50% of 5000, not any single blended percentage
        assert_eq!(totals.artist_share, 10_500.0);
        assert_eq!(totals.operator_share, 4_500.0);
    }

    #[test]
    fn artists_without_revenue_records_are_excluded() {
        let with_records = artist("Active", 1_000.0);
        let without = artist("Dormant", 9_999.0);

        let ledger = RevenueLedger::from_records(vec![record(with_records.id, "2024-01", 1_000.0)]);
        let book = ContractBook::new();

        let totals = DashboardAggregator::new(&ledger, &book)
            .organization_totals(&[with_records, without]);
        assert_eq!(totals.total_revenue, 1_000.0);
    }

    #[test]
    fn totals_use_default_split_for_uncontracted_artists() {
        let a = artist("A", 2_000.0);
        let ledger = RevenueLedger::from_records(vec![record(a.id, "2024-01", 2_000.0)]);
        let book = ContractBook::new();

        let totals = DashboardAggregator::new(&ledger, &book).organization_totals(&[a]);
        assert_eq!(totals.artist_share, 1_400.0);
        assert_eq!(totals.operator_share, 600.0);
    }

    #[test]
    fn top_artists_takes_n_as_parameter() {
        let artists = vec![
            artist("Low", 100.0),
            artist("High", 900.0),
            artist("Mid", 500.0),
        ];
        let ledger = RevenueLedger::new();
        let book = ContractBook::new();
        let agg = DashboardAggregator::new(&ledger, &book);

        let top3 = agg.top_artists(&artists, 3);
        let names: Vec<&str> = top3.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);

        assert_eq!(agg.top_artists(&artists, 5).len(), 3);
        assert_eq!(agg.top_artists(&artists, 2).len(), 2);
    }

    #[test]
    fn top_artists_ties_keep_caller_order() {
        let artists = vec![artist("First", 500.0), artist("Second", 500.0)];
        let ledger = RevenueLedger::new();
        let book = ContractBook::new();
        let top = DashboardAggregator::new(&ledger, &book).top_artists(&artists, 2);
        assert_eq!(top[0].name, "First");
        assert_eq!(top[1].name, "Second");
    }

    #[test]
    fn monthly_trend_is_a_suffix_of_the_series() {
        let a = artist("A", 0.0);
        let ledger = RevenueLedger::from_records(vec![
            record(a.id, "2024-01", 1.0),
            record(a.id, "2024-02", 2.0),
            record(a.id, "2024-03", 3.0),
        ]);
        let book = ContractBook::new();
        let agg = DashboardAggregator::new(&ledger, &book);

        let trend = agg.monthly_trend(2);
        let labels: Vec<String> = trend.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-03"]);

        // Fewer periods than requested: return all, never pad
        assert_eq!(agg.monthly_trend(12).len(), 3);
    }

    #[test]
    fn empty_stores_produce_empty_dashboard() {
        let ledger = RevenueLedger::new();
        let book = ContractBook::new();
        let agg = DashboardAggregator::new(&ledger, &book);

        assert_eq!(agg.organization_totals(&[]), OrganizationTotals::default());
        assert!(agg.top_artists(&[], 3).is_empty());
        assert!(agg.monthly_trend(6).is_empty());
    }
}
