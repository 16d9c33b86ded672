//! Boundary validation for imported revenue rows
//!
//! CSV parsing and file upload stay with the external importer; this module
//! is the typed gate its rows pass through before entering the ledger. One
//! bad row never fails the batch: rejected rows are quarantined with a
//! reason and a warning, accepted rows come out as trusted
//! [`RevenueRecord`]s.

use crate::model::{Period, Platform, RevenueRecord, Territory};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// A revenue row as the importer hands it over: every field optional,
/// every string free-form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRevenueRow {
    pub track_id: Option<String>,
    pub artist_id: Option<String>,
    pub platform: Option<String>,
    pub territory: Option<String>,
    pub period: Option<String>,
    pub streams: Option<i64>,
    pub revenue: Option<f64>,
}

/// Why a row was quarantined instead of entering the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRejection {
    #[error("missing or unparseable track id")]
    BadTrackId,
    #[error("missing or unparseable artist id")]
    BadArtistId,
    #[error("missing or unparseable period")]
    BadPeriod,
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub quarantined: usize,
    /// Zero-based row index and reason, per quarantined row.
    pub rejections: Vec<(usize, RowRejection)>,
}

/// Validate one raw row.
///
/// Missing or negative streams/revenue coerce to zero (sparse statements
/// are normal); an unusable territory degrades to `None`; an unusable id or
/// period rejects the row, since a record that cannot be attributed or
/// placed in time is worthless to every aggregate.
pub fn validate_row(raw: &RawRevenueRow) -> Result<RevenueRecord, RowRejection> {
    let track_id = parse_uuid(raw.track_id.as_deref()).ok_or(RowRejection::BadTrackId)?;
    let artist_id = parse_uuid(raw.artist_id.as_deref()).ok_or(RowRejection::BadArtistId)?;
    let period = raw
        .period
        .as_deref()
        .and_then(Period::parse)
        .ok_or(RowRejection::BadPeriod)?;

    let revenue = raw.revenue.unwrap_or(0.0);
    Ok(RevenueRecord {
        track_id,
        artist_id,
        platform: Platform::normalize(raw.platform.as_deref().unwrap_or("")),
        territory: raw.territory.as_deref().and_then(Territory::parse),
        period,
        streams: raw.streams.unwrap_or(0).max(0) as u64,
        revenue: if revenue.is_finite() { revenue.max(0.0) } else { 0.0 },
    })
}

/// Validate a whole batch, quarantining bad rows instead of failing.
pub fn ingest(rows: &[RawRevenueRow]) -> (Vec<RevenueRecord>, IngestReport) {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = IngestReport::default();

    for (index, raw) in rows.iter().enumerate() {
        match validate_row(raw) {
            Ok(record) => {
                records.push(record);
                report.accepted += 1;
            }
            Err(reason) => {
                warn!(row = index, %reason, "quarantined revenue row");
                report.quarantined += 1;
                report.rejections.push((index, reason));
            }
        }
    }
    (records, report)
}

fn parse_uuid(raw: Option<&str>) -> Option<Uuid> {
    Uuid::parse_str(raw?.trim()).ok()
}
