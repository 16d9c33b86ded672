//! Payout balance for the artist payment-request workflow
//!
//! The workflow itself (submission, review, status changes) lives in the
//! external back office; the core only answers how much an artist can still
//! request: total revenue minus everything already paid out.

use crate::model::{Artist, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// An artist's request to be paid out part of their balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub amount: Money,
    pub iban: String,
    pub status: PaymentStatus,
    pub requested_on: NaiveDate,
}

/// `total_revenue - sum(completed payment amounts)` for one artist.
///
/// Pending requests do not reduce the balance until completed. Requests for
/// other artists are ignored, so the whole request list can be passed as-is.
/// No clamping: the external workflow is the place to refuse overdrawn
/// requests, and a negative balance makes an admitted overdraft visible.
pub fn available_balance(artist: &Artist, requests: &[PaymentRequest]) -> Money {
    let paid_out: Money = requests
        .iter()
        .filter(|r| r.artist_id == artist.id && r.status == PaymentStatus::Completed)
        .map(|r| r.amount.max(0.0))
        .sum();
    artist.total_revenue - paid_out
}
