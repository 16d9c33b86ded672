//! Entity definitions for the royalty domain
//!
//! Typed replacements for the loosely-shaped records the surrounding system
//! passes around. Validation happens at the ingest/contract boundaries
//! (see `ingest` and `contracts`); once constructed, these values are
//! trusted by the aggregation layers.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Monetary amount in the operator's single working currency.
///
/// Full precision throughout the core; rounding to 2 decimal places happens
/// only at presentation time via [`round2`], so repeated aggregation does not
/// accumulate rounding error.
pub type Money = f64;

/// Round a monetary amount to 2 decimal places for display.
pub fn round2(amount: Money) -> Money {
    (amount * 100.0).round() / 100.0
}

/// Canonical names for the distribution platforms the dashboard groups by.
/// Keyed by lowercased alias.
static KNOWN_PLATFORMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("spotify", "Spotify");
    m.insert("apple music", "Apple Music");
    m.insert("applemusic", "Apple Music");
    m.insert("itunes", "Apple Music");
    m.insert("youtube", "YouTube");
    m.insert("youtube music", "YouTube");
    m.insert("amazon", "Amazon Music");
    m.insert("amazon music", "Amazon Music");
    m.insert("deezer", "Deezer");
    m.insert("tidal", "Tidal");
    m
});

/// Name of the bucket that collects records with no usable platform name.
pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// A distribution platform name, normalized for grouping.
///
/// Known platforms are folded onto their canonical spelling; unrecognized
/// names are accepted as-is so new platforms show up without a code change.
/// Blank input lands in the [`UNKNOWN_PLATFORM`] bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Platform(UNKNOWN_PLATFORM.to_string());
        }
        match KNOWN_PLATFORMS.get(trimmed.to_lowercase().as_str()) {
            Some(canonical) => Platform((*canonical).to_string()),
            None => Platform(trimmed.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PLATFORM
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO-3166-style alpha-2 territory code.
///
/// Parsing is deliberately shallow: two ASCII letters, uppercased. Records
/// whose territory fails to parse keep `None` and are excluded from the
/// territory breakdown while still counting toward totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Territory(String);

impl Territory {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Territory(trimmed.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reporting month. Orders chronologically (year, then month).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    /// Parse a `"YYYY-MM"` identifier as produced by royalty statements.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        Period::new(year, month)
    }

    /// Human-readable label, e.g. `"January 2024"`.
    ///
    /// Fields are public and the type deserializes, so a month outside 1-12
    /// can exist without going through [`Period::new`]; such values fall
    /// back to the numeric `"YYYY-MM"` form instead of panicking.
    pub fn label(&self) -> String {
        match self
            .month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
        {
            Some(name) => format!("{} {}", name, self.year),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One imported line of royalty data: a track on a platform in a territory
/// for one reporting month. Immutable once created; the ledger is replaced
/// or appended to on import, never edited row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub track_id: Uuid,
    pub artist_id: Uuid,
    pub platform: Platform,
    pub territory: Option<Territory>,
    pub period: Period,
    pub streams: u64,
    pub revenue: Money,
}

/// The kinds of agreement the operator signs with an artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Distribution,
    Editorial,
    Management,
    Label,
    Live,
    /// Flat-fee agreement ("Trabajo"): the operator charges `fixed_amount`
    /// instead of taking a percentage split.
    FixedFee,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Distribution,
        ServiceType::Editorial,
        ServiceType::Management,
        ServiceType::Label,
        ServiceType::Live,
        ServiceType::FixedFee,
    ];
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceType::Distribution => "Distribution",
            ServiceType::Editorial => "Editorial",
            ServiceType::Management => "Management",
            ServiceType::Label => "Label",
            ServiceType::Live => "Live/Touring",
            ServiceType::FixedFee => "Fixed fee (Trabajo)",
        };
        f.write_str(name)
    }
}

/// An agreement between the operator and one artist.
///
/// `percentage` is the artist's share (0-100) and is meaningless when
/// `service_type` is [`ServiceType::FixedFee`]; `fixed_amount` is only used
/// for fixed-fee contracts. Validity window is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub service_type: ServiceType,
    pub percentage: u8,
    pub fixed_amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Contract {
    /// A contract is expired once current time passes its end date.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        as_of > self.end_date
    }

    /// Days from `as_of` to the end date. Negative once expired.
    pub fn days_until_expiry(&self, as_of: NaiveDate) -> i64 {
        (self.end_date - as_of).num_days()
    }

    /// Still valid but within `window_days` of its end date.
    pub fn is_expiring_soon(&self, as_of: NaiveDate, window_days: i64) -> bool {
        let days = self.days_until_expiry(as_of);
        days > 0 && days <= window_days
    }
}

/// Aggregate artist identity as the external catalog layer hands it over.
///
/// `total_revenue` and `total_streams` are denormalized from the revenue
/// records by that layer; the core consumes them read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub total_revenue: Money,
    pub total_streams: u64,
}
