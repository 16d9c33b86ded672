//! RoyaltySplitCalculator: artist-share / operator-share computation
//!
//! Shares are returned at full precision; rounding to 2 decimal places is a
//! presentation concern (`model::round2`), so summing per-artist splits in
//! the dashboard does not accumulate rounding error.

use crate::config::CoreConfig;
use crate::model::{Artist, Contract, Money, ServiceType};
use serde::{Deserialize, Serialize};

/// Artist share applied when an artist has no contract at all: the operator
/// keeps 30%, the artist receives 70%. Load-bearing business default.
pub const DEFAULT_ARTIST_SHARE_PCT: u8 = 70;

/// What to do when a fixed fee exceeds the artist's revenue.
///
/// The back office historically let the artist share go negative (a debt
/// carried toward the artist); `ClampToZero` floors it instead. The operator
/// share keeps the full fixed amount either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeSharePolicy {
    #[default]
    Allow,
    ClampToZero,
}

/// Result of splitting one artist's aggregate revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoyaltySplit {
    pub artist_share: Money,
    pub operator_share: Money,
}

/// Computes the artist/operator split for one artist under one contract.
///
/// Stateless; safe to construct per call or share freely.
#[derive(Debug, Clone, Copy)]
pub struct RoyaltySplitCalculator {
    default_artist_share_pct: u8,
    negative_share_policy: NegativeSharePolicy,
}

impl Default for RoyaltySplitCalculator {
    fn default() -> Self {
        RoyaltySplitCalculator {
            default_artist_share_pct: DEFAULT_ARTIST_SHARE_PCT,
            negative_share_policy: NegativeSharePolicy::Allow,
        }
    }
}

impl RoyaltySplitCalculator {
    pub fn new() -> Self {
        RoyaltySplitCalculator::default()
    }

    pub fn with_config(config: &CoreConfig) -> Self {
        // Config structs can be built by hand, bypassing file-load
        // sanitization; the complement below requires pct <= 100.
        RoyaltySplitCalculator {
            default_artist_share_pct: config.default_artist_share_pct.min(100),
            negative_share_policy: config.negative_share_policy,
        }
    }

    /// Split `artist.total_revenue` under `contract`.
    ///
    /// - No contract: the default split applies.
    /// - Fixed-fee contract: the operator takes `fixed_amount` flat; the
    ///   artist keeps the remainder, which may be negative under
    ///   [`NegativeSharePolicy::Allow`].
    /// - Otherwise: exact percentage complement, so the two shares always
    ///   sum to the artist's revenue.
    ///
    /// Never fails; negative or non-finite revenue counts as zero.
    pub fn split(&self, artist: &Artist, contract: Option<&Contract>) -> RoyaltySplit {
        let revenue = if artist.total_revenue.is_finite() {
            artist.total_revenue.max(0.0)
        } else {
            0.0
        };

        match contract {
            None => self.percentage_split(revenue, self.default_artist_share_pct),
            Some(c) if c.service_type == ServiceType::FixedFee => {
                let operator_share = c.fixed_amount;
                let mut artist_share = revenue - c.fixed_amount;
                if self.negative_share_policy == NegativeSharePolicy::ClampToZero {
                    artist_share = artist_share.max(0.0);
                }
                RoyaltySplit {
                    artist_share,
                    operator_share,
                }
            }
            Some(c) => self.percentage_split(revenue, c.percentage),
        }
    }

    fn percentage_split(&self, revenue: Money, artist_pct: u8) -> RoyaltySplit {
        RoyaltySplit {
            artist_share: revenue * Money::from(artist_pct) / 100.0,
            operator_share: revenue * Money::from(100 - artist_pct) / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn artist(revenue: Money) -> Artist {
        Artist {
            id: Uuid::new_v4(),
            name: "Test Artist".to_string(),
            total_revenue: revenue,
            total_streams: 0,
        }
    }

    fn contract(artist_id: Uuid, service_type: ServiceType, pct: u8, fixed: Money) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            artist_id,
            service_type,
            percentage: pct,
            fixed_amount: fixed,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    #[test]
    fn distribution_contract_splits_by_percentage() {
        let a = artist(10_000.0);
        let c = contract(a.id, ServiceType::Distribution, 70, 0.0);
        let split = RoyaltySplitCalculator::new().split(&a, Some(&c));
        assert_eq!(split.artist_share, 7_000.0);
        assert_eq!(split.operator_share, 3_000.0);
    }

    #[test]
    fn no_contract_falls_back_to_default_seventy_thirty() {
        let a = artist(10_000.0);
        let split = RoyaltySplitCalculator::new().split(&a, None);
        assert_eq!(split.artist_share, 7_000.0);
        assert_eq!(split.operator_share, 3_000.0);
    }

    #[test]
    fn fixed_fee_takes_flat_amount() {
        let a = artist(10_000.0);
        let c = contract(a.id, ServiceType::FixedFee, 0, 1_500.0);
        let split = RoyaltySplitCalculator::new().split(&a, Some(&c));
        assert_eq!(split.artist_share, 8_500.0);
        assert_eq!(split.operator_share, 1_500.0);
    }

    #[test]
    fn fixed_fee_exceeding_revenue_goes_negative_by_default() {
        let a = artist(1_000.0);
        let c = contract(a.id, ServiceType::FixedFee, 0, 1_500.0);
        let split = RoyaltySplitCalculator::new().split(&a, Some(&c));
        assert_eq!(split.artist_share, -500.0);
        assert_eq!(split.operator_share, 1_500.0);
    }

    #[test]
    fn clamp_policy_floors_artist_share_at_zero() {
        let a = artist(1_000.0);
        let c = contract(a.id, ServiceType::FixedFee, 0, 1_500.0);
        let config = CoreConfig {
            negative_share_policy: NegativeSharePolicy::ClampToZero,
            ..CoreConfig::default()
        };
        let split = RoyaltySplitCalculator::with_config(&config).split(&a, Some(&c));
        assert_eq!(split.artist_share, 0.0);
        assert_eq!(split.operator_share, 1_500.0);
    }

    #[test]
    fn overwide_configured_default_is_clamped_not_wrapped() {
        let config = CoreConfig {
            default_artist_share_pct: 150,
            ..CoreConfig::default()
        };
        let split = RoyaltySplitCalculator::with_config(&config).split(&artist(1_000.0), None);
        assert_eq!(split.artist_share, 1_000.0);
        assert_eq!(split.operator_share, 0.0);
    }

    #[test]
    fn percentage_shares_are_exact_complements() {
        let calc = RoyaltySplitCalculator::new();
        for pct in [0u8, 1, 33, 50, 70, 99, 100] {
            let a = artist(12_345.67);
            let c = contract(a.id, ServiceType::Management, pct, 0.0);
            let split = calc.split(&a, Some(&c));
            assert!(
                (split.artist_share + split.operator_share - a.total_revenue).abs() < 1e-9,
                "shares must sum to revenue at {}%",
                pct
            );
        }
    }

    #[test]
    fn zero_and_negative_revenue_yield_zero_shares() {
        let calc = RoyaltySplitCalculator::new();
        let zero = calc.split(&artist(0.0), None);
        assert_eq!(zero.artist_share, 0.0);
        assert_eq!(zero.operator_share, 0.0);

        let negative = calc.split(&artist(-100.0), None);
        assert_eq!(negative.artist_share, 0.0);
        assert_eq!(negative.operator_share, 0.0);
    }
}
