//! ContractBook: storage and validation for artist contracts
//!
//! Contracts enter the book through [`ContractBook::upsert`], which is the
//! single validation point: percentages are clamped into 0-100, inverted
//! validity windows are rejected, and (by default) a second contract of the
//! same service type with an overlapping window is rejected for one artist.
//! Downstream consumers (the split calculator, the dashboard) assume these
//! invariants already hold and do not re-validate.

use crate::config::CoreConfig;
use crate::model::{Contract, Money, ServiceType};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

/// A contract as the operator-facing form submits it, before validation.
///
/// `percentage` is a wide integer on purpose: out-of-range form input is
/// clamped here rather than trusted into the typed [`Contract`].
#[derive(Debug, Clone, Deserialize)]
pub struct ContractDraft {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub service_type: ServiceType,
    pub percentage: i64,
    pub fixed_amount: Option<Money>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Owned store of contracts.
///
/// Contracts are created and edited, never hard-deleted; `upsert` replaces
/// an existing contract by id.
#[derive(Debug, Clone)]
pub struct ContractBook {
    contracts: Vec<Contract>,
    enforce_service_type_uniqueness: bool,
}

impl Default for ContractBook {
    fn default() -> Self {
        ContractBook::new()
    }
}

impl ContractBook {
    /// A book with the default validation rules (uniqueness enforced).
    pub fn new() -> Self {
        ContractBook {
            contracts: Vec::new(),
            enforce_service_type_uniqueness: true,
        }
    }

    pub fn with_config(config: &CoreConfig) -> Self {
        ContractBook {
            contracts: Vec::new(),
            enforce_service_type_uniqueness: config.enforce_service_type_uniqueness,
        }
    }

    /// Validate a draft and insert it, replacing any existing contract with
    /// the same id. Returns the id of the stored contract.
    pub fn upsert(&mut self, draft: ContractDraft) -> Result<Uuid> {
        if draft.end_date < draft.start_date {
            return Err(Error::InvalidDates {
                start: draft.start_date,
                end: draft.end_date,
            });
        }

        let percentage = draft.percentage.clamp(0, 100) as u8;
        if i64::from(percentage) != draft.percentage {
            warn!(
                contract_id = %draft.id,
                "percentage {} out of range, clamped to {}",
                draft.percentage,
                percentage
            );
        }

        let mut fixed_amount = draft.fixed_amount.unwrap_or(0.0);
        if !fixed_amount.is_finite() || fixed_amount < 0.0 {
            warn!(
                contract_id = %draft.id,
                "fixed amount {} is not a usable charge, resetting to 0",
                fixed_amount
            );
            fixed_amount = 0.0;
        }

        let conflict = self.contracts.iter().find(|existing| {
            existing.id != draft.id
                && existing.artist_id == draft.artist_id
                && existing.service_type == draft.service_type
                && windows_overlap(
                    (existing.start_date, existing.end_date),
                    (draft.start_date, draft.end_date),
                )
        });
        if let Some(existing) = conflict {
            if self.enforce_service_type_uniqueness {
                return Err(Error::DuplicateServiceType {
                    artist_id: draft.artist_id,
                    service_type: draft.service_type,
                });
            }
            warn!(
                contract_id = %draft.id,
                conflicting_id = %existing.id,
                "artist {} now holds overlapping {} contracts",
                draft.artist_id,
                draft.service_type
            );
        }

        let contract = Contract {
            id: draft.id,
            artist_id: draft.artist_id,
            service_type: draft.service_type,
            percentage,
            fixed_amount,
            start_date: draft.start_date,
            end_date: draft.end_date,
        };

        match self.contracts.iter_mut().find(|c| c.id == contract.id) {
            Some(slot) => *slot = contract,
            None => self.contracts.push(contract),
        }
        Ok(draft.id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    /// All contracts held by an artist, in insertion order.
    pub fn contracts_for_artist(&self, artist_id: Uuid) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.artist_id == artist_id)
            .collect()
    }

    /// The artist's headline contract: most recent `start_date`, ties broken
    /// by insertion order. `None` when the artist holds no contracts; the
    /// split calculator falls back to the default split in that case.
    pub fn primary_contract(&self, artist_id: Uuid) -> Option<&Contract> {
        let mut best: Option<&Contract> = None;
        for contract in self.contracts.iter().filter(|c| c.artist_id == artist_id) {
            if best.map_or(true, |b| contract.start_date > b.start_date) {
                best = Some(contract);
            }
        }
        best
    }

    /// Contracts still valid but within `window_days` of their end date.
    pub fn expiring_soon(&self, as_of: NaiveDate, window_days: i64) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.is_expiring_soon(as_of, window_days))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Inclusive-window overlap test.
fn windows_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}
