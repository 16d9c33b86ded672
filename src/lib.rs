//! # Royalty Core Library
//!
//! Domain core for a royalty management back office:
//! - Revenue ledger (imported royalty records and aggregate queries)
//! - Contract book (artist contracts, validity, primary-contract selection)
//! - Royalty split calculator (artist share vs. operator share)
//! - Dashboard aggregation (organization totals, top lists, monthly trend)
//! - Import-boundary validation and payout balance
//!
//! The REST surface, persistence, authentication, CSV parsing, and all
//! rendering live in the surrounding system; this crate is the in-memory
//! logic those layers call. Stores are explicit owned values injected where
//! needed, with no global singletons.

pub mod config;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod ingest;
pub mod ledger;
pub mod model;
pub mod payments;
pub mod split;

pub use config::CoreConfig;
pub use contracts::{ContractBook, ContractDraft};
pub use dashboard::DashboardAggregator;
pub use error::{Error, Result};
pub use ledger::RevenueLedger;
pub use model::{Artist, Contract, Money, Platform, Period, RevenueRecord, ServiceType, Territory};
pub use split::{RoyaltySplit, RoyaltySplitCalculator};
