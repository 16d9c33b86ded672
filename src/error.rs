//! Error types for the royalty core
//!
//! The aggregation layers never fail: empty inputs yield empty/zero results.
//! Errors surface only at the configuration and contract-validation
//! boundaries.

use crate::model::ServiceType;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Common result type for royalty-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Contract validity window is inverted
    #[error("Invalid contract dates: end {end} precedes start {start}")]
    InvalidDates { start: NaiveDate, end: NaiveDate },

    /// Artist already holds a contract of this service type whose validity
    /// window overlaps the new one
    #[error("Artist {artist_id} already holds an overlapping {service_type} contract")]
    DuplicateServiceType {
        artist_id: Uuid,
        service_type: ServiceType,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
