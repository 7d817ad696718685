//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when an amount is unparseable or not positive.
//! - [`InvalidCategory`] returned when a category is outside the configured set.
//! - [`NoData`] returned when a report is requested for a user without entries.
//! - [`StoreUnavailable`] returned when the ledger store fails.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`NoData`]: EngineError::NoData
//!  [`StoreUnavailable`]: EngineError::StoreUnavailable
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("No data recorded yet")]
    NoData,
    #[error("Ledger store unavailable")]
    StoreUnavailable,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// Backend detail stops here: it is logged and the caller only sees an opaque
// failure.
impl From<DbErr> for EngineError {
    fn from(err: DbErr) -> Self {
        tracing::error!("ledger store failure: {err}");
        Self::StoreUnavailable
    }
}
