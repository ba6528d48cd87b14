//! Core error types for the Ledgerfolio engine.
//!
//! These types are storage-agnostic. Data-access layers convert their own
//! failures into `Error::Repository` / `Error::NotFound` before handing them back.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Only caller-contract violations and infrastructure failures are surfaced
/// through this type. Malformed transactions are reported as
/// `PerformanceWarning`s instead and never abort a calculation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Failed to convert between currencies: {0}")]
    CurrencyConversion(String),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),
}

/// Problems with a single transaction encountered by the performance reducer.
///
/// The reducer converts these into warnings and moves on to the next record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Transaction {transaction_id} is missing required field '{field}'")]
    MissingField {
        transaction_id: String,
        field: &'static str,
    },

    #[error("Transaction {transaction_id} has an invalid factor {factor}")]
    InvalidFactor {
        transaction_id: String,
        factor: rust_decimal::Decimal,
    },

    #[error("Transaction {transaction_id} of type {kind} is not supported for {asset_class} assets")]
    UnsupportedTransaction {
        transaction_id: String,
        kind: String,
        asset_class: String,
    },

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for caller input and parameter parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Either a wallet id or an asset id must be supplied")]
    MissingSelector,

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl ValidationError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
