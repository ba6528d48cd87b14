//! Ledgerfolio Core - asset performance and portfolio indicator engine.
//!
//! This crate holds the domain model, the per-asset performance reducer, the
//! bounded batch runner and the aggregation services. It is storage-agnostic:
//! data access goes through the repository traits, implemented by the
//! `storage-json` crate or any other backend.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod portfolio;
pub mod quotes;
pub mod settings;
pub mod transactions;
pub mod utils;
pub mod wallets;

// Re-export common types from asset and portfolio modules
pub use assets::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
