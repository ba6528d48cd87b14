//! JSON snapshot storage implementation for Ledgerfolio.
//!
//! Loads a single JSON document holding wallets, movements, assets and
//! transactions, validates its references and serves it through the
//! repository traits defined in `ledgerfolio-core`. The store is read-only.

pub mod errors;
pub mod repositories;
pub mod store;

pub use errors::StorageError;
pub use repositories::{AssetRepository, TransactionRepository, WalletRepository};
pub use store::{JsonStore, Snapshot};

// Re-export from ledgerfolio-core for convenience
pub use ledgerfolio_core::errors::{Error, Result};
