//! Transactions module - the dated events an asset's performance is reduced from.

mod transactions_constants;
mod transactions_model;
mod transactions_traits;


pub use transactions_constants::*;
pub use transactions_model::{Transaction, TransactionKind, TradeLeg};
pub use transactions_traits::TransactionRepositoryTrait;
