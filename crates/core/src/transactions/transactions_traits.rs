use async_trait::async_trait;

use super::transactions_model::Transaction;
use crate::errors::Result;

/// Trait defining the contract for transaction data access.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Every transaction of an asset. Implementations should return them in
    /// ascending date order; the reducer re-sorts by `(date, id)` regardless.
    async fn list_by_asset(&self, asset_id: &str) -> Result<Vec<Transaction>>;
}
