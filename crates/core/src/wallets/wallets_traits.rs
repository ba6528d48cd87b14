//! Wallet repository trait.

use async_trait::async_trait;

use super::wallets_model::{Wallet, WalletMovement};
use crate::errors::Result;

/// Trait defining the contract for wallet data access.
///
/// The trait is database-agnostic - storage-specific details are handled
/// by concrete implementations.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Retrieves the wallets with the given IDs, in the order requested.
    /// Unknown IDs fail with `Error::NotFound`.
    async fn get_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>>;

    /// The wallet with the latest `updated_at`, if any wallet exists.
    async fn get_most_recently_updated(&self) -> Result<Option<Wallet>>;

    /// Deposits and withdrawals of a wallet.
    async fn list_movements(&self, wallet_id: &str) -> Result<Vec<WalletMovement>>;
}
