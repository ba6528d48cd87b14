use async_trait::async_trait;

use super::assets_model::Asset;
use crate::errors::Result;

/// Trait defining the contract for Asset repository operations.
///
/// Implemented by the data-access layer. The engine never writes assets.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    /// Retrieves an asset by its ID. Fails with `Error::NotFound` if absent.
    async fn get_by_id(&self, asset_id: &str) -> Result<Asset>;

    /// Lists every asset owned by a wallet.
    async fn list_by_wallet(&self, wallet_id: &str) -> Result<Vec<Asset>>;
}
