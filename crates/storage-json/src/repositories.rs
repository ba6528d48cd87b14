//! Repository trait implementations over a shared [`JsonStore`].

use async_trait::async_trait;
use std::sync::Arc;

use ledgerfolio_core::assets::{Asset, AssetRepositoryTrait};
use ledgerfolio_core::errors::{Error, Result};
use ledgerfolio_core::transactions::{Transaction, TransactionRepositoryTrait};
use ledgerfolio_core::wallets::{Wallet, WalletMovement, WalletRepositoryTrait};

use crate::store::JsonStore;

pub struct AssetRepository {
    store: Arc<JsonStore>,
}

impl AssetRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    async fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
        self.store
            .asset(asset_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))
    }

    async fn list_by_wallet(&self, wallet_id: &str) -> Result<Vec<Asset>> {
        Ok(self.store.assets_of(wallet_id))
    }
}

pub struct TransactionRepository {
    store: Arc<JsonStore>,
}

impl TransactionRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn list_by_asset(&self, asset_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.store.transactions_of(asset_id))
    }
}

pub struct WalletRepository {
    store: Arc<JsonStore>,
}

impl WalletRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn get_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>> {
        wallet_ids
            .iter()
            .map(|id| {
                self.store
                    .wallet(id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("Wallet {}", id)))
            })
            .collect()
    }

    async fn get_most_recently_updated(&self) -> Result<Option<Wallet>> {
        Ok(self
            .store
            .wallets()
            .iter()
            .max_by(|a, b| a.updated_at.cmp(&b.updated_at).then_with(|| b.id.cmp(&a.id)))
            .cloned())
    }

    async fn list_movements(&self, wallet_id: &str) -> Result<Vec<WalletMovement>> {
        Ok(self.store.movements_of(wallet_id))
    }
}
