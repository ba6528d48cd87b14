//! In-memory collaborators shared by the portfolio service tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::assets::{Asset, AssetDetails, AssetRepositoryTrait, BondDetails, EquityDetails};
use crate::errors::{Error, Result};
use crate::quotes::LiveQuoteProviderTrait;
use crate::transactions::{Transaction, TransactionKind, TransactionRepositoryTrait};
use crate::wallets::{MovementType, Wallet, WalletMovement, WalletRepositoryTrait};

// ============================================================================
// Builders
// ============================================================================

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

pub fn wallet(id: &str, currency: &str, updated: (i32, u32, u32)) -> Wallet {
    Wallet {
        id: id.to_string(),
        name: format!("Wallet {}", id),
        currency: currency.to_string(),
        updated_at: NaiveDate::from_ymd_opt(updated.0, updated.1, updated.2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

pub fn equity(id: &str, wallet_id: &str, is_done: bool) -> Asset {
    Asset {
        id: id.to_string(),
        name: format!("Equity {}", id),
        wallet_id: wallet_id.to_string(),
        is_done,
        details: AssetDetails::Equity(EquityDetails {
            ticker: Some(id.to_uppercase()),
        }),
        updated_at: None,
    }
}

pub fn private_bond(id: &str, wallet_id: &str, is_done: bool) -> Asset {
    Asset {
        id: id.to_string(),
        name: format!("Bond {}", id),
        wallet_id: wallet_id.to_string(),
        is_done,
        details: AssetDetails::PrivateBond(BondDetails::default()),
        updated_at: None,
    }
}

pub fn public_bond(id: &str, wallet_id: &str, is_done: bool) -> Asset {
    Asset {
        details: AssetDetails::PublicBond(BondDetails::default()),
        name: format!("Treasury {}", id),
        ..private_bond(id, wallet_id, is_done)
    }
}

pub fn buy(id: &str, asset_id: &str, date: DateTime<Utc>, shares: Decimal, price: Decimal) -> Transaction {
    Transaction {
        id: id.to_string(),
        asset_id: asset_id.to_string(),
        date,
        kind: TransactionKind::Buy {
            shares: Some(shares),
            price: Some(price),
        },
        costs: Decimal::ZERO,
        taxes: Decimal::ZERO,
    }
}

pub fn sell(id: &str, asset_id: &str, date: DateTime<Utc>, shares: Decimal, price: Decimal) -> Transaction {
    Transaction {
        kind: TransactionKind::Sell {
            shares: Some(shares),
            price: Some(price),
        },
        ..buy(id, asset_id, date, shares, price)
    }
}

pub fn movement(
    id: &str,
    wallet_id: &str,
    movement_type: MovementType,
    date: DateTime<Utc>,
    result: Decimal,
) -> WalletMovement {
    WalletMovement {
        id: id.to_string(),
        wallet_id: wallet_id.to_string(),
        movement_type,
        date,
        result,
    }
}

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
pub struct MockAssetRepository {
    assets: Vec<Asset>,
}

impl MockAssetRepository {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl AssetRepositoryTrait for MockAssetRepository {
    async fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
        self.assets
            .iter()
            .find(|a| a.id == asset_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))
    }

    async fn list_by_wallet(&self, wallet_id: &str) -> Result<Vec<Asset>> {
        Ok(self
            .assets
            .iter()
            .filter(|a| a.wallet_id == wallet_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockTransactionRepository {
    by_asset: HashMap<String, Vec<Transaction>>,
    failing_asset: Option<String>,
}

impl MockTransactionRepository {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let mut by_asset: HashMap<String, Vec<Transaction>> = HashMap::new();
        for transaction in transactions {
            by_asset
                .entry(transaction.asset_id.clone())
                .or_default()
                .push(transaction);
        }
        Self {
            by_asset,
            failing_asset: None,
        }
    }

    /// Makes every lookup for `asset_id` fail with a repository error.
    pub fn failing_for(mut self, asset_id: &str) -> Self {
        self.failing_asset = Some(asset_id.to_string());
        self
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    async fn list_by_asset(&self, asset_id: &str) -> Result<Vec<Transaction>> {
        if self.failing_asset.as_deref() == Some(asset_id) {
            return Err(Error::Repository(format!(
                "connection lost while reading {}",
                asset_id
            )));
        }
        Ok(self.by_asset.get(asset_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockWalletRepository {
    wallets: Vec<Wallet>,
    movements: Vec<WalletMovement>,
}

impl MockWalletRepository {
    pub fn new(wallets: Vec<Wallet>, movements: Vec<WalletMovement>) -> Self {
        Self { wallets, movements }
    }
}

#[async_trait]
impl WalletRepositoryTrait for MockWalletRepository {
    async fn get_by_ids(&self, wallet_ids: &[String]) -> Result<Vec<Wallet>> {
        wallet_ids
            .iter()
            .map(|id| {
                self.wallets
                    .iter()
                    .find(|w| &w.id == id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("Wallet {}", id)))
            })
            .collect()
    }

    async fn get_most_recently_updated(&self) -> Result<Option<Wallet>> {
        Ok(self.wallets.iter().max_by_key(|w| w.updated_at).cloned())
    }

    async fn list_movements(&self, wallet_id: &str) -> Result<Vec<WalletMovement>> {
        Ok(self
            .movements
            .iter()
            .filter(|m| m.wallet_id == wallet_id)
            .cloned()
            .collect())
    }
}

/// Quote provider returning fixed prices and counting lookups.
#[derive(Default)]
pub struct MockQuoteProvider {
    quotes: HashMap<String, Decimal>,
    calls: AtomicUsize,
}

impl MockQuoteProvider {
    pub fn new(quotes: &[(&str, Decimal)]) -> Self {
        Self {
            quotes: quotes
                .iter()
                .map(|(id, price)| (id.to_string(), *price))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiveQuoteProviderTrait for MockQuoteProvider {
    async fn get_live_quote(&self, asset: &Asset) -> Result<Option<Decimal>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.quotes.get(&asset.id).copied())
    }
}
