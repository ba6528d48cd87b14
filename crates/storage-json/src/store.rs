//! Snapshot loading and in-memory indexes.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use ledgerfolio_core::assets::Asset;
use ledgerfolio_core::transactions::Transaction;
use ledgerfolio_core::wallets::{Wallet, WalletMovement};

use crate::errors::StorageError;

/// On-disk document: every record the engine reads, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub wallets: Vec<Wallet>,
    pub movements: Vec<WalletMovement>,
    pub assets: Vec<Asset>,
    pub transactions: Vec<Transaction>,
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), StorageError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StorageError::Integrity(format!("duplicate {} id '{}'", kind, id)));
        }
    }
    Ok(())
}

impl Snapshot {
    /// Checks id uniqueness and that every reference resolves.
    pub fn validate(&self) -> Result<(), StorageError> {
        ensure_unique("wallet", self.wallets.iter().map(|w| w.id.as_str()))?;
        ensure_unique("movement", self.movements.iter().map(|m| m.id.as_str()))?;
        ensure_unique("asset", self.assets.iter().map(|a| a.id.as_str()))?;
        ensure_unique("transaction", self.transactions.iter().map(|t| t.id.as_str()))?;

        let wallet_ids: HashSet<&str> = self.wallets.iter().map(|w| w.id.as_str()).collect();
        let asset_ids: HashSet<&str> = self.assets.iter().map(|a| a.id.as_str()).collect();

        if let Some(movement) = self
            .movements
            .iter()
            .find(|m| !wallet_ids.contains(m.wallet_id.as_str()))
        {
            return Err(StorageError::Integrity(format!(
                "movement '{}' references unknown wallet '{}'",
                movement.id, movement.wallet_id
            )));
        }
        if let Some(asset) = self
            .assets
            .iter()
            .find(|a| !wallet_ids.contains(a.wallet_id.as_str()))
        {
            return Err(StorageError::Integrity(format!(
                "asset '{}' references unknown wallet '{}'",
                asset.id, asset.wallet_id
            )));
        }
        if let Some(transaction) = self
            .transactions
            .iter()
            .find(|t| !asset_ids.contains(t.asset_id.as_str()))
        {
            return Err(StorageError::Integrity(format!(
                "transaction '{}' references unknown asset '{}'",
                transaction.id, transaction.asset_id
            )));
        }
        Ok(())
    }
}

/// Read-only, indexed view over a validated [`Snapshot`].
#[derive(Debug, Default)]
pub struct JsonStore {
    wallets: Vec<Wallet>,
    assets: Vec<Asset>,
    movements_by_wallet: HashMap<String, Vec<WalletMovement>>,
    assets_by_wallet: HashMap<String, Vec<usize>>,
    transactions_by_asset: HashMap<String, Vec<Transaction>>,
}

impl JsonStore {
    /// Reads and indexes the snapshot at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        info!("Loading snapshot from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, StorageError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StorageError> {
        snapshot.validate()?;
        debug!(
            "Indexing snapshot: {} wallet(s), {} movement(s), {} asset(s), {} transaction(s)",
            snapshot.wallets.len(),
            snapshot.movements.len(),
            snapshot.assets.len(),
            snapshot.transactions.len()
        );

        let mut movements_by_wallet: HashMap<String, Vec<WalletMovement>> = HashMap::new();
        for movement in snapshot.movements {
            movements_by_wallet
                .entry(movement.wallet_id.clone())
                .or_default()
                .push(movement);
        }
        for movements in movements_by_wallet.values_mut() {
            movements.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        }

        let mut assets_by_wallet: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, asset) in snapshot.assets.iter().enumerate() {
            assets_by_wallet
                .entry(asset.wallet_id.clone())
                .or_default()
                .push(position);
        }

        let mut transactions_by_asset: HashMap<String, Vec<Transaction>> = HashMap::new();
        for transaction in snapshot.transactions {
            transactions_by_asset
                .entry(transaction.asset_id.clone())
                .or_default()
                .push(transaction);
        }
        for transactions in transactions_by_asset.values_mut() {
            transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        }

        Ok(Self {
            wallets: snapshot.wallets,
            assets: snapshot.assets,
            movements_by_wallet,
            assets_by_wallet,
            transactions_by_asset,
        })
    }

    pub fn wallet(&self, wallet_id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == wallet_id)
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    pub fn assets_of(&self, wallet_id: &str) -> Vec<Asset> {
        self.assets_by_wallet
            .get(wallet_id)
            .map(|positions| positions.iter().map(|&i| self.assets[i].clone()).collect())
            .unwrap_or_default()
    }

    pub fn movements_of(&self, wallet_id: &str) -> Vec<WalletMovement> {
        self.movements_by_wallet
            .get(wallet_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn transactions_of(&self, asset_id: &str) -> Vec<Transaction> {
        self.transactions_by_asset
            .get(asset_id)
            .cloned()
            .unwrap_or_default()
    }
}
