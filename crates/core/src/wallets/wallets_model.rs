//! Wallet domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named container of assets and cash movements, reported in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Deposit,
    Withdraw,
}

/// A deposit or withdrawal against a wallet, independent of any asset.
///
/// Withdrawals may be stored with a positive `result`; `signed_result`
/// always reports them as a negative contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMovement {
    pub id: String,
    pub wallet_id: String,
    pub movement_type: MovementType,
    pub date: DateTime<Utc>,
    pub result: Decimal,
}

impl WalletMovement {
    pub fn signed_result(&self) -> Decimal {
        match self.movement_type {
            MovementType::Deposit => self.result,
            MovementType::Withdraw => -self.result.abs(),
        }
    }
}
