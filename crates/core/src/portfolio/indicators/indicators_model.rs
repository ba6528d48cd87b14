use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::performance::AssetPerformance;
use crate::wallets::{Wallet, WalletMovement};

/// Selects the wallets, reporting currency and valuation mode of a portfolio request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsRequest {
    /// Wallets to aggregate. Empty selects the most recently updated wallet.
    #[serde(default)]
    pub wallet_ids: Vec<String>,
    /// Reporting currency. `None` uses the engine's base currency.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub apply_live_valuation: bool,
}

/// One wallet's movements and asset results, already in the reporting currency.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub wallet: Wallet,
    pub movements: Vec<WalletMovement>,
    pub performances: Vec<AssetPerformance>,
}

/// Aggregate statistics over every movement and asset of the selected wallets.
///
/// Currency fields are rounded to 2 decimals and ratios to 4 decimals.
/// Optional fields are `None` when their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioIndicators {
    pub currency: String,
    pub wallet_ids: Vec<String>,

    pub movement_count: usize,
    pub movement_sum: Decimal,
    pub movement_min: Option<Decimal>,
    pub movement_max: Option<Decimal>,

    pub asset_count: usize,
    pub active_asset_count: usize,
    pub inactive_asset_count: usize,
    pub profitable_count: usize,
    pub loss_count: usize,
    pub gross_profitable_count: usize,
    pub gross_loss_count: usize,

    pub input_amount_sum: Decimal,
    pub costs_sum: Decimal,
    pub taxes_sum: Decimal,

    pub gross_profit_sum: Decimal,
    pub gross_loss_sum: Decimal,
    pub gross_profit_max: Option<Decimal>,
    /// Most negative gross result.
    pub gross_loss_lowest: Option<Decimal>,

    pub net_profit_sum: Decimal,
    pub net_loss_sum: Decimal,
    pub net_profit_max: Option<Decimal>,
    /// Most negative net result.
    pub net_loss_lowest: Option<Decimal>,
    /// `net_profit_sum + net_loss_sum`.
    pub net_result: Decimal,
    /// `movement_sum + net_result`.
    pub balance: Decimal,

    pub avg_net_profit: Option<Decimal>,
    pub avg_net_loss: Option<Decimal>,
    /// Share of decided assets that were profitable, as a fraction.
    pub profitable_percentage: Option<Decimal>,
    pub breakeven: Option<Decimal>,
    pub edge: Option<Decimal>,

    pub expectancy_by_asset: Option<Decimal>,
    pub expectancy_by_day: Option<Decimal>,
    pub expectancy_by_month: Option<Decimal>,
    pub expectancy_by_quarter: Option<Decimal>,
    pub expectancy_by_year: Option<Decimal>,

    pub history_high: Option<Decimal>,
    pub history_low: Option<Decimal>,

    pub start_date: Option<DateTime<Utc>>,
    pub latest_date: Option<DateTime<Utc>>,
    pub duration_days: i64,
}

impl PortfolioIndicators {
    pub fn empty(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            ..Default::default()
        }
    }
}
