use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::AssetClass;

/// Series a chart point carries a cumulative amount for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartCategory {
    Movements,
    PrivateBond,
    PublicBond,
    Equity,
    Total,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 5] = [
        ChartCategory::Movements,
        ChartCategory::PrivateBond,
        ChartCategory::PublicBond,
        ChartCategory::Equity,
        ChartCategory::Total,
    ];
}

impl From<AssetClass> for ChartCategory {
    fn from(asset_class: AssetClass) -> Self {
        match asset_class {
            AssetClass::PrivateBond => ChartCategory::PrivateBond,
            AssetClass::PublicBond => ChartCategory::PublicBond,
            AssetClass::Equity => ChartCategory::Equity,
        }
    }
}

/// Cumulative amounts per category as of the end of `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub date: NaiveDate,
    pub amounts: BTreeMap<ChartCategory, Decimal>,
}

impl ChartDataPoint {
    pub fn amount(&self, category: ChartCategory) -> Decimal {
        self.amounts.get(&category).copied().unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletChart {
    pub wallet_id: String,
    pub currency: String,
    pub points: Vec<ChartDataPoint>,
}
