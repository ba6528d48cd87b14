use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::assets::AssetClass;
use crate::errors::{Result, ValidationError};

/// Snapshot of one asset's performance.
///
/// `net_amount = gross_amount + costs + taxes` always holds; costs and taxes
/// are stored non-positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    /// Capital committed through purchases.
    pub input_amount: Decimal,
    /// Realized value before costs, plus the live delta when applied.
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub costs: Decimal,
    pub taxes: Decimal,
    /// Shares still held after the last transaction.
    pub shares: Decimal,
    pub average_price: Decimal,
    /// Total cost value of the shares still held.
    pub cost_basis: Decimal,
    /// Realized profit from sells, valued outgoing transfers and dividends.
    pub done_profit: Decimal,
    /// Unrealized profit from marking the open position to a live quote.
    pub current_profit: Decimal,
    pub start_date: Option<DateTime<Utc>>,
    pub latest_date: Option<DateTime<Utc>>,
    pub is_done: bool,
    pub days_running: i64,
}

impl PerformanceResult {
    pub fn empty(is_done: bool) -> Self {
        Self {
            is_done,
            ..Default::default()
        }
    }

    /// Gross result of the position: proceeds plus remaining cost, minus capital.
    pub fn gross_profit(&self) -> Decimal {
        self.gross_amount + self.cost_basis - self.input_amount
    }

    /// Net result of the position after costs and taxes.
    pub fn net_profit(&self) -> Decimal {
        self.net_amount + self.cost_basis - self.input_amount
    }

    /// Same result with every monetary field multiplied by an exchange rate.
    pub fn scaled(&self, rate: Decimal) -> Self {
        Self {
            input_amount: self.input_amount * rate,
            gross_amount: self.gross_amount * rate,
            net_amount: self.net_amount * rate,
            costs: self.costs * rate,
            taxes: self.taxes * rate,
            average_price: self.average_price * rate,
            cost_basis: self.cost_basis * rate,
            done_profit: self.done_profit * rate,
            current_profit: self.current_profit * rate,
            ..self.clone()
        }
    }
}

/// A transaction the reducer could not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceWarning {
    pub transaction_id: String,
    pub asset_id: String,
    pub date: DateTime<Utc>,
    pub message: String,
}

impl std::fmt::Display for PerformanceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transaction {} (asset: {}, date: {}): {}",
            self.transaction_id,
            self.asset_id,
            self.date.format("%Y-%m-%d"),
            self.message
        )
    }
}

/// Result of the reducer containing the performance and any skipped records.
/// The result is always produced; warnings tell which transactions were ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceCalculation {
    pub result: PerformanceResult,
    pub warnings: Vec<PerformanceWarning>,
}

impl PerformanceCalculation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A performance result together with the identity of the asset it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub asset_id: String,
    pub asset_name: String,
    pub wallet_id: String,
    pub asset_class: AssetClass,
    pub result: PerformanceResult,
}

/// Picks what to calculate: a single asset, or every asset of a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSelector {
    pub wallet_id: Option<String>,
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceSortField {
    #[default]
    Name,
    StartDate,
    LatestDate,
    InputAmount,
    NetAmount,
    NetProfit,
    DaysRunning,
}

impl std::str::FromStr for PerformanceSortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(PerformanceSortField::Name),
            "startDate" => Ok(PerformanceSortField::StartDate),
            "latestDate" => Ok(PerformanceSortField::LatestDate),
            "inputAmount" => Ok(PerformanceSortField::InputAmount),
            "netAmount" => Ok(PerformanceSortField::NetAmount),
            "netProfit" => Ok(PerformanceSortField::NetProfit),
            "daysRunning" => Ok(PerformanceSortField::DaysRunning),
            other => Err(ValidationError::invalid_parameter(
                "sortBy",
                format!("unknown sort field '{}'", other),
            )),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ValidationError::invalid_parameter(
                "sortOrder",
                format!("expected 'asc' or 'desc', got '{}'", other),
            )),
        }
    }
}

/// Page request for listing endpoints. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    #[serde(default)]
    pub sort_by: PerformanceSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            sort_by: PerformanceSortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(ValidationError::invalid_parameter("page", "pages start at 1").into());
        }
        if self.limit == 0 {
            return Err(ValidationError::invalid_parameter("limit", "must be at least 1").into());
        }
        Ok(())
    }

    fn compare(&self, a: &AssetPerformance, b: &AssetPerformance) -> Ordering {
        let ordering = match self.sort_by {
            PerformanceSortField::Name => a.asset_name.cmp(&b.asset_name),
            PerformanceSortField::StartDate => a.result.start_date.cmp(&b.result.start_date),
            PerformanceSortField::LatestDate => a.result.latest_date.cmp(&b.result.latest_date),
            PerformanceSortField::InputAmount => a.result.input_amount.cmp(&b.result.input_amount),
            PerformanceSortField::NetAmount => a.result.net_amount.cmp(&b.result.net_amount),
            PerformanceSortField::NetProfit => a.result.net_profit().cmp(&b.result.net_profit()),
            PerformanceSortField::DaysRunning => a.result.days_running.cmp(&b.result.days_running),
        };
        let ordering = match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.asset_id.cmp(&b.asset_id))
    }

    /// Sorts `items` and cuts out the requested page.
    pub fn apply(&self, mut items: Vec<AssetPerformance>) -> Result<Page<AssetPerformance>> {
        self.validate()?;
        items.sort_by(|a, b| self.compare(a, b));
        let total = items.len();
        let offset = (self.page - 1).saturating_mul(self.limit);
        let page_items = items.into_iter().skip(offset).take(self.limit).collect();
        Ok(Page {
            items: page_items,
            total,
            page: self.page,
            limit: self.limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}
