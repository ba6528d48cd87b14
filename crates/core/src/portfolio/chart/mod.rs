//! Per-wallet chart series of cumulative amounts by category.

mod chart_calculator;
mod chart_model;

pub use chart_calculator::build_wallet_chart;
pub use chart_model::{ChartCategory, ChartDataPoint, WalletChart};
