//! Wallet trend estimation over smoothed, dated net-profit values.

mod trend_calculator;
mod trend_model;
mod trend_service;

pub use trend_calculator::{daily_series, estimate_trend, validate_trend_parameters};
pub use trend_model::{Trend, WalletTrend};
pub use trend_service::{TrendService, TrendServiceTrait};

#[cfg(test)]
mod trend_service_tests;
