use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::trend_calculator::{daily_series, estimate_trend, validate_trend_parameters};
use super::trend_model::WalletTrend;
use crate::assets::AssetClass;
use crate::errors::Result;
use crate::portfolio::performance::{AssetPerformance, PerformanceServiceTrait};
use crate::utils::time_utils::calendar_date;

#[async_trait]
pub trait TrendServiceTrait: Send + Sync {
    /// Estimates the trend of a wallet's net profit. Missing parameters fall
    /// back to the service defaults; out-of-range ones are rejected before
    /// any data is fetched.
    async fn get_wallet_trend(
        &self,
        wallet_id: &str,
        depth: Option<usize>,
        smooth_avg: Option<usize>,
    ) -> Result<WalletTrend>;
}

pub struct TrendService {
    performance_service: Arc<dyn PerformanceServiceTrait>,
    default_depth: usize,
    default_smooth_avg: usize,
}

impl TrendService {
    pub fn new(
        performance_service: Arc<dyn PerformanceServiceTrait>,
        default_depth: usize,
        default_smooth_avg: usize,
    ) -> Self {
        Self {
            performance_service,
            default_depth,
            default_smooth_avg,
        }
    }
}

/// Dated net profit of an asset, if it counts towards the trend.
/// Private bonds only count once they are done.
fn trend_point(performance: &AssetPerformance) -> Option<(NaiveDate, Decimal)> {
    if performance.asset_class == AssetClass::PrivateBond && !performance.result.is_done {
        return None;
    }
    performance
        .result
        .latest_date
        .map(|latest| (calendar_date(latest), performance.result.net_profit()))
}

#[async_trait]
impl TrendServiceTrait for TrendService {
    async fn get_wallet_trend(
        &self,
        wallet_id: &str,
        depth: Option<usize>,
        smooth_avg: Option<usize>,
    ) -> Result<WalletTrend> {
        let depth = depth.unwrap_or(self.default_depth);
        let smooth_avg = smooth_avg.unwrap_or(self.default_smooth_avg);
        validate_trend_parameters(depth, smooth_avg)?;

        let performances = self
            .performance_service
            .calculate_wallet_performance(wallet_id, false)
            .await?;
        let values: Vec<(NaiveDate, Decimal)> =
            performances.iter().filter_map(trend_point).collect();

        let trend = estimate_trend(&values, depth, smooth_avg)?;
        debug!("Wallet {} trend: {}", wallet_id, trend);

        Ok(WalletTrend {
            wallet_id: wallet_id.to_string(),
            trend,
            depth,
            smooth_avg,
            observed_dates: daily_series(&values).len(),
        })
    }
}
