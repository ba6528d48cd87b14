use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use ledgerfolio_core::fx::StaticRateConverter;
use ledgerfolio_core::portfolio::batch::BatchRunner;
use ledgerfolio_core::portfolio::chart::WalletChart;
use ledgerfolio_core::portfolio::indicators::{
    IndicatorsRequest, IndicatorsService, IndicatorsServiceTrait, PortfolioIndicators,
};
use ledgerfolio_core::portfolio::performance::{
    AssetPerformance, Page, PerformanceService, PerformanceServiceTrait,
};
use ledgerfolio_core::portfolio::trend::{TrendService, TrendServiceTrait, WalletTrend};
use ledgerfolio_core::quotes::AverageCostQuoteProvider;
use ledgerfolio_storage_json::{AssetRepository, JsonStore, TransactionRepository, WalletRepository};

pub fn init_tracing() {
    let log_format =
        std::env::var("LEDGERFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub struct Services {
    pub performance: Arc<dyn PerformanceServiceTrait>,
    pub indicators: Arc<dyn IndicatorsServiceTrait>,
    pub trend: Arc<dyn TrendServiceTrait>,
}

pub fn build_services(config: &Config) -> anyhow::Result<Services> {
    config.settings.validate()?;

    let store = Arc::new(
        JsonStore::load(&config.snapshot_path)
            .with_context(|| format!("loading snapshot {}", config.snapshot_path.display()))?,
    );
    tracing::info!(
        "Snapshot loaded from {}: {} wallet(s)",
        config.snapshot_path.display(),
        store.wallets().len()
    );

    let batch_runner = BatchRunner::new(config.settings.batch_concurrency)?;
    let wallet_repository = Arc::new(WalletRepository::new(store.clone()));

    let performance: Arc<dyn PerformanceServiceTrait> = Arc::new(PerformanceService::new(
        Arc::new(AssetRepository::new(store.clone())),
        Arc::new(TransactionRepository::new(store)),
        Arc::new(AverageCostQuoteProvider),
        batch_runner,
    ));
    let indicators = Arc::new(IndicatorsService::new(
        wallet_repository,
        performance.clone(),
        Arc::new(StaticRateConverter::with_default_rates()),
        batch_runner,
        config.settings.base_currency.clone(),
    ));
    let trend = Arc::new(TrendService::new(
        performance.clone(),
        config.settings.trend_depth,
        config.settings.trend_smooth_avg,
    ));

    Ok(Services {
        performance,
        indicators,
        trend,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub indicators: PortfolioIndicators,
    pub trends: Vec<WalletTrend>,
    pub charts: Vec<WalletChart>,
    pub listing: Option<Page<AssetPerformance>>,
}

pub async fn run(config: &Config) -> anyhow::Result<Report> {
    let services = build_services(config)?;
    let request = IndicatorsRequest {
        wallet_ids: config.wallet_ids.clone(),
        currency: config.currency.clone(),
        apply_live_valuation: config.settings.apply_live_valuation,
    };

    let indicators = services.indicators.get_portfolio_indicators(&request).await?;
    let charts = services.indicators.get_chart_data(&request).await?;

    let mut trends = Vec::with_capacity(indicators.wallet_ids.len());
    for wallet_id in &indicators.wallet_ids {
        trends.push(services.trend.get_wallet_trend(wallet_id, None, None).await?);
    }

    let listing = match indicators.wallet_ids.first() {
        Some(wallet_id) => Some(
            services
                .performance
                .list_asset_performance(
                    wallet_id,
                    &config.pagination,
                    config.settings.apply_live_valuation,
                )
                .await?,
        ),
        None => None,
    };

    tracing::info!(
        "Report ready: {} wallet(s), {} asset(s)",
        indicators.wallet_ids.len(),
        indicators.asset_count
    );
    Ok(Report {
        indicators,
        trends,
        charts,
        listing,
    })
}
