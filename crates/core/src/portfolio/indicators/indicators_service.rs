use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::indicators_calculator::calculate_indicators;
use super::indicators_model::{IndicatorsRequest, PortfolioIndicators, WalletSnapshot};
use crate::errors::Result;
use crate::fx::CurrencyConverterTrait;
use crate::portfolio::batch::BatchRunner;
use crate::portfolio::chart::{build_wallet_chart, WalletChart};
use crate::portfolio::performance::{AssetPerformance, PerformanceServiceTrait};
use crate::wallets::{Wallet, WalletMovement, WalletRepositoryTrait};

#[async_trait]
pub trait IndicatorsServiceTrait: Send + Sync {
    /// Aggregates the selected wallets into one indicator set.
    async fn get_portfolio_indicators(
        &self,
        request: &IndicatorsRequest,
    ) -> Result<PortfolioIndicators>;

    /// One cumulative chart series per selected wallet, in request order.
    async fn get_chart_data(&self, request: &IndicatorsRequest) -> Result<Vec<WalletChart>>;
}

pub struct IndicatorsService {
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    performance_service: Arc<dyn PerformanceServiceTrait>,
    currency_converter: Arc<dyn CurrencyConverterTrait>,
    batch_runner: BatchRunner,
    base_currency: String,
}

impl IndicatorsService {
    pub fn new(
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        performance_service: Arc<dyn PerformanceServiceTrait>,
        currency_converter: Arc<dyn CurrencyConverterTrait>,
        batch_runner: BatchRunner,
        base_currency: String,
    ) -> Self {
        Self {
            wallet_repository,
            performance_service,
            currency_converter,
            batch_runner,
            base_currency,
        }
    }

    fn reporting_currency(&self, request: &IndicatorsRequest) -> String {
        request
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.base_currency)
            .to_uppercase()
    }

    /// Requested wallets in request order, or the most recently updated one.
    /// A repeated id is loaded once, at its first position.
    async fn resolve_wallets(&self, request: &IndicatorsRequest) -> Result<Vec<Wallet>> {
        let mut seen = HashSet::new();
        let wallet_ids: Vec<String> = request
            .wallet_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .map(str::to_string)
            .collect();

        if !wallet_ids.is_empty() {
            return self.wallet_repository.get_by_ids(&wallet_ids).await;
        }

        let fallback = self.wallet_repository.get_most_recently_updated().await?;
        if let Some(wallet) = &fallback {
            debug!("No wallet selected; defaulting to {}", wallet.id);
        }
        Ok(fallback.into_iter().collect())
    }

    /// Loads one wallet and converts its amounts into `currency`.
    async fn load_snapshot(
        &self,
        wallet: Wallet,
        currency: &str,
        apply_live_valuation: bool,
    ) -> Result<WalletSnapshot> {
        let movements = self.wallet_repository.list_movements(&wallet.id).await?;
        let performances = self
            .performance_service
            .calculate_wallet_performance(&wallet.id, apply_live_valuation)
            .await?;

        let rate = self
            .currency_converter
            .convert(Decimal::ONE, &wallet.currency, currency)?;

        let movements = movements
            .into_iter()
            .map(|movement| WalletMovement {
                result: movement.result * rate,
                ..movement
            })
            .collect();
        let performances = performances
            .into_iter()
            .map(|performance| AssetPerformance {
                result: performance.result.scaled(rate),
                ..performance
            })
            .collect();

        Ok(WalletSnapshot {
            wallet,
            movements,
            performances,
        })
    }

    /// Fans out over the wallets and returns the snapshots in request order.
    async fn load_snapshots(
        &self,
        request: &IndicatorsRequest,
        currency: &str,
    ) -> Result<Vec<WalletSnapshot>> {
        let wallets = self.resolve_wallets(request).await?;
        if wallets.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = wallets.into_iter().enumerate().map(|(position, wallet)| async move {
            self.load_snapshot(wallet, currency, request.apply_live_valuation)
                .await
                .map(|snapshot| (position, snapshot))
        });
        let mut loaded = self.batch_runner.collect(tasks).await?;
        loaded.sort_by_key(|(position, _)| *position);

        Ok(loaded.into_iter().map(|(_, snapshot)| snapshot).collect())
    }
}

#[async_trait]
impl IndicatorsServiceTrait for IndicatorsService {
    async fn get_portfolio_indicators(
        &self,
        request: &IndicatorsRequest,
    ) -> Result<PortfolioIndicators> {
        let currency = self.reporting_currency(request);
        let snapshots = self.load_snapshots(request, &currency).await?;
        if snapshots.is_empty() {
            info!("No wallets to aggregate; returning empty indicators");
            return Ok(PortfolioIndicators::empty(&currency));
        }

        Ok(calculate_indicators(&snapshots, &currency))
    }

    async fn get_chart_data(&self, request: &IndicatorsRequest) -> Result<Vec<WalletChart>> {
        let currency = self.reporting_currency(request);
        let snapshots = self.load_snapshots(request, &currency).await?;

        Ok(snapshots
            .iter()
            .map(|snapshot| build_wallet_chart(snapshot, &currency))
            .collect())
    }
}
