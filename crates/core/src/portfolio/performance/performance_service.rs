use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};
use std::sync::Arc;

use super::performance_calculator::{calculate_performance, LiveValuation};
use super::performance_model::{AssetPerformance, Page, Pagination, PerformanceSelector};
use crate::assets::{Asset, AssetRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::portfolio::batch::BatchRunner;
use crate::quotes::LiveQuoteProviderTrait;
use crate::transactions::TransactionRepositoryTrait;

/// Trait defining the contract for performance service operations.
#[async_trait]
pub trait PerformanceServiceTrait: Send + Sync {
    /// Performance of a single asset.
    async fn calculate_asset_performance(
        &self,
        asset_id: &str,
        apply_live_valuation: bool,
    ) -> Result<AssetPerformance>;

    /// Performance of every asset of a wallet, in completion order.
    async fn calculate_wallet_performance(
        &self,
        wallet_id: &str,
        apply_live_valuation: bool,
    ) -> Result<Vec<AssetPerformance>>;

    /// Dispatches on the selector. The asset id wins when both are given;
    /// neither is a contract violation rejected before any fetch.
    async fn calculate_performance(
        &self,
        selector: &PerformanceSelector,
        apply_live_valuation: bool,
    ) -> Result<Vec<AssetPerformance>>;

    /// Sorted, paginated listing of a wallet's asset performance.
    async fn list_asset_performance(
        &self,
        wallet_id: &str,
        pagination: &Pagination,
        apply_live_valuation: bool,
    ) -> Result<Page<AssetPerformance>>;
}

pub struct PerformanceService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    quote_provider: Arc<dyn LiveQuoteProviderTrait>,
    batch_runner: BatchRunner,
}

impl PerformanceService {
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        quote_provider: Arc<dyn LiveQuoteProviderTrait>,
        batch_runner: BatchRunner,
    ) -> Self {
        Self {
            asset_repository,
            transaction_repository,
            quote_provider,
            batch_runner,
        }
    }

    /// Fetches an asset's transactions (and live quote, if needed) and runs the reducer.
    async fn evaluate(&self, asset: Asset, apply_live_valuation: bool) -> Result<AssetPerformance> {
        let transactions = self
            .transaction_repository
            .list_by_asset(&asset.id)
            .await
            .map_err(|e| {
                error!("Failed to load transactions for asset {}: {}", asset.id, e);
                e
            })?;

        let live_valuation = if apply_live_valuation && !asset.is_done {
            Some(LiveValuation {
                quote: self.quote_provider.get_live_quote(&asset).await?,
                as_of: Utc::now(),
            })
        } else {
            None
        };

        let calculation = calculate_performance(&asset, &transactions, live_valuation);
        if calculation.has_warnings() {
            debug!(
                "Asset {} finished with {} skipped transaction(s)",
                asset.id,
                calculation.warnings.len()
            );
        }

        Ok(AssetPerformance {
            asset_class: asset.asset_class(),
            asset_id: asset.id,
            asset_name: asset.name,
            wallet_id: asset.wallet_id,
            result: calculation.result,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl PerformanceServiceTrait for PerformanceService {
    async fn calculate_asset_performance(
        &self,
        asset_id: &str,
        apply_live_valuation: bool,
    ) -> Result<AssetPerformance> {
        let asset = self.asset_repository.get_by_id(asset_id).await?;
        self.evaluate(asset, apply_live_valuation).await
    }

    async fn calculate_wallet_performance(
        &self,
        wallet_id: &str,
        apply_live_valuation: bool,
    ) -> Result<Vec<AssetPerformance>> {
        let assets = self.asset_repository.list_by_wallet(wallet_id).await?;
        debug!(
            "Calculating performance for {} asset(s) of wallet {} (concurrency {})",
            assets.len(),
            wallet_id,
            self.batch_runner.concurrency()
        );

        let tasks = assets
            .into_iter()
            .map(|asset| self.evaluate(asset, apply_live_valuation));
        self.batch_runner.collect(tasks).await
    }

    async fn calculate_performance(
        &self,
        selector: &PerformanceSelector,
        apply_live_valuation: bool,
    ) -> Result<Vec<AssetPerformance>> {
        match (non_empty(&selector.asset_id), non_empty(&selector.wallet_id)) {
            (Some(asset_id), _) => Ok(vec![
                self.calculate_asset_performance(asset_id, apply_live_valuation)
                    .await?,
            ]),
            (None, Some(wallet_id)) => {
                self.calculate_wallet_performance(wallet_id, apply_live_valuation)
                    .await
            }
            (None, None) => Err(ValidationError::MissingSelector.into()),
        }
    }

    async fn list_asset_performance(
        &self,
        wallet_id: &str,
        pagination: &Pagination,
        apply_live_valuation: bool,
    ) -> Result<Page<AssetPerformance>> {
        pagination.validate()?;
        let performances = self
            .calculate_wallet_performance(wallet_id, apply_live_valuation)
            .await?;
        pagination.apply(performances)
    }
}
