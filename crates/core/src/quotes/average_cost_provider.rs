use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::LiveQuoteProviderTrait;
use crate::assets::Asset;
use crate::errors::Result;

/// Placeholder provider: never knows a quote, so open positions are marked at
/// their average cost and the unrealized delta is always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageCostQuoteProvider;

#[async_trait]
impl LiveQuoteProviderTrait for AverageCostQuoteProvider {
    async fn get_live_quote(&self, asset: &Asset) -> Result<Option<Decimal>> {
        debug!("No live quote source for asset {}; using average cost", asset.id);
        Ok(None)
    }
}
