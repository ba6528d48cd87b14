use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::assets::Asset;
use crate::errors::Result;

/// Source of live market prices for open positions.
#[async_trait]
pub trait LiveQuoteProviderTrait: Send + Sync {
    /// Latest price per share of `asset`, or `None` when no quote is known.
    /// Without a quote the reducer marks the position at its average price.
    async fn get_live_quote(&self, asset: &Asset) -> Result<Option<Decimal>>;
}
