use rust_decimal::Decimal;

use crate::errors::Result;

/// Strategy for converting amounts between currencies.
///
/// The aggregator only depends on this trait, so a real-rate provider can be
/// swapped in without touching indicator code.
pub trait CurrencyConverterTrait: Send + Sync {
    fn convert(&self, amount: Decimal, from_currency: &str, to_currency: &str) -> Result<Decimal>;
}
