//! FX module - currency conversion strategy and its default implementation.

pub mod currency_converter;
mod fx_traits;

pub use currency_converter::StaticRateConverter;
pub use fx_traits::CurrencyConverterTrait;
