//! Portfolio indicators: folds wallets' movements and asset results into
//! profit/loss statistics, breakeven, edge and expectancy.

mod indicators_calculator;
mod indicators_model;
mod indicators_service;

pub use indicators_calculator::{calculate_indicators, fold_order};
pub use indicators_model::{IndicatorsRequest, PortfolioIndicators, WalletSnapshot};
pub use indicators_service::{IndicatorsService, IndicatorsServiceTrait};
