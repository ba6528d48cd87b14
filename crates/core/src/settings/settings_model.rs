//! Engine settings model.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_CURRENCY, DEFAULT_BATCH_CONCURRENCY, DEFAULT_TREND_DEPTH,
    DEFAULT_TREND_SMOOTH_AVG,
};
use crate::errors::{Result, ValidationError};
use crate::portfolio::trend::validate_trend_parameters;

/// Knobs the caller supplies to the engine.
///
/// Values are loaded by the embedding application (environment, file, request)
/// and validated once before any service is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Maximum number of per-asset / per-wallet computations in flight.
    pub batch_concurrency: usize,
    /// Mark open positions to a live quote after the transaction pass.
    pub apply_live_valuation: bool,
    /// Currency used when a request does not select one.
    pub base_currency: String,
    pub trend_depth: usize,
    pub trend_smooth_avg: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            apply_live_valuation: false,
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            trend_depth: DEFAULT_TREND_DEPTH,
            trend_smooth_avg: DEFAULT_TREND_SMOOTH_AVG,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.batch_concurrency == 0 {
            return Err(ValidationError::invalid_parameter(
                "batchConcurrency",
                "must be at least 1",
            )
            .into());
        }
        if self.base_currency.trim().is_empty() {
            return Err(ValidationError::MissingField("baseCurrency".to_string()).into());
        }
        validate_trend_parameters(self.trend_depth, self.trend_smooth_avg)
    }
}
