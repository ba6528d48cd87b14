//! Per-asset performance: running cost basis, realized/unrealized profit and
//! the service that fans the reducer out over a wallet's assets.

mod cost_state;
mod performance_calculator;
mod performance_model;
mod performance_service;

pub use cost_state::RunningCostState;
pub use performance_calculator::{calculate_performance, LiveValuation};
pub use performance_model::*;
pub use performance_service::{PerformanceService, PerformanceServiceTrait};

#[cfg(test)]
mod performance_calculator_tests;
