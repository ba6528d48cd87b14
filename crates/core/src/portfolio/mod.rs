//! Portfolio computations: per-asset performance, the bounded batch runner,
//! aggregate indicators, charts and trends.

pub mod batch;
pub mod chart;
pub mod indicators;
pub mod performance;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_fixtures;
