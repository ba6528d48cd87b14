//! Bounded-concurrency fan-out for per-asset and per-wallet computations.

mod batch_runner;

pub use batch_runner::BatchRunner;
