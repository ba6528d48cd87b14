use futures::future::Future;
use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, error};

use crate::constants::DEFAULT_BATCH_CONCURRENCY;
use crate::errors::{Error, Result, ValidationError};

/// Runs independent asynchronous computations with at most `concurrency` in
/// flight, yielding each outcome as soon as it completes.
///
/// The runner owns no shared state; the in-flight set lives inside the stream
/// returned by [`BatchRunner::run`] and is only touched while that stream is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRunner {
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "batchConcurrency",
                "must be at least 1",
            )));
        }
        Ok(Self { concurrency })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Lazily drives `tasks`, keeping at most `concurrency` of them pending.
    ///
    /// Items come out in completion order, not submission order. A failed
    /// task surfaces as an `Err` item at the point it completes; siblings
    /// already started keep running and are yielded normally.
    pub fn run<'a, I, F, T>(&self, tasks: I) -> BoxStream<'a, Result<T>>
    where
        I: IntoIterator<Item = F>,
        I::IntoIter: Send + 'a,
        F: Future<Output = Result<T>> + Send + 'a,
        T: Send + 'a,
    {
        stream::iter(tasks)
            .buffer_unordered(self.concurrency)
            .boxed()
    }

    /// Drains every task and returns the successful results in completion order.
    ///
    /// The stream is always drained to the end so no started computation is
    /// abandoned. If any task failed, every failure is logged and the first
    /// one is returned.
    pub async fn collect<'a, I, F, T>(&self, tasks: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = F>,
        I::IntoIter: Send + 'a,
        F: Future<Output = Result<T>> + Send + 'a,
        T: Send + 'a,
    {
        let mut outcomes = self.run(tasks);
        let mut completed = Vec::new();
        let mut first_failure: Option<Error> = None;

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Ok(value) => completed.push(value),
                Err(e) => {
                    error!("Batch task failed: {}", e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => {
                debug!(
                    "Batch finished with failures; {} task(s) completed successfully",
                    completed.len()
                );
                Err(e)
            }
            None => Ok(completed),
        }
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}
