//! Fan-out helper joining many independent units of work.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::collector_ports::{CollectionDiagnostics, DiagnosticEvent};

/// Runs submitted units concurrently and waits for all of them.
///
/// Units own their results and errors. [`GroupWaiter::wait`] returns once
/// every unit finished, so anything a unit wrote is visible afterwards.
pub struct GroupWaiter {
    units: JoinSet<()>,
    limiter: Option<Arc<Semaphore>>,
    diagnostics: Arc<dyn CollectionDiagnostics>,
}

impl GroupWaiter {
    /// Creates a waiter without a concurrency ceiling.
    #[must_use]
    pub fn new(diagnostics: Arc<dyn CollectionDiagnostics>) -> Self {
        Self {
            units: JoinSet::new(),
            limiter: None,
            diagnostics,
        }
    }

    /// Caps the number of units running at once. `None` and zero leave it unbounded.
    #[must_use]
    pub fn with_limit(mut self, max_concurrency: Option<usize>) -> Self {
        self.limiter = max_concurrency
            .filter(|limit| *limit > 0)
            .map(|limit| Arc::new(Semaphore::new(limit)));
        self
    }

    /// Starts one unit immediately.
    pub fn spawn<F>(&mut self, unit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let limiter = self.limiter.clone();
        self.units.spawn(async move {
            // Never closed, so acquisition cannot fail.
            let _permit = match limiter {
                Some(limiter) => limiter.acquire_owned().await.ok(),
                None => None,
            };
            unit.await;
        });
    }

    /// Blocks until every submitted unit finished.
    pub async fn wait(mut self) {
        while let Some(result) = self.units.join_next().await {
            if let Err(error) = result {
                self.diagnostics.record(DiagnosticEvent::UnitAborted {
                    message: error.to_string(),
                });
            }
        }
    }
}
