//! Memoized call cell: single execution, any number of observers.
//!
//! A cell wraps one logical operation's dispatch. The wrapped future is
//! lazy (nothing runs until the first resolve), runs at most once, and its
//! result is kept for the lifetime of the lifecycle instance. Concurrent
//! resolvers all wait on the same in-flight execution; later resolvers get
//! the cached result immediately. Observers share one `Arc`, so "same
//! result" is literal pointer identity.
//!
//! There is no cancellation hook: a caller that times out abandons only its
//! own await, and the dispatch resumes the next time any observer polls.

use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

use crate::response::VariantResponses;
use crate::sequencer::LifecycleStep;

/// Single-execution, multi-observer holder for one operation's responses.
pub(crate) struct CallCell {
    step: LifecycleStep,
    shared: Shared<BoxFuture<'static, Arc<VariantResponses>>>,
}

impl CallCell {
    /// Wrap a dispatch future. Nothing executes until the first resolve.
    pub(crate) fn new(
        step: LifecycleStep,
        dispatch: impl std::future::Future<Output = VariantResponses> + Send + 'static,
    ) -> Self {
        let label = step.clone();
        let shared = async move {
            tracing::debug!(step = %label, "dispatching lifecycle step");
            let responses = dispatch.await;
            tracing::debug!(step = %label, variants = responses.len(), "lifecycle step completed");
            Arc::new(responses)
        }
        .boxed()
        .shared();
        Self { step, shared }
    }

    /// A cell for an enabled step whose calls were never registered.
    ///
    /// Resolves immediately to an empty variant map without dispatching,
    /// so unconfigured optional steps cost nothing when forced as
    /// predecessors.
    pub(crate) fn empty(step: LifecycleStep) -> Self {
        Self::new(step, async { VariantResponses::new() })
    }

    /// The step this cell executes.
    pub(crate) fn step(&self) -> &LifecycleStep {
        &self.step
    }

    /// Await the cell's result, triggering the dispatch on first use.
    pub(crate) async fn resolve(&self) -> Arc<VariantResponses> {
        self.shared.clone().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_cell(executions: Arc<AtomicUsize>) -> CallCell {
        CallCell::new(LifecycleStep::Create, async move {
            executions.fetch_add(1, Ordering::SeqCst);
            VariantResponses::new()
        })
    }

    #[tokio::test]
    async fn resolve_is_memoized() {
        let executions = Arc::new(AtomicUsize::new(0));
        let cell = counting_cell(executions.clone());

        let first = cell.resolve().await;
        let second = cell.resolve().await;

        assert_eq!(executions.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn unresolved_cell_never_dispatches() {
        let executions = Arc::new(AtomicUsize::new(0));
        let _cell = counting_cell(executions.clone());
        assert_eq!(executions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_resolvers_share_one_execution() {
        let executions = Arc::new(AtomicUsize::new(0));
        let cell = Arc::new(counting_cell(executions.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cell = cell.clone();
            handles.push(tokio::spawn(async move { cell.resolve().await }));
        }
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(executions.load(Ordering::SeqCst), 1);
        for pair in results.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
    }

    #[tokio::test]
    async fn empty_cell_resolves_to_no_variants() {
        let cell = CallCell::empty(LifecycleStep::ReadAfterCreate);
        assert_eq!(cell.step(), &LifecycleStep::ReadAfterCreate);
        assert!(cell.resolve().await.is_empty());
    }
}
