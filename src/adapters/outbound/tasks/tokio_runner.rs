use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::Notify;

use crate::ports::tasks::TaskRunner;

/// Runs replication tasks on the tokio runtime.
///
/// Tracks in-flight tasks so callers that need replication to drain
/// (tests, graceful shutdown) can [`settle`](TokioTaskRunner::settle);
/// the store itself never waits. Panics are contained at the task
/// boundary and reported through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TokioTaskRunner {
    in_flight: Arc<AtomicUsize>,
    drained: Arc<Notify>,
}

impl TokioTaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no spawned task is in flight.
    ///
    /// A convenience, not an ordering guarantee: tasks spawned after
    /// this call resolves are not covered by it.
    pub async fn settle(&self) {
        loop {
            let drained = self.drained.notified();
            if self.in_flight.load(Ordering::Acquire) == 0 {
                return;
            }
            drained.await;
        }
    }
}

impl TaskRunner for TokioTaskRunner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let in_flight = Arc::clone(&self.in_flight);
        let drained = Arc::clone(&self.drained);
        tokio::spawn(async move {
            if AssertUnwindSafe(task).catch_unwind().await.is_err() {
                tracing::error!("background replication task panicked");
            }
            if in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
                drained.notify_waiters();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[tokio::test]
    async fn settle_waits_for_spawned_work() {
        let runner = TokioTaskRunner::new();
        let done = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&done);
        runner.spawn(Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            flag.store(true, Ordering::Release);
        }));

        runner.settle().await;
        assert!(done.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn panicking_task_is_contained() {
        let runner = TokioTaskRunner::new();
        runner.spawn(Box::pin(async {
            panic!("boom");
        }));
        runner.settle().await;

        // Sibling tasks keep running after a panic.
        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        runner.spawn(Box::pin(async move {
            flag.store(true, Ordering::Release);
        }));
        runner.settle().await;
        assert!(done.load(Ordering::Acquire));
    }
}
