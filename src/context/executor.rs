//! # Queued execution context for notification callbacks.
//!
//! [`ExecutionContext`] is a FIFO work queue bound to one dedicated worker
//! task. Observers constructed with a context hand their callbacks to it and
//! return immediately; observers without one run callbacks inline on the
//! dispatching task.
//!
//! ## Architecture
//! ```text
//! schedule(job)
//!     │
//!     ▼
//! [unbounded queue] ──► worker task ──► job.await
//!    (FIFO)                 └─────────► panic → caught, logged, worker continues
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `schedule()` returns immediately.
//! - **FIFO per sender**: jobs scheduled from one task run in program order.
//! - **No cancellation of individual jobs**: once queued, a job runs unless
//!   the whole context is shut down.
//! - **Isolation**: a panicking job is caught and logged; the worker keeps
//!   draining the queue.
//!
//! ## Panic handling
//! The worker wraps every job in `catch_unwind`. `AssertUnwindSafe` is used,
//! which can leave shared state inconsistent if a job panics while holding a
//! lock.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A unit of queued work: one notification callback, boxed.
type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Handle to a dedicated worker task draining a FIFO job queue.
///
/// Cheap to clone; all clones feed the same queue. The worker runs until
/// [`shutdown`](ExecutionContext::shutdown) is called, at which point it
/// drains whatever is already queued and exits.
#[derive(Clone)]
pub struct ExecutionContext {
    name: Arc<str>,
    tx: mpsc::UnboundedSender<Job>,
    cancel: CancellationToken,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ExecutionContext {
    /// Creates a context and spawns its worker task.
    ///
    /// The name is used only for log breadcrumbs.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let cancel = CancellationToken::new();

        let worker_name = Arc::clone(&name);
        let worker_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    maybe = rx.recv() => match maybe {
                        Some(job) => run_job(&worker_name, job).await,
                        None => break,
                    },
                    _ = worker_cancel.cancelled() => {
                        // Drain what was queued before shutdown, then exit.
                        while let Ok(job) = rx.try_recv() {
                            run_job(&worker_name, job).await;
                        }
                        break;
                    }
                }
            }
        });

        Self {
            name,
            tx,
            cancel,
            worker: Arc::new(Mutex::new(Some(handle))),
        }
    }

    /// Enqueues a job and returns immediately.
    ///
    /// Jobs scheduled from the same task run in program order. A job handed
    /// to a context that has already shut down is silently dropped.
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.tx.send(Box::pin(job)).is_err() {
            tracing::debug!(context = %self.name, "context shut down; job dropped");
        }
    }

    /// Name of this context (for logs).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shuts the worker down.
    ///
    /// 1. Signals cancellation (new `schedule` calls become drops).
    /// 2. The worker drains already-queued jobs.
    /// 3. Awaits worker exit.
    ///
    /// Idempotent across clones: the first caller joins the worker, later
    /// callers return immediately.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// Runs one job with panic isolation.
async fn run_job(context: &str, job: Job) {
    if let Err(panic_err) = AssertUnwindSafe(job).catch_unwind().await {
        let info = {
            let any = &*panic_err;
            if let Some(msg) = any.downcast_ref::<&'static str>() {
                (*msg).to_string()
            } else if let Some(msg) = any.downcast_ref::<String>() {
                msg.clone()
            } else {
                "unknown panic".to_string()
            }
        };
        tracing::warn!(context, panic = %info, "notification callback panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as SyncMutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_jobs_run_in_fifo_order() {
        let ctx = ExecutionContext::new("fifo");
        let seen = Arc::new(SyncMutex::new(Vec::new()));

        for i in 0..5u32 {
            let seen = Arc::clone(&seen);
            ctx.schedule(async move {
                seen.lock().push(i);
            });
        }

        ctx.shutdown().await;
        assert_eq!(*seen.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_jobs() {
        let ctx = ExecutionContext::new("drain");
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        ctx.schedule(async move {
            flag.store(true, Ordering::SeqCst);
        });

        ctx.shutdown().await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_schedule_after_shutdown_is_dropped() {
        let ctx = ExecutionContext::new("closed");
        ctx.shutdown().await;

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        ctx.schedule(async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_kill_worker() {
        let ctx = ExecutionContext::new("panicky");
        let ran = Arc::new(AtomicBool::new(false));

        ctx.schedule(async {
            panic!("boom");
        });
        let flag = Arc::clone(&ran);
        ctx.schedule(async move {
            flag.store(true, Ordering::SeqCst);
        });

        ctx.shutdown().await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
