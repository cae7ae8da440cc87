//! # Observer: binding state and dispatch routing.
//!
//! [`Observer`] wraps a user [`Observe`] implementation with the machinery
//! the dispatch path needs: lazy creation of a [`RemoteHandle`] under a
//! binding guard, release of that handle, and routing of incoming envelopes
//! either inline or onto an [`ExecutionContext`].
//!
//! ## Architecture
//! ```text
//! publisher ──► RemoteHandle::notify(event)
//!                   │ (Weak upgrade; no-op if released)
//!                   ▼
//!               ObserverCore::dispatch(event)
//!                   │
//!        ┌──────────┴───────────┐
//!        ▼ no context           ▼ context configured
//!   on_change(event).await   context.schedule(on_change(event))
//!   (inline, before notify      (queued; notify returns
//!    returns)                    immediately)
//! ```
//!
//! ## Locking
//! The binding guard protects only the `bind`/`unbind` transition. It is
//! never held across `on_change`, and `notify`/`dispatch` never take it —
//! they read the handle's own back-reference lock instead. A `notify` racing
//! an `unbind` therefore resolves to either one delivery or a silent drop;
//! both are acceptable outcomes.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::ExecutionContext;
use crate::events::ChangeEvent;
use crate::observers::handle::RemoteHandle;
use crate::observers::observe::Observe;

/// The part of an observer reachable from its handles.
///
/// Handles hold a `Weak` to this, so an `Observer` dropped without a prior
/// `unbind` still fails safe: the upgrade fails and the envelope is dropped.
pub(crate) struct ObserverCore {
    handler: Arc<dyn Observe>,
    context: Option<ExecutionContext>,
}

impl ObserverCore {
    /// Routes one envelope to the handler.
    ///
    /// Context present: queue the callback and return without waiting.
    /// Context absent: run the callback inline.
    pub(crate) async fn dispatch(&self, event: ChangeEvent) {
        match &self.context {
            Some(context) => {
                let handler = Arc::clone(&self.handler);
                context.schedule(async move {
                    handler.on_change(&event).await;
                });
            }
            None => self.handler.on_change(&event).await,
        }
    }
}

/// A change observer with at most one live [`RemoteHandle`].
///
/// The handle is created lazily by [`bind`](Observer::bind) and invalidated
/// by [`unbind`](Observer::unbind). Unbind before discarding an observer
/// that was handed out across a boundary; a dropped-but-bound observer is
/// still safe (handles fail to upgrade), but the remote side keeps a handle
/// to nothing.
pub struct Observer {
    core: Arc<ObserverCore>,
    // Binding guard. Held only for bind/unbind, never across on_change.
    bound: Mutex<Option<Arc<RemoteHandle>>>,
}

impl Observer {
    /// Creates an observer whose callbacks run inline on the dispatching task.
    pub fn new(handler: Arc<dyn Observe>) -> Self {
        Self::build(handler, None)
    }

    /// Creates an observer whose callbacks are queued on `context`.
    pub fn with_context(handler: Arc<dyn Observe>, context: ExecutionContext) -> Self {
        Self::build(handler, Some(context))
    }

    fn build(handler: Arc<dyn Observe>, context: Option<ExecutionContext>) -> Self {
        Self {
            core: Arc::new(ObserverCore { handler, context }),
            bound: Mutex::new(None),
        }
    }

    /// Returns this observer's handle, creating one if none is bound.
    ///
    /// Idempotent: concurrent and repeated calls all observe the same handle
    /// until an `unbind` intervenes. Exactly one handle is created per
    /// binding, enforced by the binding guard.
    pub fn bind(&self) -> Arc<RemoteHandle> {
        let mut guard = self.bound.lock();
        if let Some(handle) = guard.as_ref() {
            return Arc::clone(handle);
        }
        let handle = Arc::new(RemoteHandle::new(Arc::downgrade(&self.core)));
        *guard = Some(Arc::clone(&handle));
        handle
    }

    /// Releases the bound handle, if any, and returns it.
    ///
    /// After this returns, `notify` on the released handle is a no-op — this
    /// is the sole mechanism keeping a remote caller from reaching an
    /// observer that considers itself detached. Idempotent: a second call
    /// returns `None`.
    pub fn unbind(&self) -> Option<Arc<RemoteHandle>> {
        let mut guard = self.bound.lock();
        let released = guard.take();
        if let Some(handle) = &released {
            handle.release();
        }
        released
    }

    /// True if a handle is currently bound.
    pub fn is_bound(&self) -> bool {
        self.bound.lock().is_some()
    }

    /// Stable identity of this observer, independent of binding state.
    ///
    /// Used by [`ObserverSet`](crate::ObserverSet) so that rebinding cannot
    /// smuggle one observer into a registry twice.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.core) as usize
    }

    /// Whether the wrapped handler wants self-change notifications.
    pub fn deliver_self_notifications(&self) -> bool {
        self.core.handler.deliver_self_notifications()
    }

    /// Name of the wrapped handler (for logs).
    pub fn name(&self) -> &'static str {
        self.core.handler.name()
    }
}
