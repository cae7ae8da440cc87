//! # Cross-boundary notification proxy.
//!
//! [`RemoteHandle`] is the object a publisher holds on the far side of a
//! process or thread boundary. It forwards incoming envelopes to its owning
//! [`Observer`](crate::Observer) through a non-owning back-reference, and
//! fails safe once that reference is gone.
//!
//! ## State machine
//! ```text
//! Unbound ──(Observer::bind)──► Bound ──(Observer::unbind)──► Released
//!                                                              (terminal)
//! ```
//! Released is terminal for a handle instance; a fresh `bind()` on the
//! observer produces a new handle. The remote side may keep holding a
//! released handle indefinitely — every `notify` on it is a no-op.

use std::sync::Weak;

use parking_lot::Mutex;

use crate::events::ChangeEvent;
use crate::observers::observer::ObserverCore;

/// Proxy that forwards notifications to exactly one bound observer.
///
/// Safe to call from any task or thread; the handle knows nothing about the
/// observer's threading model. The back-reference is a `Weak` behind a
/// mutex: `release()` clears it, and an observer dropped without unbinding
/// stops upgrading, so stale handles can never reach freed state.
pub struct RemoteHandle {
    target: Mutex<Option<Weak<ObserverCore>>>,
}

impl std::fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("released", &self.is_released())
            .finish()
    }
}

impl RemoteHandle {
    pub(crate) fn new(target: Weak<ObserverCore>) -> Self {
        Self {
            target: Mutex::new(Some(target)),
        }
    }

    /// Forwards an envelope to the bound observer, or drops it silently if
    /// the handle has been released or the observer is gone.
    ///
    /// With no [`ExecutionContext`](crate::ExecutionContext) configured on
    /// the observer, the callback runs inline before this returns; with one
    /// configured, the envelope is queued and this returns immediately.
    pub async fn notify(&self, event: ChangeEvent) {
        // Back-reference read takes only the handle-local lock, never the
        // observer's binding guard.
        let target = self.target.lock().clone();
        let Some(core) = target.as_ref().and_then(Weak::upgrade) else {
            tracing::trace!("dropping notification: handle released or observer gone");
            return;
        };
        core.dispatch(event).await;
    }

    /// True if the back-reference has been cleared.
    pub fn is_released(&self) -> bool {
        self.target.lock().is_none()
    }

    /// Clears the back-reference. Irreversible; called from
    /// [`Observer::unbind`](crate::Observer::unbind) only.
    pub(crate) fn release(&self) {
        *self.target.lock() = None;
    }
}
