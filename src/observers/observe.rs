//! # Core observer trait.
//!
//! `Observe` is the extension point for receiving change notifications. An
//! implementation is wrapped in an [`Observer`](crate::Observer), which owns
//! the binding state and routes envelopes to [`Observe::on_change`] either
//! inline or via an [`ExecutionContext`](crate::ExecutionContext).
//!
//! ## Contract
//! - `on_change` runs either on the dispatching task (no context) or on the
//!   context's worker task (context present). The observer's binding guard
//!   is acquired only for `bind`/`unbind` transitions and is never held
//!   across `on_change`.
//! - Re-entering `bind`/`unbind` on the same observer from inside `on_change`
//!   while a binding transition is in progress is forbidden by contract: the
//!   guard is not re-entrant, and nothing detects or recovers from such a
//!   call.
//! - Implementations must not block the async runtime (prefer async I/O and
//!   cooperative waits).
//!
//! ## Example (skeleton)
//! ```rust
//! use async_trait::async_trait;
//! use changecast::{ChangeEvent, Observe};
//!
//! struct CacheInvalidator;
//!
//! #[async_trait]
//! impl Observe for CacheInvalidator {
//!     async fn on_change(&self, event: &ChangeEvent) {
//!         if let Some(subject) = &event.subject {
//!             // evict subject from cache...
//!             let _ = subject;
//!         }
//!     }
//!     fn name(&self) -> &'static str { "cache-invalidator" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::ChangeEvent;

/// Contract for change observers.
///
/// All methods have defaults; a unit struct implementing the trait is a
/// valid (if silent) observer.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Handles one change notification.
    ///
    /// Default implementation does nothing.
    async fn on_change(&self, event: &ChangeEvent) {
        let _ = event;
    }

    /// Whether this observer wants notifications for changes it made itself.
    ///
    /// Advice to publishers, not a hard gate: the dispatch path delivers
    /// whatever reaches it, and filtering is up to whichever component
    /// decides to notify (see [`ObserverSet`](crate::ObserverSet)).
    fn deliver_self_notifications(&self) -> bool {
        false
    }

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
