//! # changecast
//!
//! **Changecast** is a small change-notification dispatch library for Rust.
//!
//! It provides the primitives to record interest in "content changed"
//! events, carry them across a process or thread boundary through a proxy
//! handle, and redeliver them on a caller-chosen execution context — with
//! the guarantee that the remote side can never reach a local observer after
//! it has detached.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   remote publisher                       local side
//! ┌──────────────────┐   opaque RPC   ┌─────────────────────────────────────┐
//! │ notify(event) ───┼───────────────►│ RemoteHandle                        │
//! └──────────────────┘                │   │ back-reference (Weak, mutexed)  │
//!                                     │   │ released? ──► silent drop       │
//!                                     │   ▼                                 │
//!                                     │ Observer dispatch                   │
//!                                     │   ├─ no context: on_change inline   │
//!                                     │   └─ context:    schedule + return  │
//!                                     │         │                           │
//!                                     │         ▼                           │
//!                                     │ ExecutionContext (FIFO worker)      │
//!                                     │         │                           │
//!                                     │         ▼                           │
//!                                     │ Observe::on_change(event)           │
//!                                     └─────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Observer::bind() ──► RemoteHandle (Bound)
//!     │                     │
//!     │                     ├─ notify(event) ──► dispatch ──► on_change
//!     ▼                     │
//! Observer::unbind() ──► release() ──► (Released, terminal)
//!                           │
//!                           └─ notify(event) ──► no-op
//! ```
//!
//! ## Features
//! | Area            | Description                                                       | Key types / traits                 |
//! |-----------------|-------------------------------------------------------------------|------------------------------------|
//! | **Observer API**| Receive change notifications, inline or queued.                   | [`Observe`], [`Observer`]          |
//! | **Handles**     | Cross-boundary proxies that fail safe after release.              | [`RemoteHandle`]                   |
//! | **Scheduling**  | FIFO worker queue for deferred callback delivery.                 | [`ExecutionContext`]               |
//! | **Fan-out**     | Publisher-side registry honoring self-notification policy.        | [`ObserverSet`]                    |
//! | **Envelopes**   | Immutable notification records with opaque subject and origin.    | [`ChangeEvent`], [`Origin`]        |
//! | **Errors**      | Registry membership errors.                                       | [`RegistryError`]                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogObserver`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use changecast::{ChangeEvent, ExecutionContext, Observe, Observer};
//!
//! struct ThemeWatcher;
//!
//! #[async_trait]
//! impl Observe for ThemeWatcher {
//!     async fn on_change(&self, event: &ChangeEvent) {
//!         println!("changed: {:?}", event.subject);
//!     }
//!     fn name(&self) -> &'static str { "theme-watcher" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // Callbacks for this observer run on a dedicated worker task.
//!     let context = ExecutionContext::new("ui");
//!     let observer = Observer::with_context(Arc::new(ThemeWatcher), context.clone());
//!
//!     // The handle is what crosses the boundary to the publisher.
//!     let handle = observer.bind();
//!     handle
//!         .notify(ChangeEvent::new(false).with_subject("settings/theme"))
//!         .await;
//!
//!     // After unbind, the publisher's handle delivers nothing.
//!     observer.unbind();
//!     handle
//!         .notify(ChangeEvent::new(false).with_subject("settings/locale"))
//!         .await;
//!
//!     context.shutdown().await;
//! }
//! ```

mod context;
mod error;
mod events;
mod observers;

// ---- Public re-exports ----

pub use context::ExecutionContext;
pub use error::RegistryError;
pub use events::{ChangeEvent, Origin};
pub use observers::{Observe, Observer, ObserverSet, RemoteHandle};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogObserver;
