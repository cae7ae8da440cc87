//! # Observers and their cross-boundary handles.
//!
//! This module provides the [`Observe`] trait and the machinery around it:
//! [`Observer`] (binding state, dispatch routing), [`RemoteHandle`] (the
//! proxy a publisher holds), and [`ObserverSet`] (publisher-side fan-out
//! registry).
//!
//! ## Architecture
//! ```text
//! Delivery flow:
//!   publisher ── notify(event) ──► RemoteHandle ──► Observer dispatch
//!                                      │                  │
//!                                 (released? drop)   ┌────┴─────┐
//!                                                    ▼          ▼
//!                                                 inline     queued on
//!                                                on_change  ExecutionContext
//! ```
//!
//! ## Implementing observers
//! ```rust
//! use async_trait::async_trait;
//! use changecast::{ChangeEvent, Observe};
//!
//! struct AuditLog;
//!
//! #[async_trait]
//! impl Observe for AuditLog {
//!     async fn on_change(&self, event: &ChangeEvent) {
//!         // write audit record...
//!         let _ = event;
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

mod handle;
#[cfg(feature = "logging")]
mod log;
mod observe;
mod observer;
mod set;

pub use handle::RemoteHandle;
#[cfg(feature = "logging")]
pub use log::LogObserver;
pub use observe::Observe;
pub use observer::Observer;
pub use set::ObserverSet;
