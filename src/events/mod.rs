//! # Notification envelopes.
//!
//! This module holds the event **data model** carried through the dispatch
//! path: the [`ChangeEvent`] envelope and the opaque [`Origin`] producer tag
//! attached to it.
//!
//! ## Quick reference
//! - **Producers**: publishers calling [`RemoteHandle::notify`](crate::RemoteHandle::notify)
//!   or [`ObserverSet::dispatch`](crate::ObserverSet::dispatch).
//! - **Consumers**: [`Observe::on_change`](crate::Observe::on_change) implementations.

mod envelope;

pub use envelope::{ChangeEvent, Origin};
