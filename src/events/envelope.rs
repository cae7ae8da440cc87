//! # Change-notification envelope.
//!
//! [`ChangeEvent`] is the immutable record of one notification: whether the
//! change was produced by the notified party itself, an opaque subject
//! identifier naming what changed, and an opaque [`Origin`] tag identifying
//! who produced it.
//!
//! Envelopes have no identity beyond their field values: two logically
//! distinct events may compare equal, and nothing in the dispatch path
//! deduplicates them.
//!
//! ## Example
//! ```rust
//! use changecast::{ChangeEvent, Origin};
//!
//! let ev = ChangeEvent::new(false)
//!     .with_subject("settings/theme")
//!     .with_origin(Origin::tag("sync-daemon"));
//!
//! assert!(!ev.self_change);
//! assert_eq!(ev.subject.as_deref(), Some("settings/theme"));
//! assert_eq!(ev.origin, Origin::tag("sync-daemon"));
//! ```

use std::sync::Arc;

/// Opaque identity of the party that produced a change.
///
/// Publishers that do not tag their notifications explicitly fall back to
/// [`Origin::Caller`], meaning "whoever invoked the dispatch path".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The calling context's own identity (sentinel default).
    Caller,
    /// An explicit producer identity supplied by the publisher.
    Tag(Arc<str>),
}

impl Origin {
    /// Creates an explicit producer tag.
    #[inline]
    pub fn tag(tag: impl Into<Arc<str>>) -> Self {
        Origin::Tag(tag.into())
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Caller
    }
}

/// One change notification, immutable once constructed.
///
/// - `self_change`: the change was made by the party being notified.
/// - `subject`: opaque identifier of what changed, if known.
/// - `origin`: who produced the change (defaults to [`Origin::Caller`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    /// True if this notification describes a change the observer itself made.
    pub self_change: bool,
    /// Identifier of the changed content, or `None` if unknown.
    pub subject: Option<Arc<str>>,
    /// Identity of the change's producer.
    pub origin: Origin,
}

impl ChangeEvent {
    /// Creates an envelope with no subject and the [`Origin::Caller`] sentinel.
    pub fn new(self_change: bool) -> Self {
        Self {
            self_change,
            subject: None,
            origin: Origin::Caller,
        }
    }

    /// Attaches the identifier of the changed content.
    #[inline]
    pub fn with_subject(mut self, subject: impl Into<Arc<str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attaches an explicit producer identity.
    #[inline]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}
