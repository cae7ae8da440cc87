//! Error types for the changecast dispatch core.
//!
//! The taxonomy is deliberately small: the dispatch path itself is
//! infallible (a detached delivery or a double unbind is a silent no-op, not
//! an error), so the only fallible surface is registry membership.

use thiserror::Error;

/// # Errors produced by [`ObserverSet`](crate::ObserverSet) membership changes.
///
/// Delivery never produces these; only `register`/`unregister` do.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The observer's current handle is already held by this set.
    #[error("observer is already registered")]
    AlreadyRegistered,

    /// The handle is not held by this set.
    #[error("observer is not registered")]
    NotRegistered,
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use changecast::RegistryError;
    ///
    /// assert_eq!(RegistryError::AlreadyRegistered.as_label(), "registry_already_registered");
    /// assert_eq!(RegistryError::NotRegistered.as_label(), "registry_not_registered");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::AlreadyRegistered => "registry_already_registered",
            RegistryError::NotRegistered => "registry_not_registered",
        }
    }
}
