//! # Publisher-side observer registry.
//!
//! [`ObserverSet`] records which observers are interested in a stream of
//! changes and fans each envelope out to their handles. It is the component
//! that honors [`Observe::deliver_self_notifications`]: self-change
//! envelopes skip observers that declined them. The dispatch path below the
//! set never filters.
//!
//! ## Architecture
//! ```text
//! dispatch(event)
//!     │
//!     ├── self-change and observer declined? ── skip
//!     │
//!     ├──► handle 1 ── notify ──► observer 1
//!     ├──► handle 2 ── notify ──► observer 2
//!     └──► handle N ── notify ──► observer N
//! ```
//!
//! ## Rules
//! - Registration binds the observer; the set stores the resulting handle
//!   and the observer's self-notification preference as of registration.
//! - Registering an already-registered observer is an error, as is
//!   unregistering a handle the set does not hold.
//! - Unregistering removes the handle from fan-out but does not release it;
//!   releasing stays the owning observer's `unbind` decision.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::RegistryError;
use crate::events::ChangeEvent;
use crate::observers::handle::RemoteHandle;
use crate::observers::observer::Observer;

/// One registered observer: its handle plus the identity and policy
/// captured at registration time.
struct Registration {
    observer_id: usize,
    handle: Arc<RemoteHandle>,
    wants_self: bool,
    name: &'static str,
}

/// Fan-out registry over registered observers.
///
/// Registration order is delivery order; a handle released out from under
/// the set simply drops its deliveries.
#[derive(Default)]
pub struct ObserverSet {
    entries: Mutex<Vec<Registration>>,
}

impl ObserverSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `observer` and records its handle for fan-out.
    ///
    /// Returns the bound handle. Fails with
    /// [`RegistryError::AlreadyRegistered`] if this observer is already in
    /// the set. Identity tracks the observer itself, not its current handle:
    /// unbinding and rebinding does not make an observer registrable twice.
    pub fn register(&self, observer: &Observer) -> Result<Arc<RemoteHandle>, RegistryError> {
        let handle = observer.bind();
        let mut entries = self.entries.lock();
        if entries.iter().any(|r| r.observer_id == observer.id()) {
            return Err(RegistryError::AlreadyRegistered);
        }
        entries.push(Registration {
            observer_id: observer.id(),
            handle: Arc::clone(&handle),
            wants_self: observer.deliver_self_notifications(),
            name: observer.name(),
        });
        Ok(handle)
    }

    /// Removes a handle from fan-out.
    ///
    /// Fails with [`RegistryError::NotRegistered`] if the set does not hold
    /// this handle. Does not release the handle.
    pub fn unregister(&self, handle: &Arc<RemoteHandle>) -> Result<(), RegistryError> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|r| !Arc::ptr_eq(&r.handle, handle));
        if entries.len() == before {
            return Err(RegistryError::NotRegistered);
        }
        Ok(())
    }

    /// Fans one envelope out to every interested registered handle.
    ///
    /// Self-change envelopes skip observers whose
    /// `deliver_self_notifications()` was false at registration. Targets are
    /// snapshotted under the lock, then notified without it, so observer
    /// callbacks never run while the registry is locked.
    pub async fn dispatch(&self, event: &ChangeEvent) {
        let targets: Vec<Arc<RemoteHandle>> = {
            let entries = self.entries.lock();
            entries
                .iter()
                .filter(|r| !event.self_change || r.wants_self)
                .map(|r| {
                    tracing::trace!(observer = r.name, "dispatching change");
                    Arc::clone(&r.handle)
                })
                .collect()
        };
        for handle in targets {
            handle.notify(event.clone()).await;
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::observe::Observe;

    struct Recorder {
        wants_self: bool,
        seen: Mutex<Vec<ChangeEvent>>,
    }

    impl Recorder {
        fn new(wants_self: bool) -> Arc<Self> {
            Arc::new(Self {
                wants_self,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl Observe for Recorder {
        async fn on_change(&self, event: &ChangeEvent) {
            self.seen.lock().push(event.clone());
        }
        fn deliver_self_notifications(&self) -> bool {
            self.wants_self
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[test]
    fn test_register_twice_fails() {
        let set = ObserverSet::new();
        let observer = Observer::new(Recorder::new(false));

        assert!(set.register(&observer).is_ok());
        assert_eq!(
            set.register(&observer).unwrap_err(),
            RegistryError::AlreadyRegistered
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unregister_unknown_handle_fails() {
        let set = ObserverSet::new();
        let stranger = Observer::new(Recorder::new(false));
        let handle = stranger.bind();

        assert_eq!(set.unregister(&handle), Err(RegistryError::NotRegistered));
    }

    #[test]
    fn test_rebinding_does_not_evade_duplicate_check() {
        let set = ObserverSet::new();
        let observer = Observer::new(Recorder::new(false));

        set.register(&observer).unwrap();
        observer.unbind();

        // Fresh handle, same observer: still a duplicate.
        assert_eq!(
            set.register(&observer).unwrap_err(),
            RegistryError::AlreadyRegistered
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rebound_observer_can_reregister() {
        let set = ObserverSet::new();
        let observer = Observer::new(Recorder::new(false));

        let handle = set.register(&observer).unwrap();
        observer.unbind();
        set.unregister(&handle).unwrap();

        // A fresh binding is a fresh handle; the set accepts it again.
        assert!(set.register(&observer).is_ok());
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_self_change_filtering() {
        let set = ObserverSet::new();
        let wants = Recorder::new(true);
        let declines = Recorder::new(false);
        let a = Observer::new(wants.clone());
        let b = Observer::new(declines.clone());
        set.register(&a).unwrap();
        set.register(&b).unwrap();

        set.dispatch(&ChangeEvent::new(true).with_subject("own-write"))
            .await;
        assert_eq!(wants.seen.lock().len(), 1);
        assert_eq!(declines.seen.lock().len(), 0);

        set.dispatch(&ChangeEvent::new(false).with_subject("other-write"))
            .await;
        assert_eq!(wants.seen.lock().len(), 2);
        assert_eq!(declines.seen.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_unregister_stops_fanout() {
        let set = ObserverSet::new();
        let recorder = Recorder::new(false);
        let observer = Observer::new(recorder.clone());
        let handle = set.register(&observer).unwrap();

        set.dispatch(&ChangeEvent::new(false)).await;
        set.unregister(&handle).unwrap();
        set.dispatch(&ChangeEvent::new(false)).await;

        assert_eq!(recorder.seen.lock().len(), 1);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_released_handle_in_set_drops_quietly() {
        let set = ObserverSet::new();
        let recorder = Recorder::new(false);
        let observer = Observer::new(recorder.clone());
        set.register(&observer).unwrap();

        // Observer detaches itself without telling the registry.
        observer.unbind();
        set.dispatch(&ChangeEvent::new(false)).await;

        assert_eq!(recorder.seen.lock().len(), 0);
        assert_eq!(set.len(), 1);
    }
}
