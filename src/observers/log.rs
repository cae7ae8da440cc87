//! # Simple logging observer for debugging and demos.
//!
//! [`LogObserver`] emits one `tracing` record per received envelope.
//! Primarily useful for development and examples; implement a custom
//! [`Observe`](crate::Observe) for real consumers.
//!
//! ## Output shape
//! ```text
//! INFO content changed self_change=false subject="settings/theme" origin=Caller
//! ```

use async_trait::async_trait;

use crate::events::ChangeEvent;
use crate::observers::observe::Observe;

/// Logging observer.
///
/// Enabled via the `logging` feature. Accepts self-change notifications so
/// everything a publisher emits shows up in the log.
pub struct LogObserver;

#[async_trait]
impl Observe for LogObserver {
    async fn on_change(&self, event: &ChangeEvent) {
        tracing::info!(
            self_change = event.self_change,
            subject = event.subject.as_deref().unwrap_or("<unknown>"),
            origin = ?event.origin,
            "content changed"
        );
    }

    fn deliver_self_notifications(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Origin;
    use crate::observers::observer::Observer;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_log_observer_delivery() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let observer = Observer::new(Arc::new(LogObserver));
        assert!(observer.deliver_self_notifications());
        assert_eq!(observer.name(), "log");

        let handle = observer.bind();
        handle
            .notify(
                ChangeEvent::new(true)
                    .with_subject("demo/record")
                    .with_origin(Origin::tag("demo")),
            )
            .await;
        handle.notify(ChangeEvent::new(false)).await;
    }
}
