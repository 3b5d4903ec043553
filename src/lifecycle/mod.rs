//! Lifecycle management.
//!
//! Startup is plain and ordered (config, cache pool, listener, server); what
//! needs coordination is stopping. `Shutdown` is a broadcast fan-out: any
//! holder can trigger it, every subscribed task observes it. The server also
//! reacts to Ctrl-C on its own, so the coordinator mainly serves embedders
//! and tests that need to stop a gateway deterministically.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
pub struct Shutdown {
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self { notify }
    }

    /// Obtain a receiver that resolves once shutdown is triggered.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Signal every subscriber to begin shutting down.
    pub fn trigger(&self) {
        let _ = self.notify.send(());
    }

    /// Number of tasks still subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.notify.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
