use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Key identifying one live subscriber in the registry.
pub type SubscriberId = Uuid;

/// Fan-out of code rotations to every live subscriber.
///
/// The registry maps subscriber keys to the sending half of an unbounded
/// channel; the connection task owns the receiving half. Sends never
/// block, so a slow transport cannot stall the rotation path — detecting
/// and tearing down dead connections is the transport layer's job.
pub struct CodeBroadcaster {
    subscribers: DashMap<SubscriberId, mpsc::UnboundedSender<Uuid>>,
}

impl CodeBroadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
        }
    }

    /// Register a new subscriber and hand back its delivery channel.
    ///
    /// The current code is queued before the sender is registered, so the
    /// initial value always precedes any rotation-triggered delivery on
    /// the returned receiver.
    pub fn subscribe(&self, current: Uuid) -> (SubscriberId, mpsc::UnboundedReceiver<Uuid>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        // Cannot fail: the receiver is still held right here.
        let _ = tx.send(current);
        self.subscribers.insert(id, tx);
        (id, rx)
    }

    /// Remove a subscriber. A no-op for unknown or already-removed ids;
    /// once this returns no broadcast can deliver to that subscriber.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.remove(&id);
    }

    /// Deliver `code` to every registered subscriber.
    ///
    /// Snapshot-then-iterate: the sender list is collected first so a
    /// subscribe/unsubscribe racing the broadcast sees either the pre- or
    /// post-mutation set, never a partial one. A subscriber whose channel
    /// is gone is dropped from the registry; that failure never reaches
    /// the caller or other subscribers.
    pub fn broadcast(&self, code: Uuid) {
        let targets: Vec<(SubscriberId, mpsc::UnboundedSender<Uuid>)> = self
            .subscribers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, tx) in targets {
            if tx.send(code).is_err() {
                debug!(subscriber = %id, "dropping subscriber with closed channel");
                self.subscribers.remove(&id);
            }
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for CodeBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
