use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared::models::TallySnapshot;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};
use uuid::Uuid;

/// Fan-out point for live result feeds. One hub exists per process, created
/// at startup and handed to the request layer through `AppState`.
#[derive(Clone)]
pub struct Hub {
    subscribers: Arc<Mutex<HashMap<Uuid, UnboundedSender<TallySnapshot>>>>,
}

/// A registered live connection. Dropping it (the transport saw the client
/// disconnect) removes it from the hub.
pub struct Subscription {
    id: Uuid,
    hub: Hub,
    receiver: UnboundedReceiver<TallySnapshot>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next pushed snapshot, or `None` once the hub has dropped this
    /// subscriber.
    pub async fn next(&mut self) -> Option<TallySnapshot> {
        self.receiver.recv().await
    }

    /// Closes the receiving half while keeping the registration, so the
    /// next publish observes a send failure. Test hook.
    #[cfg(test)]
    pub fn close_for_test(&mut self) {
        self.receiver.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}

impl Hub {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a live connection. The subscription's first delivery is
    /// `initial`, so a new viewer sees current results right away.
    pub fn subscribe(&self, initial: TallySnapshot) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        // Cannot fail: the receiver is still in hand.
        let _ = sender.send(initial);

        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                subscribers.insert(id, sender);
                debug!("Subscriber {id} registered ({} live)", subscribers.len());
            }
            Err(e) => error!("Failed to acquire subscriber lock: {e}"),
        }

        Subscription {
            id,
            hub: self.clone(),
            receiver,
        }
    }

    /// Idempotent removal.
    pub fn unsubscribe(&self, id: Uuid) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.remove(&id);
        }
    }

    /// Best-effort delivery of the same snapshot to every subscriber. A
    /// failed send drops only that subscriber and never the rest.
    pub fn publish(&self, snapshot: &TallySnapshot) {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to acquire subscriber lock: {e}");
                return;
            }
        };

        subscribers.retain(|id, sender| {
            if sender.send(snapshot.clone()).is_ok() {
                true
            } else {
                debug!("Dropping disconnected subscriber {id}");
                false
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
