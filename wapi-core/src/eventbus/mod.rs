//! src/eventbus/mod.rs
//!
//! Fan-out of dashboard events. Every subscriber owns a bounded queue and
//! sees every event in publish order; a full queue makes the publisher wait
//! rather than drop anything.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tracing::trace;
use wapi_common::models::Notification;

#[derive(Debug, Clone, PartialEq)]
pub enum WapiEvent {
    /// A storage key was written or removed.
    StorageChanged { key: String, removed: bool },

    /// A toast for the operator.
    Notification(Notification),
}

impl WapiEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WapiEvent::StorageChanged { removed: false, .. } => "storage.set",
            WapiEvent::StorageChanged { removed: true, .. } => "storage.remove",
            WapiEvent::Notification(_) => "toast",
        }
    }
}

const QUEUE_DEPTH: usize = 1024;

type Subscribers = Arc<Mutex<Vec<mpsc::Sender<WapiEvent>>>>;

/// Cloning hands out another handle to the same subscriber list and the
/// same shutdown flag.
#[derive(Clone)]
pub struct EventBus {
    subscribers: Subscribers,
    stop: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (stop, shutdown_rx) = watch::channel(false);
        Self { subscribers: Subscribers::default(), stop, shutdown_rx }
    }

    /// Flips the shutdown flag; long-running watchers select on `shutdown_rx`.
    pub fn shutdown(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// `depth` bounds the queue; `None` takes the default.
    pub async fn subscribe(&self, depth: Option<usize>) -> mpsc::Receiver<WapiEvent> {
        let (tx, rx) = mpsc::channel(depth.unwrap_or(QUEUE_DEPTH));
        self.subscribers.lock().await.push(tx);
        rx
    }

    pub async fn publish(&self, event: WapiEvent) {
        // Snapshot so a slow subscriber never holds the lock.
        let live: Vec<_> = {
            let mut subs = self.subscribers.lock().await;
            subs.retain(|tx| !tx.is_closed());
            subs.iter().cloned().collect()
        };
        trace!(kind = event.kind(), subscribers = live.len(), "publish");
        for tx in live {
            if tx.send(event.clone()).await.is_err() {
                trace!("subscriber went away mid-publish");
            }
        }
    }

    pub async fn publish_storage_change(&self, key: &str, removed: bool) {
        let event = WapiEvent::StorageChanged { key: key.to_owned(), removed };
        self.publish(event).await;
    }

    pub async fn notify(&self, notification: Notification) {
        self.publish(WapiEvent::Notification(notification)).await;
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, sleep, timeout};

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let bus = EventBus::new();

        let mut rx1 = bus.subscribe(Some(5)).await;
        let mut rx2 = bus.subscribe(Some(5)).await;

        bus.publish_storage_change("contacts", false).await;

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.expect("subscriber should get event") {
                WapiEvent::StorageChanged { key, removed } => {
                    assert_eq!(key, "contacts");
                    assert!(!removed);
                }
                other => panic!("wrong event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn full_queue_applies_backpressure_without_dropping() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Some(1)).await;

        bus.notify(Notification::info("first")).await;

        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            let first = rx.recv().await.unwrap();
            let second = rx.recv().await.unwrap();
            (first, second)
        });

        let publish = bus.notify(Notification::info("second"));
        assert!(timeout(Duration::from_millis(500), publish).await.is_ok());

        let (a, b) = handle.await.unwrap();
        assert_eq!(a, WapiEvent::Notification(Notification::info("first")));
        assert_eq!(b, WapiEvent::Notification(Notification::info("second")));
    }

    #[tokio::test]
    async fn dropped_receivers_are_pruned() {
        let bus = EventBus::new();
        let rx = bus.subscribe(None).await;
        let _keep = bus.subscribe(None).await;
        drop(rx);

        bus.notify(Notification::success("ok")).await;
        assert_eq!(bus.subscriber_count().await, 1);
    }

    #[test]
    fn event_kinds_distinguish_writes_from_removals() {
        let set = WapiEvent::StorageChanged { key: "k".into(), removed: false };
        let gone = WapiEvent::StorageChanged { key: "k".into(), removed: true };
        assert_eq!(set.kind(), "storage.set");
        assert_eq!(gone.kind(), "storage.remove");
        assert_eq!(WapiEvent::Notification(Notification::info("x")).kind(), "toast");
    }

    #[test]
    fn shutdown_flag_flips() {
        let bus = EventBus::new();
        assert!(!bus.is_shutdown());
        bus.shutdown();
        assert!(bus.is_shutdown());
    }
}
