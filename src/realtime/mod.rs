use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::models::checkin::Checkin;
use crate::domain::models::metrics::MetricsSnapshot;

/// Dashboard-update payload: either a fresh aggregate snapshot or the
/// check-in that just changed the numbers.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DashboardPayload {
    Snapshot(MetricsSnapshot),
    Checkin(Checkin),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum RealtimeEvent {
    CheckinRecorded(Checkin),
    DashboardUpdate(DashboardPayload),
}

/// Fan-out channel for dashboard clients. Every subscriber receives every
/// published event; nothing is persisted across restarts.
pub struct Broadcaster {
    tx: broadcast::Sender<RealtimeEvent>,
    subscribers: AtomicUsize,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            subscribers: AtomicUsize::new(0),
        }
    }

    /// Publishing with no subscribers is a no-op, not an error.
    pub fn publish(&self, event: RealtimeEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!("Realtime event delivered to {} subscriber(s)", receivers),
            Err(_) => debug!("Realtime event dropped (no subscribers)"),
        }
    }

    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        self.subscribers.fetch_add(1, Ordering::Relaxed);
        Subscription {
            rx: self.tx.subscribe(),
            broadcaster: self.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::Relaxed)
    }
}

/// Live subscription handle; dropping it releases the subscriber slot.
pub struct Subscription {
    rx: broadcast::Receiver<RealtimeEvent>,
    broadcaster: Arc<Broadcaster>,
}

impl Subscription {
    pub async fn recv(&mut self) -> Result<RealtimeEvent, broadcast::error::RecvError> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.broadcaster.subscribers.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            checkins_today: 3,
            active_memberships: 2,
            expired_memberships: 1,
            expiring_soon: 0,
        }
    }

    #[tokio::test]
    async fn subscriber_count_tracks_subscriptions() {
        let broadcaster = Arc::new(Broadcaster::new(16));
        assert_eq!(broadcaster.subscriber_count(), 0);

        let first = broadcaster.subscribe();
        let second = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(first);
        assert_eq!(broadcaster.subscriber_count(), 1);
        drop(second);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_every_event() {
        let broadcaster = Arc::new(Broadcaster::new(16));
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();

        broadcaster.publish(RealtimeEvent::DashboardUpdate(DashboardPayload::Snapshot(snapshot())));

        for sub in [&mut a, &mut b] {
            match sub.recv().await.unwrap() {
                RealtimeEvent::DashboardUpdate(DashboardPayload::Snapshot(s)) => {
                    assert_eq!(s.checkins_today, 3);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let broadcaster = Arc::new(Broadcaster::new(16));
        broadcaster.publish(RealtimeEvent::DashboardUpdate(DashboardPayload::Snapshot(snapshot())));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn events_serialize_as_tagged_envelopes() {
        let event = RealtimeEvent::DashboardUpdate(DashboardPayload::Snapshot(snapshot()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "dashboard_update");
        assert_eq!(json["payload"]["type"], "snapshot");
        assert_eq!(json["payload"]["data"]["checkins_today"], 3);
    }
}
