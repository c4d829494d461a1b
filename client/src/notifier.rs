//! Subscription registry for load events.
//!
//! Each subscriber gets its own unbounded channel. Events are delivered to
//! subscribers in the order they subscribed.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::event::LoadEvent;

/// Sender half of a subscription.
pub type EventSender = mpsc::UnboundedSender<LoadEvent>;

/// Receiver half of a subscription.
pub type EventReceiver = mpsc::UnboundedReceiver<LoadEvent>;

/// Handle identifying a subscription. Handles increase with subscription order.
pub type SubscriptionId = u64;

/// Fans load events out to every subscriber.
#[derive(Debug, Default)]
pub struct Notifier {
    next_id: AtomicU64,
    subscribers: DashMap<SubscriptionId, EventSender>,
}

impl Notifier {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            subscribers: DashMap::new(),
        }
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> (SubscriptionId, EventReceiver) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.insert(id, tx);

        tracing::debug!(subscription = id, "Subscriber registered");
        (id, rx)
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = id, "Subscriber unregistered");
        }
        removed
    }

    /// Deliver an event to every subscriber.
    ///
    /// Subscribers whose receiver was dropped are unregistered. Returns the
    /// number of subscribers that received the event.
    pub fn publish(&self, event: LoadEvent) -> usize {
        let mut targets: Vec<(SubscriptionId, EventSender)> = self
            .subscribers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        let mut delivered = 0;
        for (id, sender) in targets {
            if sender.send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                self.unsubscribe(id);
            }
        }

        tracing::trace!(event = event.kind(), recipients = delivered, "Published load event");
        delivered
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_unsubscribe() {
        let notifier = Notifier::new();

        let (first, _rx1) = notifier.subscribe();
        let (second, _rx2) = notifier.subscribe();
        assert!(first < second);
        assert_eq!(notifier.subscriber_count(), 2);

        assert!(notifier.unsubscribe(first));
        assert!(!notifier.unsubscribe(first));
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let notifier = Notifier::new();
        let (_, mut rx1) = notifier.subscribe();
        let (_, mut rx2) = notifier.subscribe();

        assert_eq!(notifier.publish(LoadEvent::Started), 2);
        assert_eq!(notifier.publish(LoadEvent::Complete), 2);

        for rx in [&mut rx1, &mut rx2] {
            assert_eq!(rx.try_recv().unwrap(), LoadEvent::Started);
            assert_eq!(rx.try_recv().unwrap(), LoadEvent::Complete);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_unsubscribed_receives_nothing() {
        let notifier = Notifier::new();
        let (id, mut rx) = notifier.subscribe();
        notifier.unsubscribe(id);

        assert_eq!(notifier.publish(LoadEvent::Started), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let notifier = Notifier::new();
        let (_, rx) = notifier.subscribe();
        let (_, _kept) = notifier.subscribe();
        drop(rx);

        assert_eq!(notifier.publish(LoadEvent::Started), 1);
        assert_eq!(notifier.subscriber_count(), 1);
    }
}
