//! Relay — bounded hand-off between the event-stream reader and the
//! forwarding loop.
//!
//! The producer side never awaits: when the queue is full the event is
//! dropped, so a slow chat delivery can never back-pressure the Docker
//! event stream read.

use tokio::sync::mpsc;

use crate::docker::event::RuntimeEvent;

pub fn channel(depth: usize) -> (RelaySender, RelayReceiver) {
    let (tx, rx) = mpsc::channel(depth);
    (RelaySender { tx }, RelayReceiver { rx })
}

pub struct RelaySender {
    tx: mpsc::Sender<RuntimeEvent>,
}

impl RelaySender {
    /// Non-blocking offer. Returns false when the event was dropped, either
    /// because the queue is full or because the consumer is gone.
    pub fn offer(&self, event: RuntimeEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }

    /// True once the consumer side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct RelayReceiver {
    rx: mpsc::Receiver<RuntimeEvent>,
}

impl RelayReceiver {
    /// Wait for the next event; `None` once all senders are gone.
    pub async fn next(&mut self) -> Option<RuntimeEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::event::{EventAction, EventKind, RuntimeEvent};

    fn event(name: &str) -> RuntimeEvent {
        RuntimeEvent {
            kind: EventKind::Container,
            action: EventAction::Start,
            name: name.to_string(),
            time: 1700000000,
        }
    }

    #[tokio::test]
    async fn test_events_arrive_in_offer_order() {
        let (tx, mut rx) = channel(8);
        assert!(tx.offer(event("a")));
        assert!(tx.offer(event("b")));
        assert!(tx.offer(event("c")));

        assert_eq!(rx.next().await.unwrap().name, "a");
        assert_eq!(rx.next().await.unwrap().name, "b");
        assert_eq!(rx.next().await.unwrap().name, "c");
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (tx, mut rx) = channel(2);
        assert!(tx.offer(event("a")));
        assert!(tx.offer(event("b")));
        // Queue is full; the offer fails immediately instead of waiting.
        assert!(!tx.offer(event("c")));

        assert_eq!(rx.next().await.unwrap().name, "a");
        // One slot free again.
        assert!(tx.offer(event("d")));
        assert_eq!(rx.next().await.unwrap().name, "b");
        assert_eq!(rx.next().await.unwrap().name, "d");
    }

    #[tokio::test]
    async fn test_offer_fails_after_consumer_drop() {
        let (tx, rx) = channel(2);
        drop(rx);
        assert!(!tx.offer(event("a")));
        assert!(tx.is_closed());
    }

    #[tokio::test]
    async fn test_receiver_ends_after_sender_drop() {
        let (tx, mut rx) = channel(2);
        tx.offer(event("a"));
        drop(tx);
        assert_eq!(rx.next().await.unwrap().name, "a");
        assert!(rx.next().await.is_none());
    }
}
