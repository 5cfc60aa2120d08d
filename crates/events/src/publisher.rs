//! Envelope stamping on top of a shared bus.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::bus::{DynEventBus, EventBus};
use crate::{Event, EventEnvelope};

/// Publishes domain events as [`EventEnvelope`]s.
///
/// Clones share the bus and the sequence counter, so the registry and the
/// ledger can publish into one totally ordered stream.
///
/// Publishing is fire-and-forget: a bus failure is logged and otherwise
/// ignored, because the state change being announced has already happened.
pub struct EventPublisher<E> {
    bus: Arc<DynEventBus<EventEnvelope<E>>>,
    sequence: Arc<AtomicU64>,
}

impl<E> Clone for EventPublisher<E> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
            sequence: Arc::clone(&self.sequence),
        }
    }
}

impl<E> core::fmt::Debug for EventPublisher<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<E: Event> EventPublisher<E> {
    pub fn new(bus: Arc<DynEventBus<EventEnvelope<E>>>) -> Self {
        Self {
            bus,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of envelopes stamped so far.
    pub fn published(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Stamp and publish `event`, returning the assigned sequence number.
    pub fn publish(&self, event: E) -> u64 {
        let sequence_number = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let event_type = event.event_type();
        let envelope = EventEnvelope::new(Uuid::now_v7(), sequence_number, Utc::now(), event);

        if let Err(err) = self.bus.publish(envelope) {
            tracing::warn!(event_type, sequence_number, ?err, "failed to publish event");
        }
        sequence_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEventBus;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(u32);

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }
    }

    #[test]
    fn clones_share_one_sequence() {
        let bus = Arc::new(InMemoryEventBus::<EventEnvelope<Ping>>::new());
        let sub = bus.subscribe();
        let publisher: EventPublisher<Ping> = EventPublisher::new(bus);
        let other = publisher.clone();

        assert_eq!(publisher.publish(Ping(1)), 1);
        assert_eq!(other.publish(Ping(2)), 2);
        assert_eq!(publisher.published(), 2);

        let received = sub.drain();
        let seqs: Vec<u64> = received.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(received[1].payload(), &Ping(2));
    }
}
