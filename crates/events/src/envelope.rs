use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for an event, containing delivery metadata.
///
/// This is the unit handed to the bus.
///
/// Notes:
/// - `sequence_number` is monotonically increasing per publisher (starting at 1),
///   so subscribers can restore publication order.
/// - `payload` is the domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    /// Monotonically increasing position in the publisher's stream.
    sequence_number: u64,

    occurred_at: DateTime<Utc>,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        sequence_number: u64,
        occurred_at: DateTime<Utc>,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            sequence_number,
            occurred_at,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
