//! Notification plumbing: events, envelopes and the publish/subscribe bus.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod publisher;

pub use bus::{BusError, DynEventBus, EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::InMemoryEventBus;
pub use publisher::EventPublisher;
