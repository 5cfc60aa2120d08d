//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the notification side of the inventory core: every successful
//! mutation is published here after it has been applied. The core never
//! depends on delivery succeeding or on a subscriber being present.
//!
//! - **Transport-agnostic**: in-memory channels and callbacks here; anything else
//!   can implement [`EventBus`].
//! - **Broadcast**: each subscriber gets a copy of every published message.
//! - **No persistence**: the bus distributes, it does not store.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(event) => process(event)?,
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
///
/// Messages are received in the order they were published.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Failure to hand a message to the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Publish failed due to internal lock poisoning.
    #[error("event bus lock poisoned")]
    Poisoned,
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail; callers in the inventory core log the failure and
/// carry on, since the state change has already been applied.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

/// Object-safe bus shape shared by the registry and the ledger.
pub type DynEventBus<M> = dyn EventBus<M, Error = BusError>;

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
