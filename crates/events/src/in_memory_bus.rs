//! In-memory event bus.

use std::sync::{Arc, Mutex, mpsc};

use crate::bus::{BusError, EventBus, Subscription};

type Listener<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Channel subscribers get an owned copy of each message; dropped ones are pruned
/// - Callback listeners run synchronously on the publishing thread, in
///   registration order
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
    listeners: Mutex<Vec<Listener<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked for every published message.
    pub fn listen(&self, listener: impl Fn(&M) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Arc::new(listener));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = BusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        {
            let mut subs = self.subscribers.lock().map_err(|_| BusError::Poisoned)?;
            // Drop any dead subscribers while publishing.
            subs.retain(|tx| tx.send(message.clone()).is_ok());
        }

        // Snapshot so a listener may publish or register without deadlocking.
        let listeners: Vec<Listener<M>> = self
            .listeners
            .lock()
            .map_err(|_| BusError::Poisoned)?
            .clone();
        for listener in listeners {
            listener(&message);
        }

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}
