use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::topic::Topic;

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Handlers of one topic, in registration order.
struct Slot<P: 'static> {
    handlers: Vec<(SubscriptionId, Handler<P>)>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    // TypeId of the topic -> Box<Slot<T::Payload>>
    slots: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl Registry {
    fn slot_mut<T: Topic>(&mut self) -> Option<&mut Slot<T::Payload>> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_mut::<Slot<T::Payload>>())
    }
}

/// Topic-keyed subscriber registry.
///
/// Cloning shares the registry. Handlers run synchronously inside
/// [`trigger`](Self::trigger); a panicking handler is not caught and unwinds
/// into the caller.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for topic `T`.
    pub fn on<T, F>(&self, handler: F) -> SubscriptionId
    where
        T: Topic,
        F: Fn(&T::Payload) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);

        let handler: Handler<T::Payload> = Arc::new(handler);
        let slot = registry
            .slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Box::new(Slot::<T::Payload> {
                    handlers: Vec::new(),
                })
            });
        // Slots are keyed by the topic's TypeId, so the payload type always matches.
        if let Some(slot) = slot.downcast_mut::<Slot<T::Payload>>() {
            slot.handlers.push((id, handler));
        }

        tracing::trace!(topic = T::NAME, subscription = id.0, "Handler registered");
        id
    }

    /// Remove every handler registered for `T`. Returns how many were
    /// removed; zero when there were none.
    pub fn off<T: Topic>(&self) -> usize {
        let removed = self
            .inner
            .lock()
            .slot_mut::<T>()
            .map(|slot| std::mem::take(&mut slot.handlers).len())
            .unwrap_or(0);
        tracing::trace!(topic = T::NAME, removed, "Handlers removed");
        removed
    }

    /// Remove a single handler. Returns false when it was already gone.
    pub fn unsubscribe<T: Topic>(&self, id: SubscriptionId) -> bool {
        let mut registry = self.inner.lock();
        let Some(slot) = registry.slot_mut::<T>() else {
            return false;
        };
        let before = slot.handlers.len();
        slot.handlers.retain(|(existing, _)| *existing != id);
        slot.handlers.len() != before
    }

    /// Invoke every handler currently registered for `T`, in registration
    /// order, with `payload`. Returns the number of handlers invoked.
    ///
    /// The handler list is snapshotted first, so handlers may subscribe or
    /// unsubscribe without deadlocking; such changes apply to the next
    /// trigger.
    pub fn trigger<T: Topic>(&self, payload: &T::Payload) -> usize {
        let handlers: Vec<Handler<T::Payload>> = match self.inner.lock().slot_mut::<T>() {
            Some(slot) => slot
                .handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect(),
            None => Vec::new(),
        };

        tracing::debug!(topic = T::NAME, handlers = handlers.len(), "Trigger");
        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    pub fn handler_count<T: Topic>(&self) -> usize {
        self.inner
            .lock()
            .slot_mut::<T>()
            .map(|slot| slot.handlers.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping;

    impl Topic for Ping {
        type Payload = u32;
        const NAME: &'static str = "PING";
    }

    struct Pong;

    impl Topic for Pong {
        type Payload = String;
        const NAME: &'static str = "PONG";
    }

    #[test]
    fn trigger_without_handlers_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.trigger::<Ping>(&1), 0);
    }

    #[test]
    fn off_without_handlers_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.off::<Ping>(), 0);
        assert_eq!(bus.off::<Ping>(), 0);
    }

    #[test]
    fn topics_are_isolated() {
        let bus = EventBus::new();
        let pings = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pings);
        bus.on::<Ping, _>(move |n| {
            counter.fetch_add(*n as usize, Ordering::SeqCst);
        });
        bus.on::<Pong, _>(|_| panic!("pong handler must not run"));

        bus.trigger::<Ping>(&3);
        assert_eq!(pings.load(Ordering::SeqCst), 3);
        assert_eq!(bus.handler_count::<Pong>(), 1);
    }

    #[test]
    fn unsubscribe_removes_only_one_handler() {
        let bus = EventBus::new();
        let first = bus.on::<Ping, _>(|_| {});
        bus.on::<Ping, _>(|_| {});
        assert!(bus.unsubscribe::<Ping>(first));
        assert!(!bus.unsubscribe::<Ping>(first));
        assert_eq!(bus.handler_count::<Ping>(), 1);
    }

    #[test]
    fn handler_may_reenter_the_bus() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.on::<Ping, _>(move |_| {
            inner.off::<Ping>();
        });
        assert_eq!(bus.trigger::<Ping>(&0), 1);
        assert_eq!(bus.trigger::<Ping>(&0), 0);
    }

    #[test]
    #[should_panic(expected = "handler failed")]
    fn handler_panics_propagate() {
        let bus = EventBus::new();
        bus.on::<Ping, _>(|_| panic!("handler failed"));
        bus.trigger::<Ping>(&0);
    }
}
