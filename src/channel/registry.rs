//! Generic named-event registry.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;

/// A registered event handler.
///
/// Handler identity is the `Arc` pointer: [`EventRegistry::off`] removes
/// the exact reference it is given, so keep a clone of the `Arc` around if
/// you intend to unsubscribe later.
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Named-event subscribe/unsubscribe/broadcast.
///
/// The change channel uses one instance for decoded socket events, but the
/// registry is generic: any producer can dispatch any payload type through
/// it. Cloning is shallow; clones share the same registrations.
///
/// Delivery rules:
/// - handlers for a name run in registration order
/// - registering the identical handler reference twice means it runs twice
/// - each invocation is isolated: a panicking handler is caught and
///   reported, and later handlers still run
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use loomdb::channel::{EventRegistry, Handler};
///
/// let registry: EventRegistry<String> = EventRegistry::new();
/// let greet: Handler<String> = Arc::new(|who| println!("hello {who}"));
///
/// registry.on("join", Arc::clone(&greet));
/// registry.emit("join", &"alice".to_string());
/// registry.off("join", &greet);
/// ```
pub struct EventRegistry<T> {
    handlers: Arc<RwLock<HashMap<String, Vec<Handler<T>>>>>,
}

impl<T> Clone for EventRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<T> Default for EventRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Appends `handler` to the named event's ordered sequence.
    ///
    /// Duplicate registration of the identical reference is allowed and
    /// will be invoked once per registration; dedupe on the caller side
    /// for single delivery.
    pub fn on(&self, event: impl Into<String>, handler: Handler<T>) {
        self.handlers
            .write()
            .entry(event.into())
            .or_default()
            .push(handler);
    }

    /// Removes the first registration of exactly this handler reference.
    ///
    /// Returns whether a registration was removed; an unknown handler or
    /// event name is a no-op.
    pub fn off(&self, event: &str, handler: &Handler<T>) -> bool {
        let mut handlers = self.handlers.write();
        let Some(registered) = handlers.get_mut(event) else {
            return false;
        };
        let Some(position) = registered.iter().position(|h| Arc::ptr_eq(h, handler)) else {
            return false;
        };
        registered.remove(position);
        true
    }

    /// Clears one event's registrations, or every registration when no
    /// name is given.
    pub fn off_all(&self, event: Option<&str>) {
        let mut handlers = self.handlers.write();
        match event {
            Some(event) => {
                handlers.remove(event);
            }
            None => handlers.clear(),
        }
    }

    /// Invokes the named event's handlers in registration order.
    ///
    /// A handler that panics is caught and reported; it never prevents
    /// subsequent handlers from running and never reaches the emitter's
    /// caller.
    pub fn emit(&self, event: &str, data: &T) {
        // Snapshot outside the lock so handlers may re-register freely.
        let snapshot = self.handlers.read().get(event).cloned();
        let Some(snapshot) = snapshot else {
            return;
        };

        for handler in &snapshot {
            if catch_unwind(AssertUnwindSafe(|| handler(data))).is_err() {
                tracing::error!(event, "event handler panicked; continuing with remaining handlers");
            }
        }
    }

    /// Returns how many handlers are registered for the named event.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.read().get(event).map_or(0, Vec::len)
    }
}

impl<T> std::fmt::Debug for EventRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        let mut counts: Vec<(&str, usize)> = handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventRegistry")
            .field("handlers", &counts)
            .finish()
    }
}
