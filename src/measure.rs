//! Resize observation for the measured layout container.
//!
//! The event loop reports the container's box size through [`SizeObserver::observe`];
//! components subscribe once when they are mounted and stop receiving updates
//! when their [`Subscription`] is dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ratatui::layout::Size;

type Listener = Box<dyn FnMut(Size)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    last: Option<Size>,
}

/// Broadcasts container size changes to subscribers.
#[derive(Clone, Default)]
pub struct SizeObserver {
    registry: Rc<RefCell<Registry>>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It is called right away with the last observed
    /// size, if any, and then on every change until the subscription drops.
    pub fn subscribe(&self, mut listener: impl FnMut(Size) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        if let Some(size) = registry.last {
            listener(size);
        }
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Report the current box size. Listeners only run when it differs from
    /// the previous report. Returns whether a change was delivered.
    pub fn observe(&self, size: Size) -> bool {
        let mut registry = self.registry.borrow_mut();
        if registry.last == Some(size) {
            return false;
        }
        registry.last = Some(size);
        tracing::trace!(width = size.width, height = size.height, "container resized");
        for (_, listener) in registry.listeners.iter_mut() {
            listener(size);
        }
        true
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener registered; dropping it deregisters the listener.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// The most recent size delivered to a subscription.
#[derive(Debug)]
pub struct MeasuredSize {
    size: Rc<Cell<Option<Size>>>,
    _subscription: Subscription,
}

impl MeasuredSize {
    pub fn subscribe(observer: &SizeObserver) -> Self {
        let size = Rc::new(Cell::new(None));
        let sink = Rc::clone(&size);
        let subscription = observer.subscribe(move |s| sink.set(Some(s)));
        Self {
            size,
            _subscription: subscription,
        }
    }

    pub fn get(&self) -> Option<Size> {
        self.size.get()
    }
}
