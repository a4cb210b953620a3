//! Per-window listener list.
//!
//! Dispatch iterates a copy of the listener set taken when dispatch starts, so
//! a listener may add or remove listeners (including itself) without affecting
//! which listeners see the event currently being delivered.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use sill_core::Event;

/// Identifies one listener on one window. Starts at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u32);

type Listener<T> = Rc<dyn Fn(&T, &mut Event)>;

pub struct EventBus<T> {
    next_id: Cell<u32>,
    listeners: RefCell<BTreeMap<ListenerId, Listener<T>>>,
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            listeners: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn add(&self, listener: impl Fn(&T, &mut Event) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(listener));
        id
    }

    /// Returns false if `id` was never added or is already removed.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Deliver `event` to every listener present when the call starts, in
    /// registration order.
    pub fn dispatch(&self, sender: &T, event: &mut Event) {
        let snapshot: Vec<Listener<T>> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(sender, event);
        }
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
