//! Live windows and their per-frame update callbacks.
//!
//! Membership is what keeps the run loop alive: an empty registry, or one the
//! main window has left, ends the loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use sill_core::WindowId;

pub type Updater = Rc<dyn Fn()>;

#[derive(Default)]
pub struct WindowRegistry {
    entries: RefCell<BTreeMap<WindowId, Updater>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the updater for `id`.
    pub fn register(&self, id: WindowId, updater: Updater) {
        if self.entries.borrow_mut().insert(id, updater).is_some() {
            log::debug!("{id} re-registered, previous updater replaced");
        } else {
            log::debug!("{id} registered");
        }
    }

    pub fn unregister(&self, id: WindowId) {
        if self.entries.borrow_mut().remove(&id).is_some() {
            log::debug!("{id} unregistered");
        }
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of the current entries, safe to iterate while updaters mutate the
    /// registry.
    pub fn snapshot(&self) -> Vec<(WindowId, Updater)> {
        self.entries
            .borrow()
            .iter()
            .map(|(id, updater)| (*id, Rc::clone(updater)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn register_is_last_write_wins() {
        let registry = WindowRegistry::new();
        let hits = Rc::new(Cell::new(0));
        registry.register(WindowId(1), Rc::new(|| {}));
        {
            let hits = Rc::clone(&hits);
            registry.register(WindowId(1), Rc::new(move || hits.set(hits.get() + 10)));
        }
        assert_eq!(registry.len(), 1);
        for (_, updater) in registry.snapshot() {
            updater();
        }
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn unregister_unknown_is_a_no_op() {
        let registry = WindowRegistry::new();
        registry.register(WindowId(1), Rc::new(|| {}));
        registry.unregister(WindowId(2));
        assert!(registry.contains(WindowId(1)));
        registry.unregister(WindowId(1));
        registry.unregister(WindowId(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_survives_mutation_during_iteration() {
        let registry = Rc::new(WindowRegistry::new());
        let hits = Rc::new(Cell::new(0));
        {
            let reg = Rc::downgrade(&registry);
            let hits = Rc::clone(&hits);
            registry.register(
                WindowId(1),
                Rc::new(move || {
                    hits.set(hits.get() + 1);
                    if let Some(reg) = reg.upgrade() {
                        reg.unregister(WindowId(2));
                        reg.register(WindowId(3), Rc::new(|| {}));
                    }
                }),
            );
        }
        {
            let hits = Rc::clone(&hits);
            registry.register(WindowId(2), Rc::new(move || hits.set(hits.get() + 1)));
        }
        for (_, updater) in registry.snapshot() {
            updater();
        }
        assert_eq!(hits.get(), 2);
        assert!(!registry.contains(WindowId(2)));
        assert!(registry.contains(WindowId(3)));
    }
}
