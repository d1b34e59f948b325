//! # Change Notification
//!
//! [`Listeners`] is the subscriber registry behind `NotesApi::subscribe`. Each
//! façade owns its own registry, so two façades (two tests, two windows) never
//! see each other's subscribers.
//!
//! Notification is synchronous: [`Listeners::notify`] calls every registered
//! callback once, in registration order, with the full collection. There is no
//! coalescing and no incremental diff.
//!
//! [`Subscription`] is the handle returned on registration. Calling
//! [`Subscription::unsubscribe`] removes the callback; dropping the handle
//! without calling it leaves the callback registered for the registry's lifetime.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&[T])>>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

pub struct Listeners<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&[T]) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .entries
            .push((id, Rc::new(RefCell::new(callback)) as Callback<T>));

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        let remove: Box<dyn FnOnce()> = Box::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        });
        Subscription {
            remove: Some(remove),
        }
    }

    /// Calls every subscriber once with `items`.
    ///
    /// Subscribers registered or removed while a notification is running take
    /// effect from the next notification.
    pub fn notify(&self, items: &[T]) {
        let snapshot: Vec<Callback<T>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            // A callback that is already running (re-entrant notify) is skipped.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(items);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered listener.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Deregisters the listener. Safe to call after the registry is gone.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
