//! Observable state container
//!
//! [`ObservableState`] holds one immutable snapshot and notifies subscribers
//! whenever it is replaced. Cloning the container shares the same value and
//! subscriber list.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A new subscriber is called once, immediately, with the current value.
//! 3. Dropping (or calling [`Subscription::unsubscribe`] on) the returned
//!    guard stops further notifications, including for a dispatch that is
//!    already under way.
//! 4. Listeners run outside the internal lock, so a listener may call
//!    [`set`](ObservableState::set) on the same container. Each listener
//!    receives whatever value is current when its turn comes; a reentrant
//!    write therefore collapses into the value seen by the listeners still
//!    waiting in the outer dispatch, and then triggers its own dispatch.
//!
//! The container is built for cooperative, single-threaded scheduling.
//! It is `Send + Sync` so spawned tasks can hold it, but concurrent writers
//! on different threads only get invariant 4's "current value" guarantee.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

impl<T> Inner<T> {
    fn is_registered(&self, id: u64) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// A shared value with change notification
pub struct ObservableState<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for ObservableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default + Clone + Send + 'static> Default for ObservableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ObservableState")
            .field("value", &inner.value)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> ObservableState<T> {
    /// Creates a container holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Returns a clone of the current snapshot
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Reads the current snapshot without cloning it
    ///
    /// `f` runs under the internal lock and must not touch this container.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner).value)
    }

    /// Replaces the snapshot and notifies every subscriber
    pub fn set(&self, value: T) {
        let listeners = {
            let mut inner = lock(&self.inner);
            inner.value = value;
            inner.listeners.clone()
        };
        self.dispatch(listeners);
    }

    /// Computes the next snapshot from the current one and applies it
    ///
    /// The read and the write happen under one lock acquisition, so no other
    /// write can land between them. `f` must not touch this container.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let listeners = {
            let mut inner = lock(&self.inner);
            let next = f(&inner.value);
            inner.value = next;
            inner.listeners.clone()
        };
        self.dispatch(listeners);
    }

    /// Registers `listener`, calls it with the current value, and returns
    /// the guard that keeps it registered
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.value.clone())
        };
        listener(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    fn dispatch(&self, listeners: Vec<(u64, Listener<T>)>) {
        for (id, listener) in listeners {
            let current = {
                let inner = lock(&self.inner);
                if !inner.is_registered(id) {
                    continue;
                }
                inner.value.clone()
            };
            listener(&current);
        }
    }
}

/// Guard returned by [`ObservableState::subscribe`]
///
/// The listener stays registered for as long as the guard lives.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stops notifications to this listener
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    /// Keeps the listener registered for the lifetime of the container
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
