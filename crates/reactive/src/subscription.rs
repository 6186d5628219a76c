//! Listener registry shared by the store and the session.
//!
//! The store registers `StoreChange` listeners here and the session
//! registers render listeners for pages. Delivery follows registration order.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Handle returned by `subscribe`, used to remove the listener again.
pub type SubscriptionId = u64;

type Callback<T> = Box<dyn Fn(&T)>;

/// Ordered set of callbacks for one payload type.
pub struct SubscriptionManager<T> {
    listeners: Vec<(SubscriptionId, Callback<T>)>,
    next_id: SubscriptionId,
}

impl<T> Default for SubscriptionManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SubscriptionManager<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a callback. Ids are never reused.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false for an unknown or already removed id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn notify_all(&self, payload: &T) {
        for (_, callback) in &self.listeners {
            callback(payload);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
