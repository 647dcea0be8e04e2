// SPDX-License-Identifier: MIT OR Apache-2.0
//! Synchronous change listeners.

use indexmap::IndexMap;
use std::fmt;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A list of listeners notified in subscription order.
///
/// Every mutation that changes observed state calls [`Observers::notify`]
/// before returning, so listeners always see the new snapshot by the time
/// the mutating call is done.
pub struct Observers<T: ?Sized> {
    listeners: IndexMap<SubscriptionId, Listener<T>>,
    next_id: u64,
}

impl<T: ?Sized> Observers<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            listeners: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener, returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    /// Call every listener with the snapshot
    pub fn notify(&mut self, snapshot: &T) {
        for listener in self.listeners.values_mut() {
            listener(snapshot);
        }
    }

    /// Number of listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nobody listens
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
