// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bidirectional adjacency index of the wires in an automation.

use crate::connection::{Connection, SlotRef};
use crate::error::GraphInconsistency;
use crate::observer::{Observers, SubscriptionId};
use indexmap::{IndexMap, IndexSet};

type Adjacency = IndexMap<SlotRef, IndexSet<SlotRef>>;

/// Which wires exist between which slots.
///
/// Every connection is stored twice, once under its output end in
/// `outgoing` and once under its input end in `incoming`. Empty sets are
/// pruned so that a key is present exactly when the slot has a wire on
/// that side.
#[derive(Debug, Default)]
pub struct ConnectionGraph {
    outgoing: Adjacency,
    incoming: Adjacency,
    observers: Observers<[Connection]>,
}

impl ConnectionGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection and republish the connection list.
    ///
    /// Returns false, without notifying, if the wire already existed.
    pub fn add(&mut self, connection: &Connection) -> bool {
        let Connection { from, to } = connection;

        debug_assert!(
            !self.incoming.contains_key(from),
            "slot {from} is already a destination"
        );
        debug_assert!(
            !self.outgoing.contains_key(to),
            "slot {to} is already a source"
        );

        let inserted = self
            .outgoing
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.incoming
            .entry(to.clone())
            .or_default()
            .insert(from.clone());

        if inserted {
            tracing::debug!("Connected {} -> {}", from, to);
            self.publish();
        }
        inserted
    }

    /// Remove a connection and republish the connection list.
    ///
    /// Each index is cleaned independently; a side that is already missing
    /// is tolerated. Returns false if neither side knew the wire.
    pub fn remove(&mut self, connection: &Connection) -> bool {
        let Connection { from, to } = connection;

        let removed_out = Self::unlink(&mut self.outgoing, from, to);
        let removed_in = Self::unlink(&mut self.incoming, to, from);

        if removed_out != removed_in {
            tracing::warn!(
                "Asymmetric adjacency while removing {} -> {} (outgoing: {}, incoming: {})",
                from,
                to,
                removed_out,
                removed_in
            );
        }

        let removed = removed_out || removed_in;
        if removed {
            tracing::debug!("Disconnected {} -> {}", from, to);
            self.publish();
        }
        removed
    }

    fn unlink(index: &mut Adjacency, key: &SlotRef, partner: &SlotRef) -> bool {
        let Some(partners) = index.get_mut(key) else {
            return false;
        };
        let removed = partners.shift_remove(partner);
        if partners.is_empty() {
            index.shift_remove(key);
        }
        removed
    }

    /// Connections leaving an output slot
    pub fn outgoing(&self, slot: &SlotRef) -> Vec<Connection> {
        self.outgoing
            .get(slot)
            .into_iter()
            .flatten()
            .map(|to| Connection::new(slot.clone(), to.clone()))
            .collect()
    }

    /// Connections arriving at an input slot
    pub fn incoming(&self, slot: &SlotRef) -> Vec<Connection> {
        self.incoming
            .get(slot)
            .into_iter()
            .flatten()
            .map(|from| Connection::new(from.clone(), slot.clone()))
            .collect()
    }

    /// Connections touching a slot.
    ///
    /// Looks at the outgoing side first and only falls back to the incoming
    /// side when the slot sends nothing.
    pub fn get(&self, slot: &SlotRef) -> Vec<Connection> {
        if self.outgoing.contains_key(slot) {
            self.outgoing(slot)
        } else {
            self.incoming(slot)
        }
    }

    /// Whether a wire runs between two slots, in either direction
    pub fn connected(&self, a: &SlotRef, b: &SlotRef) -> bool {
        let has = |from: &SlotRef, to: &SlotRef| {
            self.outgoing
                .get(from)
                .is_some_and(|partners| partners.contains(to))
        };
        has(a, b) || has(b, a)
    }

    /// First slot on the other end of a wire
    pub fn remote(&self, slot: &SlotRef) -> Option<&SlotRef> {
        self.outgoing
            .get(slot)
            .and_then(|p| p.first())
            .or_else(|| self.incoming.get(slot).and_then(|p| p.first()))
    }

    /// Whether the slot sends at least one wire
    pub fn is_source(&self, slot: &SlotRef) -> bool {
        self.outgoing.contains_key(slot)
    }

    /// Whether the slot receives at least one wire
    pub fn is_destination(&self, slot: &SlotRef) -> bool {
        self.incoming.contains_key(slot)
    }

    /// Whether the connection can be added without a key ending up on both sides
    pub fn fits(&self, connection: &Connection) -> bool {
        !self.is_destination(&connection.from) && !self.is_source(&connection.to)
    }

    /// Whether any wire touches the slot
    pub fn has_connection(&self, slot: &SlotRef) -> bool {
        self.outgoing.contains_key(slot) || self.incoming.contains_key(slot)
    }

    /// Number of wires on the slot's side
    pub fn connection_count(&self, slot: &SlotRef) -> usize {
        self.outgoing
            .get(slot)
            .or_else(|| self.incoming.get(slot))
            .map_or(0, IndexSet::len)
    }

    /// Every connection, grouped by output slot in insertion order
    pub fn all(&self) -> Vec<Connection> {
        self.outgoing
            .iter()
            .flat_map(|(from, partners)| {
                partners
                    .iter()
                    .map(move |to| Connection::new(from.clone(), to.clone()))
            })
            .collect()
    }

    /// Total number of connections
    pub fn len(&self) -> usize {
        self.outgoing.values().map(IndexSet::len).sum()
    }

    /// Whether there are no connections
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Check that both indices describe the same set of wires
    pub fn verify(&self) -> Result<(), GraphInconsistency> {
        for (key, partners) in self.outgoing.iter().chain(self.incoming.iter()) {
            if partners.is_empty() {
                return Err(GraphInconsistency::EmptySet(key.clone()));
            }
        }

        for (from, partners) in &self.outgoing {
            if self.incoming.contains_key(from) {
                return Err(GraphInconsistency::BothSides(from.clone()));
            }
            for to in partners {
                if !self.incoming.get(to).is_some_and(|p| p.contains(from)) {
                    return Err(GraphInconsistency::MissingIncoming(Connection::new(
                        from.clone(),
                        to.clone(),
                    )));
                }
            }
        }

        for (to, partners) in &self.incoming {
            for from in partners {
                if !self.outgoing.get(from).is_some_and(|p| p.contains(to)) {
                    return Err(GraphInconsistency::MissingOutgoing(Connection::new(
                        from.clone(),
                        to.clone(),
                    )));
                }
            }
        }

        Ok(())
    }

    /// Listen to the full connection list after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&[Connection]) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Stop listening
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&mut self) {
        let snapshot = self.all();
        self.observers.notify(&snapshot);
    }
}
