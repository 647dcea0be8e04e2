// SPDX-License-Identifier: MIT OR Apache-2.0
//! Storage of the node instances of one automation.

use crate::connection::SlotRef;
use crate::node::{Node, NodeId};
use crate::observer::{Observers, SubscriptionId};
use crate::slot::Slot;
use indexmap::IndexMap;

/// First id handed out by a fresh registry
pub const FIRST_NODE_ID: u64 = 1;

/// Owns the nodes and allocates their ids.
///
/// The counter only ever increases, so an id is never handed out twice
/// within a session, even after the node holding it was removed.
#[derive(Debug)]
pub struct NodeRegistry {
    nodes: IndexMap<NodeId, Node>,
    counter: u64,
    observers: Observers<[Node]>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            counter: FIRST_NODE_ID,
            observers: Observers::new(),
        }
    }

    /// Rebuild a registry from saved nodes.
    ///
    /// The counter is raised past every restored id if needed.
    pub fn restore(nodes: impl IntoIterator<Item = Node>, counter: u64) -> Self {
        let nodes: IndexMap<NodeId, Node> = nodes.into_iter().map(|n| (n.id, n)).collect();
        let past_max = nodes.keys().map(|id| id.0 + 1).max().unwrap_or(FIRST_NODE_ID);

        Self {
            nodes,
            counter: counter.max(past_max),
            observers: Observers::new(),
        }
    }

    /// Hand out the next id
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.counter);
        self.counter += 1;
        id
    }

    /// The next id that will be allocated
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Store a node, replacing any node with the same id in place
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        let previous = self.nodes.insert(node.id, node);
        self.publish();
        previous
    }

    /// Take a node out of the registry
    pub fn take(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&id)?;
        self.publish();
        Some(node)
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a slot, trying the node's inputs and then its outputs
    pub fn get_slot(&self, slot: &SlotRef) -> Option<&Slot> {
        self.nodes.get(&slot.node_id)?.slot(&slot.name)
    }

    /// Whether a node exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// The target node, if the automation has one
    pub fn target(&self) -> Option<&Node> {
        self.nodes.values().find(|n| n.target)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Listen to the full node list after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&[Node]) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Stop listening
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&mut self) {
        let snapshot: Vec<Node> = self.nodes.values().cloned().collect();
        self.observers.notify(&snapshot);
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, NodePrototype};
    use crate::slot::ValueKind;

    fn proto() -> NodePrototype {
        NodePrototype::new(NodeKind::Not, "Not", [0, 0, 0], "logic-not")
            .with_input(Slot::new("input", "Input", ValueKind::Bool))
            .with_output(Slot::new("result", "Result", ValueKind::Bool))
    }

    #[test]
    fn test_allocate_is_monotonic() {
        let mut registry = NodeRegistry::new();
        let a = registry.allocate();
        let b = registry.allocate();
        assert_eq!(a, NodeId(FIRST_NODE_ID));
        assert!(b > a);
    }

    #[test]
    fn test_restore_raises_counter() {
        let nodes = vec![proto().materialize(NodeId(3)), proto().materialize(NodeId(9))];
        let mut registry = NodeRegistry::restore(nodes.clone(), 2);
        assert_eq!(registry.allocate(), NodeId(10));

        let mut registry = NodeRegistry::restore(nodes, 40);
        assert_eq!(registry.allocate(), NodeId(40));
    }

    #[test]
    fn test_get_slot() {
        let mut registry = NodeRegistry::new();
        let id = registry.allocate();
        registry.insert(proto().materialize(id));

        assert_eq!(registry.get_slot(&SlotRef::new(id, "result")).map(|s| s.kind), Some(ValueKind::Bool));
        assert!(registry.get_slot(&SlotRef::new(id, "nope")).is_none());
        assert!(registry.get_slot(&SlotRef::new(NodeId(99), "input")).is_none());
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut registry = NodeRegistry::new();
        let a = registry.allocate();
        let b = registry.allocate();
        registry.insert(proto().materialize(a));
        registry.insert(proto().materialize(b));

        let mut replacement = proto();
        replacement.label = "Replaced".into();
        assert!(registry.insert(replacement.materialize(a)).is_some());

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(registry.get(a).map(|n| n.label.as_str()), Some("Replaced"));
    }
}
