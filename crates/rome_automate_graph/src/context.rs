// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editing session of one automation.
//!
//! [`Context`] binds the node registry, the connection graph, the layout and
//! the selection together. Every public mutation runs to completion,
//! including cascading removals and specialization hooks, and listeners are
//! notified before it returns.

use crate::config::EditorConfig;
use crate::connection::{Connection, IncompleteConnection, SlotRef};
use crate::diff::SlotDiff;
use crate::error::ConnectError;
use crate::geometry::{Point, Rect};
use crate::graph::ConnectionGraph;
use crate::layout::Layout;
use crate::node::{Node, NodeId, NodePrototype};
use crate::observer::SubscriptionId;
use crate::registry::NodeRegistry;
use crate::selection::{SelectedStore, SelectionMove};
use crate::slot::{SlotDirection, SlotValue};
use crate::specialize::{self, ConnectionEvent};
use indexmap::{IndexMap, IndexSet};

/// Editing session of one automation
#[derive(Debug)]
pub struct Context {
    pub(crate) config: EditorConfig,
    pointer: Point,
    started_connection: Option<IncompleteConnection>,
    anchors: IndexMap<SlotRef, Point>,
    pub(crate) layout: Layout,
    selected: SelectedStore,
    pub(crate) nodes: NodeRegistry,
    pub(crate) connections: ConnectionGraph,
}

impl Context {
    /// Create an empty session with the default configuration
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty session
    pub fn with_config(config: EditorConfig) -> Self {
        let layout = Layout::new(config.grid_size);
        Self::from_parts(config, NodeRegistry::new(), ConnectionGraph::new(), layout)
    }

    pub(crate) fn from_parts(
        config: EditorConfig,
        nodes: NodeRegistry,
        connections: ConnectionGraph,
        layout: Layout,
    ) -> Self {
        Self {
            config,
            pointer: Point::ZERO,
            started_connection: None,
            anchors: IndexMap::new(),
            layout,
            selected: SelectedStore::new(),
            nodes,
            connections,
        }
    }

    /// Editor configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The nodes
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    /// The wires
    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    /// Node placement
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Node placement, for subscribing to single nodes
    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// The selection
    pub fn selection(&self) -> &SelectedStore {
        &self.selected
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    /// Add a node under the pointer, or at `origin`.
    ///
    /// The node is offset so its header sits under the spawn point and it
    /// can be dragged right away. The origin is snapped to the grid.
    pub fn add_node(&mut self, prototype: NodePrototype, origin: Option<Point>) -> NodeId {
        let id = self.nodes.allocate();
        let spawn = self
            .layout
            .snap(origin.unwrap_or(self.pointer) + self.config.spawn_offset);

        self.layout.insert(id, Rect::new(spawn, self.config.node_extent));
        self.nodes.insert(prototype.materialize(id));

        tracing::debug!("Added node {}", id);
        id
    }

    /// Replace a node in place, keeping its id.
    ///
    /// Wires on slots the new prototype drops are removed. For slots whose
    /// kind changed, the node on the other end of every wire gets its hook
    /// run again so it can follow the new kind. Returns false if the node
    /// does not exist.
    pub fn replace_node(&mut self, id: NodeId, prototype: NodePrototype) -> bool {
        let Some(old) = self.nodes.get(id) else {
            tracing::debug!("Not replacing missing node {}", id);
            return false;
        };

        let node = prototype.materialize(id);
        let mut removed = Vec::new();
        let mut retyped = Vec::new();

        for (direction, old_slots, new_slots) in [
            (SlotDirection::Input, &old.inputs, &node.inputs),
            (SlotDirection::Output, &old.outputs, &node.outputs),
        ] {
            let diff = SlotDiff::new(old_slots, new_slots);
            removed.extend(diff.removed.iter().map(|s| (direction, SlotRef::new(id, &s.id))));
            retyped.extend(diff.retyped().map(|s| (direction, SlotRef::new(id, &s.id))));
        }

        self.nodes.insert(node);
        tracing::debug!(
            "Replaced node {} ({} slots removed, {} retyped)",
            id,
            removed.len(),
            retyped.len()
        );

        for (direction, slot) in removed {
            for connection in self.connections_on(direction, &slot) {
                self.disconnect(&connection);
            }
        }

        for (direction, slot) in retyped {
            for connection in self.connections_on(direction, &slot) {
                if let Some(remote) = connection.remote_of(&slot) {
                    self.dispatch(ConnectionEvent::Added, remote, &slot);
                }
            }
        }

        true
    }

    /// Remove a node and every wire touching it.
    ///
    /// The target node and missing nodes are left alone and `None` is
    /// returned.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get(id)?;
        if node.target {
            tracing::warn!("Refusing to remove target node {}", id);
            return None;
        }

        let slots: Vec<_> = node
            .slots()
            .map(|(direction, slot)| (direction, node.slot_ref(&slot.id)))
            .collect();

        for (direction, slot) in slots {
            for connection in self.connections_on(direction, &slot) {
                self.disconnect(&connection);
            }
        }

        self.layout.remove(id);
        self.selected.forget(id);
        self.anchors.retain(|slot, _| slot.node_id != id);

        tracing::debug!("Removed node {}", id);
        self.nodes.take(id)
    }

    // -------------------------------------------------------------------------
    // Connections
    // -------------------------------------------------------------------------

    /// Add a wire without validation, then run the hooks of both ends.
    ///
    /// Returns false if the wire already existed.
    pub fn connect(&mut self, connection: &Connection) -> bool {
        if !self.connections.add(connection) {
            return false;
        }
        debug_assert_eq!(self.connections.verify(), Ok(()));

        self.dispatch(ConnectionEvent::Added, &connection.from, &connection.to);
        self.dispatch(ConnectionEvent::Added, &connection.to, &connection.from);
        true
    }

    /// Remove a wire, then run the hooks of both ends.
    ///
    /// Returns false if the wire did not exist.
    pub fn disconnect(&mut self, connection: &Connection) -> bool {
        if !self.connections.remove(connection) {
            return false;
        }
        debug_assert_eq!(self.connections.verify(), Ok(()));

        self.dispatch(ConnectionEvent::Removed, &connection.from, &connection.to);
        self.dispatch(ConnectionEvent::Removed, &connection.to, &connection.from);
        true
    }

    /// Add a wire the way the editor does, checking it first
    pub fn try_connect(&mut self, connection: &Connection) -> Result<(), ConnectError> {
        self.check_connection(connection)?;
        self.connect(connection);
        Ok(())
    }

    /// Validate a wire without adding it
    pub fn check_connection(&self, connection: &Connection) -> Result<(), ConnectError> {
        let Connection { from, to } = connection;

        let from_node = self
            .nodes
            .get(from.node_id)
            .ok_or(ConnectError::NodeNotFound(from.node_id))?;
        let to_node = self
            .nodes
            .get(to.node_id)
            .ok_or(ConnectError::NodeNotFound(to.node_id))?;

        let from_slot = from_node
            .output(&from.name)
            .ok_or_else(|| ConnectError::SlotNotFound(from.clone()))?;
        let to_slot = to_node
            .input(&to.name)
            .ok_or_else(|| ConnectError::SlotNotFound(to.clone()))?;

        if from.node_id == to.node_id {
            return Err(ConnectError::SelfLoop);
        }

        if self.connections.connected(from, to) {
            return Err(ConnectError::Duplicate(connection.clone()));
        }

        if self.connections.is_destination(from) {
            return Err(ConnectError::SlotUsedOnBothSides(from.clone()));
        }
        if self.connections.is_source(to) {
            return Err(ConnectError::SlotUsedOnBothSides(to.clone()));
        }

        if !to_slot.kind.accepts(from_slot.kind) {
            return Err(ConnectError::IncompatibleKinds {
                from: from_slot.kind,
                to: to_slot.kind,
            });
        }

        if !to_slot.multiple && self.connections.is_destination(to) {
            return Err(ConnectError::SlotAlreadyConnected(to.clone()));
        }

        Ok(())
    }

    /// Start dragging a wire from a slot. Returns false if the slot does not exist.
    pub fn start_connection(&mut self, start: SlotRef, direction: SlotDirection) -> bool {
        let Some(kind) = self
            .nodes
            .get(start.node_id)
            .and_then(|n| n.slot_in(direction, &start.name))
            .map(|s| s.kind)
        else {
            return false;
        };

        self.started_connection = Some(IncompleteConnection::new(start, direction, kind));
        true
    }

    /// Track the slot under the pointer while dragging
    pub fn hover_connection(&mut self, over: Option<SlotRef>) {
        if let Some(started) = &mut self.started_connection {
            started.over = over;
        }
    }

    /// The wire being dragged
    pub fn started_connection(&self) -> Option<&IncompleteConnection> {
        self.started_connection.as_ref()
    }

    /// Drop the wire being dragged
    pub fn cancel_connection(&mut self) -> Option<IncompleteConnection> {
        self.started_connection.take()
    }

    /// Finish the dragged wire on `over` through [`Context::try_connect`].
    ///
    /// The drag ends whether or not the wire was accepted.
    pub fn complete_connection(&mut self, over: SlotRef) -> Result<Connection, ConnectError> {
        let started = self.started_connection.take().ok_or(ConnectError::NotStarted)?;
        let connection = started.complete(over);
        self.try_connect(&connection)?;
        Ok(connection)
    }

    fn connections_on(&self, direction: SlotDirection, slot: &SlotRef) -> Vec<Connection> {
        match direction {
            SlotDirection::Input => self.connections.incoming(slot),
            SlotDirection::Output => self.connections.outgoing(slot),
        }
    }

    /// Run the hook of the node owning `local`, if that slot still exists
    fn dispatch(&mut self, event: ConnectionEvent, local: &SlotRef, remote: &SlotRef) {
        let exists = self
            .nodes
            .get(local.node_id)
            .is_some_and(|n| n.slot(&local.name).is_some());
        if exists {
            specialize::on_connection_event(self, event, local, remote);
        }
    }

    // -------------------------------------------------------------------------
    // Pointer and anchors
    // -------------------------------------------------------------------------

    /// Pointer position in editor space
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Update the pointer position
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Record where a slot's anchor is drawn
    pub fn set_anchor(&mut self, slot: SlotRef, position: Point) {
        self.anchors.insert(slot, position);
    }

    /// Where a slot's anchor is drawn, the origin if never recorded
    pub fn anchor(&self, slot: &SlotRef) -> Point {
        self.anchors.get(slot).copied().unwrap_or(Point::ZERO)
    }

    /// Both ends of a wire, for drawing it
    pub fn wire(&self, connection: &Connection) -> (Point, Point) {
        (self.anchor(&connection.from), self.anchor(&connection.to))
    }

    /// Value an input uses: its default literal, when nothing is wired to it
    pub fn unconnected_default(&self, slot: &SlotRef) -> Option<&SlotValue> {
        if self.connections.has_connection(slot) {
            return None;
        }
        self.nodes.get(slot.node_id)?.input(&slot.name)?.default.as_ref()
    }

    // -------------------------------------------------------------------------
    // Layout and selection
    // -------------------------------------------------------------------------

    /// Move a node, snapping to the grid
    pub fn move_node(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        self.layout.get_mut(id).is_some_and(|s| s.move_to(x, y))
    }

    /// Resize a node, rounding up to the grid
    pub fn resize_node(&mut self, id: NodeId, width: f32, height: f32) -> bool {
        self.layout.get_mut(id).is_some_and(|s| s.resize(width, height))
    }

    /// Select a single node. Returns false if the node does not exist.
    pub fn select_one(&mut self, id: NodeId, sticky: bool) -> bool {
        if !self.nodes.contains(id) {
            return false;
        }
        self.selected.select_one(id, sticky);
        true
    }

    /// Select every node overlapping `area`
    pub fn box_select(&mut self, area: &Rect, sticky: bool) {
        self.selected.box_select(&self.layout, area, sticky);
    }

    /// Clear a non-sticky selection, or any selection when forced
    pub fn deselect_all(&mut self, force: bool) -> bool {
        self.selected.deselect_all(force)
    }

    /// Start dragging the selected nodes
    pub fn start_move(&self, from: Point) -> SelectionMove {
        self.selected.start_move(&self.layout, from)
    }

    /// Continue a drag started by [`Context::start_move`]
    pub fn move_selection(&mut self, drag: &mut SelectionMove, to: Point) {
        drag.move_to(&mut self.layout, to);
    }

    /// Remove every selected node except the target
    pub fn remove_selected(&mut self) -> Vec<Node> {
        let ids: Vec<_> = self.selected.iter().collect();
        ids.into_iter().filter_map(|id| self.remove_node(id)).collect()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Listen to the node list
    pub fn subscribe_nodes(&mut self, listener: impl FnMut(&[Node]) + 'static) -> SubscriptionId {
        self.nodes.subscribe(listener)
    }

    /// Listen to the connection list
    pub fn subscribe_connections(&mut self, listener: impl FnMut(&[Connection]) + 'static) -> SubscriptionId {
        self.connections.subscribe(listener)
    }

    /// Listen to the selection
    pub fn subscribe_selection(&mut self, listener: impl FnMut(&IndexSet<NodeId>) + 'static) -> SubscriptionId {
        self.selected.subscribe(listener)
    }

    /// Stop listening to the node list
    pub fn unsubscribe_nodes(&mut self, id: SubscriptionId) -> bool {
        self.nodes.unsubscribe(id)
    }

    /// Stop listening to the connection list
    pub fn unsubscribe_connections(&mut self, id: SubscriptionId) -> bool {
        self.connections.unsubscribe(id)
    }

    /// Stop listening to the selection
    pub fn unsubscribe_selection(&mut self, id: SubscriptionId) -> bool {
        self.selected.unsubscribe(id)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;
    use crate::library::{device, generic, logic, math, GENERIC_INPUT, RESULT};
    use crate::node::NodeKind;
    use crate::slot::{Slot, ValueKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn lamp() -> device::DeviceDescriptor {
        device::DeviceDescriptor::new("lamp", "Lamp")
            .with_feature(device::FeatureDescriptor::new(
                "on",
                "On",
                device::FeatureDirection::SourceSink,
                ValueKind::Bool,
            ))
            .with_feature(device::FeatureDescriptor::new(
                "brightness",
                "Brightness",
                device::FeatureDirection::Source,
                ValueKind::Number,
            ))
    }

    #[test]
    fn test_add_places_under_pointer() {
        let mut ctx = Context::new();
        ctx.set_pointer(Point::new(300.0, 200.0));
        let id = ctx.add_node(logic::and(), None);

        assert_eq!(ctx.layout().rect(id), Some(Rect::numbers(200.0, 180.0, 200.0, 200.0)));

        let other = ctx.add_node(logic::or(), Some(Point::new(100.0, 15.0)));
        assert_eq!(ctx.layout().rect(other).map(|r| r.origin), Some(Point::ZERO));
    }

    #[test]
    fn test_ids_never_reused() {
        let mut ctx = Context::new();
        let a = ctx.add_node(logic::and(), None);
        let b = ctx.add_node(logic::or(), None);
        ctx.remove_node(b);
        let c = ctx.add_node(logic::not(), None);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_cascades() {
        let mut ctx = Context::new();
        let lamp = ctx.add_node(device::device(&lamp()), None);
        let and = ctx.add_node(logic::and(), None);
        let not = ctx.add_node(logic::not(), None);

        ctx.connect(&Connection::new(SlotRef::new(lamp, "on"), SlotRef::new(and, "input")));
        ctx.connect(&Connection::new(SlotRef::new(and, RESULT), SlotRef::new(not, "input")));
        ctx.select_one(and, true);
        ctx.set_anchor(SlotRef::new(and, RESULT), Point::new(1.0, 1.0));

        let removed = ctx.remove_node(and).unwrap();
        assert_eq!(removed.id, and);
        assert!(ctx.connections().is_empty());
        assert!(ctx.nodes().get(and).is_none());
        assert!(ctx.layout().rect(and).is_none());
        assert!(ctx.selection().is_empty());
        assert_eq!(ctx.anchor(&SlotRef::new(and, RESULT)), Point::ZERO);
    }

    #[test]
    fn test_target_cannot_be_removed() {
        let mut ctx = Context::new();
        let features = lamp().features;
        let target = ctx.add_node(device::target(&features[0]), None);
        let source = ctx.add_node(device::device(&lamp()), None);
        let wire = Connection::new(SlotRef::new(source, "on"), SlotRef::new(target, "on"));
        ctx.connect(&wire);

        assert!(ctx.remove_node(target).is_none());
        assert!(ctx.nodes().get(target).is_some());
        assert!(ctx.connections().connected(&wire.from, &wire.to));
    }

    #[test]
    fn test_remove_missing_node() {
        let mut ctx = Context::new();
        assert!(ctx.remove_node(NodeId(42)).is_none());
        assert!(!ctx.replace_node(NodeId(42), logic::not()));
    }

    #[test]
    fn test_replace_drops_removed_slot_wires() {
        let mut ctx = Context::new();
        let src = ctx.add_node(device::device(&lamp()), None);
        let cmp = ctx.add_node(math::compare("Eq"), None);
        ctx.connect(&Connection::new(SlotRef::new(src, "brightness"), SlotRef::new(cmp, "input")));
        ctx.connect(&Connection::new(SlotRef::new(src, "brightness"), SlotRef::new(cmp, "other")));

        let mut reduced = math::compare("Eq");
        reduced.inputs.retain(|s| s.id != "other");
        assert!(ctx.replace_node(cmp, reduced));

        assert_eq!(ctx.connections().len(), 1);
        assert!(!ctx.connections().has_connection(&SlotRef::new(cmp, "other")));
        assert!(ctx.connections().has_connection(&SlotRef::new(cmp, "input")));
    }

    #[test]
    fn test_replace_keeps_wires_on_kept_side() {
        let mut ctx = Context::new();
        let src = ctx.add_node(device::device(&lamp()), None);
        let mid = ctx.add_node(logic::not(), None);
        let sink = ctx.add_node(logic::and(), None);

        let incoming = Connection::new(SlotRef::new(src, "on"), SlotRef::new(mid, "input"));
        let outgoing = Connection::new(SlotRef::new(mid, RESULT), SlotRef::new(sink, "input"));
        ctx.connect(&incoming);
        ctx.connect(&outgoing);

        let mut proto = ctx.nodes().get(mid).unwrap().prototype();
        proto.outputs.clear();
        ctx.replace_node(mid, proto);

        assert_eq!(ctx.connections().len(), 1);
        assert!(!ctx.connections().connected(&outgoing.from, &outgoing.to));
        assert!(ctx.connections().connected(&incoming.from, &incoming.to));
    }

    #[test]
    fn test_try_connect_rules() {
        let mut ctx = Context::new();
        let src = ctx.add_node(device::device(&lamp()), None);
        let not = ctx.add_node(logic::not(), None);
        let and = ctx.add_node(logic::and(), None);

        let on = SlotRef::new(src, "on");
        let brightness = SlotRef::new(src, "brightness");
        let not_in = SlotRef::new(not, "input");

        assert!(matches!(
            ctx.try_connect(&Connection::new(not_in.clone(), on.clone())),
            Err(ConnectError::SlotNotFound(_))
        ));
        assert!(matches!(
            ctx.try_connect(&Connection::new(brightness.clone(), not_in.clone())),
            Err(ConnectError::IncompatibleKinds { .. })
        ));
        assert!(matches!(
            ctx.try_connect(&Connection::new(SlotRef::new(not, RESULT), not_in.clone())),
            Err(ConnectError::SelfLoop)
        ));
        assert!(matches!(
            ctx.try_connect(&Connection::new(on.clone(), SlotRef::new(NodeId(99), "input"))),
            Err(ConnectError::NodeNotFound(NodeId(99)))
        ));

        ctx.try_connect(&Connection::new(on.clone(), not_in.clone())).unwrap();
        assert!(matches!(
            ctx.try_connect(&Connection::new(on.clone(), not_in.clone())),
            Err(ConnectError::Duplicate(_))
        ));
        assert!(matches!(
            ctx.try_connect(&Connection::new(SlotRef::new(and, RESULT), not_in.clone())),
            Err(ConnectError::SlotAlreadyConnected(_))
        ));

        // Multiple inputs take many wires, outputs fan out
        let and_in = SlotRef::new(and, "input");
        ctx.try_connect(&Connection::new(on.clone(), and_in.clone())).unwrap();
        ctx.try_connect(&Connection::new(SlotRef::new(not, RESULT), and_in.clone())).unwrap();
        assert_eq!(ctx.connections().connection_count(&and_in), 2);
        assert_eq!(ctx.connections().connection_count(&on), 2);
    }

    /// Node whose input and output are both named "v"
    fn pass_through() -> NodePrototype {
        NodePrototype::new(NodeKind::StaticValue, "Pass", [0, 0, 0], "x")
            .with_input(Slot::new("v", "In", ValueKind::Bool))
            .with_output(Slot::new("v", "Out", ValueKind::Bool))
    }

    #[test]
    fn test_shared_slot_name_rejected_as_source() {
        let mut ctx = Context::new();
        let and = ctx.add_node(logic::and(), None);
        let pass = ctx.add_node(pass_through(), None);
        let not = ctx.add_node(logic::not(), None);
        let shared = SlotRef::new(pass, "v");

        ctx.try_connect(&Connection::new(SlotRef::new(and, RESULT), shared.clone())).unwrap();
        assert!(matches!(
            ctx.try_connect(&Connection::new(shared.clone(), SlotRef::new(not, "input"))),
            Err(ConnectError::SlotUsedOnBothSides(slot)) if slot == shared
        ));
        assert_eq!(ctx.connections().len(), 1);
        assert_eq!(ctx.connections().verify(), Ok(()));
    }

    #[test]
    fn test_shared_slot_name_rejected_as_destination() {
        let mut ctx = Context::new();
        let pass = ctx.add_node(pass_through(), None);
        let not = ctx.add_node(logic::not(), None);
        let and = ctx.add_node(logic::and(), None);
        let shared = SlotRef::new(pass, "v");

        ctx.try_connect(&Connection::new(shared.clone(), SlotRef::new(not, "input"))).unwrap();
        assert!(matches!(
            ctx.try_connect(&Connection::new(SlotRef::new(and, RESULT), shared.clone())),
            Err(ConnectError::SlotUsedOnBothSides(slot)) if slot == shared
        ));
        assert_eq!(ctx.connections().len(), 1);
    }

    #[test]
    fn test_drag_to_connect() {
        let mut ctx = Context::new();
        let src = ctx.add_node(device::device(&lamp()), None);
        let null = ctx.add_node(generic::is_null_generic(), None);
        let input = SlotRef::new(null, GENERIC_INPUT);

        assert!(matches!(
            ctx.complete_connection(input.clone()),
            Err(ConnectError::NotStarted)
        ));

        assert!(ctx.start_connection(input.clone(), SlotDirection::Input));
        assert_eq!(ctx.started_connection().map(|s| s.kind), Some(ValueKind::Any));
        ctx.hover_connection(Some(SlotRef::new(src, "brightness")));

        let wire = ctx.complete_connection(SlotRef::new(src, "brightness")).unwrap();
        assert_eq!(wire.from, SlotRef::new(src, "brightness"));
        assert!(ctx.started_connection().is_none());
        assert_eq!(ctx.nodes().get_slot(&input).map(|s| s.kind), Some(ValueKind::Number));

        assert!(!ctx.start_connection(SlotRef::new(src, "nope"), SlotDirection::Output));
    }

    #[test]
    fn test_observers_notified_before_return() {
        let mut ctx = Context::new();
        let nodes = Rc::new(RefCell::new(0));
        let wires = Rc::new(RefCell::new(0));

        let n = Rc::clone(&nodes);
        let handle = ctx.subscribe_nodes(move |list| *n.borrow_mut() = list.len());
        let w = Rc::clone(&wires);
        ctx.subscribe_connections(move |list| *w.borrow_mut() = list.len());

        let src = ctx.add_node(device::device(&lamp()), None);
        let not = ctx.add_node(logic::not(), None);
        assert_eq!(*nodes.borrow(), 2);

        ctx.connect(&Connection::new(SlotRef::new(src, "on"), SlotRef::new(not, "input")));
        assert_eq!(*wires.borrow(), 1);

        ctx.remove_node(src);
        assert_eq!(*nodes.borrow(), 1);
        assert_eq!(*wires.borrow(), 0);

        assert!(ctx.unsubscribe_nodes(handle));
        ctx.add_node(logic::and(), None);
        assert_eq!(*nodes.borrow(), 1);
    }

    #[test]
    fn test_wire_endpoints() {
        let mut ctx = Context::new();
        let wire = Connection::new(SlotRef::new(NodeId(1), "o"), SlotRef::new(NodeId(2), "i"));
        ctx.set_anchor(wire.from.clone(), Point::new(10.0, 20.0));
        assert_eq!(ctx.wire(&wire), (Point::new(10.0, 20.0), Point::ZERO));
    }

    #[test]
    fn test_unconnected_default() {
        let mut ctx = Context::new();
        let src = ctx.add_node(device::device(&lamp()), None);
        let cmp = ctx.add_node(math::compare("Gt"), None);
        let other = SlotRef::new(cmp, "other");

        assert_eq!(ctx.unconnected_default(&other), Some(&SlotValue::Number(10.0)));
        ctx.connect(&Connection::new(SlotRef::new(src, "brightness"), other.clone()));
        assert_eq!(ctx.unconnected_default(&other), None);
    }

    #[test]
    fn test_layout_and_selection_through_context() {
        let mut ctx = Context::new();
        let a = ctx.add_node(logic::and(), Some(Point::new(100.0, 15.0)));
        let b = ctx.add_node(logic::or(), Some(Point::new(400.0, 15.0)));

        assert!(ctx.resize_node(a, 90.0, 90.0));
        assert_eq!(ctx.layout().rect(a).map(|r| r.size), Some(Extent::new(100.0, 100.0)));
        assert!(!ctx.move_node(a, 4.0, -3.0));
        assert!(!ctx.select_one(NodeId(77), true));

        ctx.box_select(&Rect::numbers(-10.0, -10.0, 1000.0, 50.0), false);
        assert_eq!(ctx.selection().count(), 2);

        let mut drag = ctx.start_move(Point::ZERO);
        ctx.move_selection(&mut drag, Point::new(40.0, 40.0));
        assert_eq!(ctx.layout().rect(a).map(|r| r.origin), Some(Point::new(40.0, 40.0)));
        assert_eq!(ctx.layout().rect(b).map(|r| r.origin), Some(Point::new(340.0, 40.0)));

        assert_eq!(ctx.remove_selected().len(), 2);
        assert!(ctx.nodes().is_empty());
    }
}
