// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node selection and group moves.

use crate::geometry::{Point, Rect};
use crate::layout::Layout;
use crate::node::NodeId;
use crate::observer::{Observers, SubscriptionId};
use indexmap::IndexSet;

/// The set of selected nodes.
///
/// A sticky selection survives [`SelectedStore::deselect_all`] unless
/// forced, so incidental clicks (for example on the empty canvas while a
/// context menu is open) do not drop it.
#[derive(Debug)]
pub struct SelectedStore {
    selected: IndexSet<NodeId>,
    sticky: bool,
    observers: Observers<IndexSet<NodeId>>,
}

impl SelectedStore {
    /// Create an empty selection
    pub fn new() -> Self {
        Self {
            selected: IndexSet::new(),
            sticky: true,
            observers: Observers::new(),
        }
    }

    /// Select a single node
    pub fn select_one(&mut self, id: NodeId, sticky: bool) {
        self.sticky = sticky;
        self.set(std::iter::once(id).collect());
    }

    /// Select every node whose rect overlaps `area`
    pub fn box_select(&mut self, layout: &Layout, area: &Rect, sticky: bool) {
        self.sticky = sticky;
        self.set(layout.intersecting(area).into_iter().collect());
    }

    /// Clear the selection.
    ///
    /// Does nothing for a sticky selection unless `force` is set. Returns
    /// whether the selection was cleared.
    pub fn deselect_all(&mut self, force: bool) -> bool {
        if self.sticky && !force {
            return false;
        }
        self.set(IndexSet::new());
        true
    }

    /// Drop a node that no longer exists
    pub fn forget(&mut self, id: NodeId) {
        if self.selected.contains(&id) {
            let mut next = self.selected.clone();
            next.shift_remove(&id);
            self.set(next);
        }
    }

    /// Snapshot the origins of the selected nodes to start dragging them
    pub fn start_move(&self, layout: &Layout, from: Point) -> SelectionMove {
        let origins = self
            .selected
            .iter()
            .filter_map(|id| layout.get(*id).map(|store| (*id, store.origin())))
            .collect();

        SelectionMove {
            from,
            origins,
            moved: false,
        }
    }

    /// Whether a node is selected
    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in selection order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected nodes
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the current selection is sticky
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Listen to selection changes
    pub fn subscribe(&mut self, listener: impl FnMut(&IndexSet<NodeId>) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Stop listening
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn set(&mut self, selected: IndexSet<NodeId>) {
        self.selected = selected;
        self.observers.notify(&self.selected);
    }
}

impl Default for SelectedStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-progress drag of the selected nodes
#[derive(Debug, Clone)]
pub struct SelectionMove {
    from: Point,
    origins: Vec<(NodeId, Point)>,
    moved: bool,
}

impl SelectionMove {
    /// Move every dragged node by the pointer's offset from the drag start.
    ///
    /// All nodes get the same delta from their snapshot origin, so their
    /// relative placement is kept.
    pub fn move_to(&mut self, layout: &mut Layout, to: Point) {
        let delta = self.from - to;

        for (id, origin) in &self.origins {
            if let Some(store) = layout.get_mut(*id) {
                let target = *origin - delta;
                store.move_to(target.x, target.y);
            }
        }

        if delta != Point::ZERO {
            self.moved = true;
        }
    }

    /// Whether the drag ever moved away from its start
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}
