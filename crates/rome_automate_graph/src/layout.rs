// SPDX-License-Identifier: MIT OR Apache-2.0
//! Placement of nodes in editor space.

use crate::geometry::{Extent, Point, Rect};
use crate::node::NodeId;
use crate::observer::{Observers, SubscriptionId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Saved placement of one node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    /// Node id
    pub id: NodeId,
    /// Area the node covers
    pub rect: Rect,
}

fn snap_round(value: f32, grid: f32) -> f32 {
    (value / grid).round() * grid
}

fn snap_ceil(value: f32, grid: f32) -> f32 {
    (value / grid).ceil() * grid
}

/// The rectangle one node takes up, snapped to a grid
#[derive(Debug)]
pub struct LayoutStore {
    rect: Rect,
    grid: f32,
    observers: Observers<Rect>,
}

impl LayoutStore {
    /// Create a store. The initial rect is kept as given.
    pub fn new(rect: Rect, grid: f32) -> Self {
        Self {
            rect,
            grid,
            observers: Observers::new(),
        }
    }

    /// Current rect
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current origin
    pub fn origin(&self) -> Point {
        self.rect.origin
    }

    /// Move the origin to the nearest grid point.
    ///
    /// Returns false, without notifying, if the snapped origin did not change.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        let origin = Point::new(snap_round(x, self.grid), snap_round(y, self.grid));
        if self.rect.origin == origin {
            return false;
        }

        self.rect = self.rect.move_to(origin);
        self.observers.notify(&self.rect);
        true
    }

    /// Resize, rounding both sides up to the grid
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let size = Extent::new(snap_ceil(width, self.grid), snap_ceil(height, self.grid));
        if self.rect.size == size {
            return false;
        }

        self.rect = self.rect.resize(size);
        self.observers.notify(&self.rect);
        true
    }

    /// Listen to rect changes
    pub fn subscribe(&mut self, listener: impl FnMut(&Rect) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Stop listening
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

/// Layout of every node in an automation
#[derive(Debug)]
pub struct Layout {
    stores: IndexMap<NodeId, LayoutStore>,
    grid: f32,
}

impl Layout {
    /// Create an empty layout
    pub fn new(grid: f32) -> Self {
        Self {
            stores: IndexMap::new(),
            grid,
        }
    }

    /// Create a layout from saved positions
    pub fn restore(positions: impl IntoIterator<Item = NodeLayout>, grid: f32) -> Self {
        let mut layout = Self::new(grid);
        for NodeLayout { id, rect } in positions {
            layout.insert(id, rect);
        }
        layout
    }

    /// Round a point to the nearest grid point
    pub fn snap(&self, point: Point) -> Point {
        Point::new(snap_round(point.x, self.grid), snap_round(point.y, self.grid))
    }

    /// Place a node, replacing any previous placement
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.stores.insert(id, LayoutStore::new(rect, self.grid));
    }

    /// Forget a node's placement
    pub fn remove(&mut self, id: NodeId) -> Option<Rect> {
        self.stores.shift_remove(&id).map(|s| s.rect())
    }

    /// Store of one node
    pub fn get(&self, id: NodeId) -> Option<&LayoutStore> {
        self.stores.get(&id)
    }

    /// Mutable store of one node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut LayoutStore> {
        self.stores.get_mut(&id)
    }

    /// Rect of one node
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.stores.get(&id).map(LayoutStore::rect)
    }

    /// Nodes whose rect overlaps `area`
    pub fn intersecting(&self, area: &Rect) -> Vec<NodeId> {
        self.stores
            .iter()
            .filter(|(_, store)| store.rect().intersect(area).is_some())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Snapshot of every placement
    pub fn positions(&self) -> Vec<NodeLayout> {
        self.stores
            .iter()
            .map(|(id, store)| NodeLayout {
                id: *id,
                rect: store.rect(),
            })
            .collect()
    }

    /// Grid size used for snapping
    pub fn grid(&self) -> f32 {
        self.grid
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no node is placed
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
