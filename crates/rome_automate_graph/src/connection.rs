// SPDX-License-Identifier: MIT OR Apache-2.0
//! Slot references and the wires between them.

use crate::error::SlotRefParseError;
use crate::node::NodeId;
use crate::slot::{SlotDirection, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable reference to a slot, scoped to its owning node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotRef {
    /// Owning node
    pub node_id: NodeId,
    /// Slot id within the node
    pub name: String,
}

impl SlotRef {
    /// Create a new slot reference
    pub fn new(node_id: NodeId, name: impl Into<String>) -> Self {
        Self {
            node_id,
            name: name.into(),
        }
    }
}

/// Canonical string form, `[nodeId,"name"]`
impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(&(self.node_id.0, &self.name)).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for SlotRef {
    type Err = SlotRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (node_id, name): (u64, String) = serde_json::from_str(s)?;
        Ok(Self::new(NodeId(node_id), name))
    }
}

/// A wire from an output slot to an input slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Output end, where the value comes from
    pub from: SlotRef,
    /// Input end, where the value goes
    pub to: SlotRef,
}

impl Connection {
    /// Create a new connection
    pub fn new(from: SlotRef, to: SlotRef) -> Self {
        Self { from, to }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from.node_id == node_id || self.to.node_id == node_id
    }

    /// The end opposite to `local`, if `local` is one of the ends
    pub fn remote_of(&self, local: &SlotRef) -> Option<&SlotRef> {
        if self.from == *local {
            Some(&self.to)
        } else if self.to == *local {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// A wire being dragged, attached at one end only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncompleteConnection {
    /// The anchored end
    pub start: SlotRef,
    /// Which side of a node the anchored end sits on
    pub start_direction: SlotDirection,
    /// Kind of the value being dragged
    pub kind: ValueKind,
    /// Slot currently under the pointer
    pub over: Option<SlotRef>,
}

impl IncompleteConnection {
    /// Start dragging from a slot
    pub fn new(start: SlotRef, start_direction: SlotDirection, kind: ValueKind) -> Self {
        Self {
            start,
            start_direction,
            kind,
            over: None,
        }
    }

    /// Close the wire on `rest`, orienting it output to input
    pub fn complete(&self, rest: SlotRef) -> Connection {
        match self.start_direction {
            SlotDirection::Input => Connection::new(rest, self.start.clone()),
            SlotDirection::Output => Connection::new(self.start.clone(), rest),
        }
    }
}
