// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the automation graph.

use crate::connection::SlotRef;
use crate::slot::{Slot, SlotDirection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node, allocated from a monotonic counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node does, used to dispatch connection events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Outputs the source features of a device
    Device {
        /// Device name
        device: String,
    },
    /// The automation sink
    Target {
        /// Feature written by the automation
        feature: String,
    },
    /// A constant
    StaticValue,
    /// Whether the input carries no value
    IsNull,
    /// Whether both inputs carry the same value
    Equals,
    /// Compare a state against a chosen possibility
    StateCompare,
    /// Compare two numbers
    MathCompare,
    /// Largest input
    Max,
    /// Smallest input
    Min,
    /// Logical and
    And,
    /// Logical or
    Or,
    /// Exactly one input true
    Xor,
    /// Logical not
    Not,
    /// Holds true until reset
    Latch,
    /// Flips on every rising edge
    Toggle,
}

/// Opaque descriptor of a node's settings editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Editor widget name
    pub editor: String,
    /// Properties handed to the editor
    pub props: serde_json::Value,
}

impl Settings {
    /// Create a settings descriptor
    pub fn new(editor: impl Into<String>, props: serde_json::Value) -> Self {
        Self {
            editor: editor.into(),
            props,
        }
    }
}

/// Template used to create or replace a node, a [`Node`] without its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePrototype {
    /// What the node does
    pub kind: NodeKind,
    /// Display label
    pub label: String,
    /// Header color
    pub color: [u8; 3],
    /// Icon name
    pub icon: String,
    /// Input slots
    pub inputs: Vec<Slot>,
    /// Output slots
    pub outputs: Vec<Slot>,
    /// Settings editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Marks the undeletable automation sink
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub target: bool,
}

impl NodePrototype {
    /// Create an empty prototype
    pub fn new(kind: NodeKind, label: impl Into<String>, color: [u8; 3], icon: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            color,
            icon: icon.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            settings: None,
            target: false,
        }
    }

    /// Append an input slot
    pub fn with_input(mut self, slot: Slot) -> Self {
        self.inputs.push(slot);
        self
    }

    /// Append an output slot
    pub fn with_output(mut self, slot: Slot) -> Self {
        self.outputs.push(slot);
        self
    }

    /// Set the settings editor
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Mark as the automation target
    pub fn as_target(mut self) -> Self {
        self.target = true;
        self
    }

    /// Turn the prototype into a node with the given id
    pub fn materialize(self, id: NodeId) -> Node {
        Node {
            id,
            kind: self.kind,
            label: self.label,
            color: self.color,
            icon: self.icon,
            inputs: self.inputs,
            outputs: self.outputs,
            settings: self.settings,
            target: self.target,
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance id
    pub id: NodeId,
    /// What the node does
    pub kind: NodeKind,
    /// Display label
    pub label: String,
    /// Header color
    pub color: [u8; 3],
    /// Icon name
    pub icon: String,
    /// Input slots
    pub inputs: Vec<Slot>,
    /// Output slots
    pub outputs: Vec<Slot>,
    /// Settings editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Marks the undeletable automation sink
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub target: bool,
}

impl Node {
    /// Strip the id, giving back the template
    pub fn prototype(&self) -> NodePrototype {
        NodePrototype {
            kind: self.kind.clone(),
            label: self.label.clone(),
            color: self.color,
            icon: self.icon.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            settings: self.settings.clone(),
            target: self.target,
        }
    }

    /// Get an input slot by id
    pub fn input(&self, id: &str) -> Option<&Slot> {
        self.inputs.iter().find(|s| s.id == id)
    }

    /// Get an output slot by id
    pub fn output(&self, id: &str) -> Option<&Slot> {
        self.outputs.iter().find(|s| s.id == id)
    }

    /// Get a slot by id, inputs first
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.input(id).or_else(|| self.output(id))
    }

    /// Get a slot by id on one side only
    pub fn slot_in(&self, direction: SlotDirection, id: &str) -> Option<&Slot> {
        match direction {
            SlotDirection::Input => self.input(id),
            SlotDirection::Output => self.output(id),
        }
    }

    /// Reference to one of this node's slots
    pub fn slot_ref(&self, id: impl Into<String>) -> SlotRef {
        SlotRef::new(self.id, id)
    }

    /// All slots with their direction, inputs first
    pub fn slots(&self) -> impl Iterator<Item = (SlotDirection, &Slot)> {
        self.inputs
            .iter()
            .map(|s| (SlotDirection::Input, s))
            .chain(self.outputs.iter().map(|s| (SlotDirection::Output, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::ValueKind;

    fn sample() -> NodePrototype {
        NodePrototype::new(NodeKind::Not, "Not", [1, 2, 3], "logic-not")
            .with_input(Slot::new("input", "Input", ValueKind::Bool))
            .with_output(Slot::new("result", "Result", ValueKind::Bool))
    }

    #[test]
    fn test_materialize_and_back() {
        let proto = sample();
        let node = proto.clone().materialize(NodeId(4));
        assert_eq!(node.id, NodeId(4));
        assert_eq!(node.prototype(), proto);
    }

    #[test]
    fn test_slot_lookup_prefers_inputs() {
        let node = NodePrototype::new(NodeKind::StaticValue, "Same", [0, 0, 0], "x")
            .with_input(Slot::new("v", "In", ValueKind::Number))
            .with_output(Slot::new("v", "Out", ValueKind::Bool))
            .materialize(NodeId(1));

        assert_eq!(node.slot("v").map(|s| s.kind), Some(ValueKind::Number));
        assert_eq!(
            node.slot_in(SlotDirection::Output, "v").map(|s| s.kind),
            Some(ValueKind::Bool)
        );
        assert!(node.slot("missing").is_none());
    }

    #[test]
    fn test_slots_iterates_inputs_then_outputs() {
        let node = sample().materialize(NodeId(1));
        let dirs: Vec<_> = node.slots().map(|(d, s)| (d, s.id.as_str())).collect();
        assert_eq!(
            dirs,
            vec![(SlotDirection::Input, "input"), (SlotDirection::Output, "result")]
        );
    }
}
