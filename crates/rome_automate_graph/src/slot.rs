// SPDX-License-Identifier: MIT OR Apache-2.0
//! Slot definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};

/// Free form metadata attached to a slot, such as the possible values of a state
pub type SlotMeta = serde_json::Map<String, serde_json::Value>;

/// Slot direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotDirection {
    /// Input slot, receives a value
    Input,
    /// Output slot, sends a value
    Output,
}

/// Kind of value that flows through a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    /// Boolean value
    Bool,
    /// Numeric value
    Number,
    /// One of a set of named states
    State,
    /// Free text
    String,
    /// Not yet known, used by generic nodes
    Any,
}

impl ValueKind {
    /// Whether the kind is known
    pub fn is_concrete(self) -> bool {
        !matches!(self, Self::Any)
    }

    /// Check if a value of `other` may flow into a slot of this kind
    pub fn accepts(self, other: ValueKind) -> bool {
        self == other || !self.is_concrete() || !other.is_concrete()
    }

    /// Get the color for this kind (for UI)
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Bool => [200, 80, 80],
            Self::Number => [80, 200, 80],
            Self::State => [200, 150, 80],
            Self::String => [200, 180, 150],
            Self::Any => [150, 150, 150],
        }
    }
}

/// Literal used by an input when nothing is connected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
}

impl SlotValue {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
        }
    }
}

/// A named, typed attachment point on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier, unique among the node's slots of the same direction
    pub id: String,
    /// Display label
    pub label: String,
    /// Value kind
    pub kind: ValueKind,
    /// Whether more than one wire may attach
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    /// Default literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SlotValue>,
    /// Metadata bag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SlotMeta>,
}

impl Slot {
    /// Create a new slot
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            multiple: false,
            default: None,
            meta: None,
        }
    }

    /// Allow multiple wires
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: SlotValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the metadata
    pub fn with_meta(mut self, meta: Option<SlotMeta>) -> Self {
        self.meta = meta;
        self
    }

    /// Possible states listed in the metadata, if any
    pub fn possible_states(&self) -> Vec<String> {
        possible_states(self.meta.as_ref())
    }
}

/// The `possible` list of a state's metadata
pub fn possible_states(meta: Option<&SlotMeta>) -> Vec<String> {
    meta.and_then(|m| m.get("possible"))
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
