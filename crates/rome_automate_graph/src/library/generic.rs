// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nodes whose input kind is learned from what they are wired to.
//!
//! Each factory takes the kind and metadata to bake into the generic
//! input. [`ValueKind::Any`] with no metadata is the generic shape.

use super::{GENERIC_INPUT, RESULT};
use crate::node::{NodeKind, NodePrototype};
use crate::slot::{Slot, SlotMeta, ValueKind};

const GENERIC_COLOR: [u8; 3] = [0xb7, 0xba, 0xc8];

/// Whether the input carries no value
pub fn is_null(kind: ValueKind, meta: Option<SlotMeta>) -> NodePrototype {
    NodePrototype::new(NodeKind::IsNull, "Is null", ValueKind::Bool.color(), "bolt-off")
        .with_input(Slot::new(GENERIC_INPUT, "Input", kind).with_meta(meta))
        .with_output(Slot::new(RESULT, "Result", ValueKind::Bool))
}

/// Generic shape of [`is_null`]
pub fn is_null_generic() -> NodePrototype {
    is_null(ValueKind::Any, None)
}

/// Whether both inputs carry the same value. The second input follows the first.
pub fn equals(kind: ValueKind, meta: Option<SlotMeta>) -> NodePrototype {
    NodePrototype::new(NodeKind::Equals, "Equals", GENERIC_COLOR, "equal")
        .with_input(Slot::new(GENERIC_INPUT, "Input", kind).with_meta(meta.clone()))
        .with_input(Slot::new("other", "Other", kind).with_meta(meta))
        .with_output(Slot::new(RESULT, "Result", ValueKind::Bool))
}

/// Generic shape of [`equals`]
pub fn equals_generic() -> NodePrototype {
    equals(ValueKind::Any, None)
}
