// SPDX-License-Identifier: MIT OR Apache-2.0
//! Boolean logic nodes.

use super::RESULT;
use crate::node::{NodeKind, NodePrototype};
use crate::slot::{Slot, ValueKind};

fn gate(kind: NodeKind, label: &str, icon: &str, many: bool) -> NodePrototype {
    let input = Slot::new("input", "Input", ValueKind::Bool);
    let input = if many { input.multiple() } else { input };

    NodePrototype::new(kind, label, ValueKind::Bool.color(), icon)
        .with_input(input)
        .with_output(Slot::new(RESULT, "Result", ValueKind::Bool))
}

/// True when every input is true
pub fn and() -> NodePrototype {
    gate(NodeKind::And, "And", "logic-and", true)
}

/// True when any input is true
pub fn or() -> NodePrototype {
    gate(NodeKind::Or, "Or", "logic-or", true)
}

/// True when exactly one input is true
pub fn xor() -> NodePrototype {
    gate(NodeKind::Xor, "Xor", "logic-xor", true)
}

/// Inverts its input
pub fn not() -> NodePrototype {
    gate(NodeKind::Not, "Not", "logic-not", false)
}

/// Stays true after a true input until reset
pub fn latch() -> NodePrototype {
    gate(NodeKind::Latch, "Latch", "lock", false)
        .with_input(Slot::new("reset", "Reset", ValueKind::Bool))
}

/// Flips its output on every true input
pub fn toggle() -> NodePrototype {
    gate(NodeKind::Toggle, "Toggle", "toggle-left", false)
}
