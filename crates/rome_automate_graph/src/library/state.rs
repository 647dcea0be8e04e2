// SPDX-License-Identifier: MIT OR Apache-2.0
//! State comparisons.

use super::{GENERIC_INPUT, RESULT};
use crate::node::{NodeKind, NodePrototype, Settings};
use crate::slot::{Slot, SlotMeta, ValueKind};
use serde_json::json;

/// Compare a state against one of its `possible` values.
///
/// The possibilities are learned from the state output wired into the node.
pub fn compare(possible: &[String]) -> NodePrototype {
    let mut meta = SlotMeta::new();
    meta.insert("possible".into(), json!(possible));

    NodePrototype::new(NodeKind::StateCompare, "Compare", ValueKind::State.color(), "equal")
        .with_settings(Settings::new("StateCompare", json!({ "possible": possible })))
        .with_input(Slot::new(GENERIC_INPUT, "Input", ValueKind::State).with_meta(Some(meta)))
        .with_output(Slot::new(RESULT, "Result", ValueKind::Bool))
}
