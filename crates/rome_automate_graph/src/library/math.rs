// SPDX-License-Identifier: MIT OR Apache-2.0
//! Numeric operators.

use super::RESULT;
use crate::node::{NodeKind, NodePrototype, Settings};
use crate::slot::{Slot, SlotValue, ValueKind};
use serde_json::json;

/// Compare the input against another number with `operator` (`Eq`, `Lt`, ...)
pub fn compare(operator: &str) -> NodePrototype {
    NodePrototype::new(NodeKind::MathCompare, "Compare", ValueKind::Number.color(), "equal-double")
        .with_settings(Settings::new("NumberCompare", json!({ "operator": operator })))
        .with_input(Slot::new("input", "Input", ValueKind::Number))
        .with_input(Slot::new("other", "Other", ValueKind::Number).with_default(SlotValue::Number(10.0)))
        .with_output(Slot::new(RESULT, "Result", ValueKind::Bool))
}

fn fold(kind: NodeKind, label: &str, icon: &str) -> NodePrototype {
    NodePrototype::new(kind, label, ValueKind::Number.color(), icon)
        .with_input(Slot::new("input", "Input", ValueKind::Number).multiple())
        .with_output(Slot::new(RESULT, "Result", ValueKind::Number))
}

/// Largest of the inputs
pub fn max() -> NodePrototype {
    fold(NodeKind::Max, "Max", "math-greater")
}

/// Smallest of the inputs
pub fn min() -> NodePrototype {
    fold(NodeKind::Min, "Min", "math-lower")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_settings() {
        let proto = compare("Lt");
        let settings = proto.settings.unwrap();
        assert_eq!(settings.editor, "NumberCompare");
        assert_eq!(settings.props["operator"], "Lt");
        assert_eq!(proto.inputs[1].default, Some(SlotValue::Number(10.0)));
    }
}
