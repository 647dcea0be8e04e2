// SPDX-License-Identifier: MIT OR Apache-2.0
//! Device backed source nodes, the automation target and constants.

use crate::node::{NodeKind, NodePrototype, Settings};
use crate::slot::{Slot, SlotMeta, SlotValue, ValueKind};
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEVICE_COLOR: [u8; 3] = [0x6c, 0xb6, 0xff];
const TARGET_COLOR: [u8; 3] = [0xff, 0x6c, 0x6d];
const VALUE_COLOR: [u8; 3] = [0xb7, 0xba, 0xc8];

/// Whether a feature can be read, written or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureDirection {
    /// Reports values
    Source,
    /// Accepts values
    Sink,
    /// Both
    SourceSink,
}

impl FeatureDirection {
    /// Whether the feature reports values
    pub fn is_source(self) -> bool {
        matches!(self, Self::Source | Self::SourceSink)
    }

    /// Whether the feature accepts values
    pub fn is_sink(self) -> bool {
        matches!(self, Self::Sink | Self::SourceSink)
    }
}

/// One feature of a device, as listed in the device catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// Feature id
    pub id: String,
    /// Display name
    pub name: String,
    /// Direction
    pub direction: FeatureDirection,
    /// Value kind
    pub kind: ValueKind,
    /// Unit, possible states and so on
    #[serde(default)]
    pub meta: Option<SlotMeta>,
}

impl FeatureDescriptor {
    /// Create a feature without metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        direction: FeatureDirection,
        kind: ValueKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            direction,
            kind,
            meta: None,
        }
    }

    /// Attach metadata
    pub fn with_meta(mut self, meta: SlotMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// A device from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Device id
    pub id: String,
    /// Display name
    pub name: String,
    /// Features
    pub features: Vec<FeatureDescriptor>,
}

impl DeviceDescriptor {
    /// Create a device without features
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            features: Vec::new(),
        }
    }

    /// Append a feature
    pub fn with_feature(mut self, feature: FeatureDescriptor) -> Self {
        self.features.push(feature);
        self
    }
}

/// Source node exposing every readable feature of a device as an output
pub fn device(device: &DeviceDescriptor) -> NodePrototype {
    let outputs = device
        .features
        .iter()
        .filter(|f| f.direction.is_source())
        .map(|f| Slot::new(&f.id, &f.name, f.kind).with_meta(f.meta.clone()));

    let mut proto = NodePrototype::new(
        NodeKind::Device {
            device: device.id.clone(),
        },
        &device.name,
        DEVICE_COLOR,
        "cpu",
    );
    proto.outputs.extend(outputs);
    proto
}

/// The automation sink writing one device feature
pub fn target(feature: &FeatureDescriptor) -> NodePrototype {
    NodePrototype::new(
        NodeKind::Target {
            feature: feature.id.clone(),
        },
        &feature.name,
        TARGET_COLOR,
        "target",
    )
    .with_input(Slot::new(&feature.id, &feature.name, feature.kind).with_meta(feature.meta.clone()))
    .as_target()
}

/// A constant source
pub fn static_value(value: SlotValue) -> NodePrototype {
    let kind = value.kind();
    NodePrototype::new(NodeKind::StaticValue, "Value", VALUE_COLOR, "pencil")
        .with_output(Slot::new("value", "Value", kind).with_default(value.clone()))
        .with_settings(Settings::new("StaticValue", json!({ "value": value })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor() -> DeviceDescriptor {
        DeviceDescriptor::new("sensor", "Motion sensor")
            .with_feature(FeatureDescriptor::new(
                "occupancy",
                "Occupancy",
                FeatureDirection::Source,
                ValueKind::Bool,
            ))
            .with_feature(FeatureDescriptor::new(
                "sensitivity",
                "Sensitivity",
                FeatureDirection::Sink,
                ValueKind::Number,
            ))
            .with_feature(FeatureDescriptor::new(
                "led",
                "Led",
                FeatureDirection::SourceSink,
                ValueKind::Bool,
            ))
    }

    #[test]
    fn test_device_outputs_only_sources() {
        let proto = device(&sensor());
        let ids: Vec<_> = proto.outputs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["occupancy", "led"]);
        assert!(proto.inputs.is_empty());
        assert!(!proto.target);
    }

    #[test]
    fn test_target() {
        let sensor = sensor();
        let proto = target(&sensor.features[2]);
        assert!(proto.target);
        assert_eq!(proto.inputs[0].id, "led");
        assert_eq!(proto.inputs[0].kind, ValueKind::Bool);
    }

    #[test]
    fn test_static_value_kind() {
        let proto = static_value(SlotValue::Number(3.0));
        assert_eq!(proto.outputs[0].kind, ValueKind::Number);
    }
}
