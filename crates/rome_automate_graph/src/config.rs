// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.

use crate::error::ConfigError;
use crate::geometry::{Extent, Point};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placement and snapping parameters of the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid that node origins and sizes snap to
    pub grid_size: f32,
    /// Size of a freshly added node
    pub node_extent: Extent,
    /// Offset of a new node's origin from the spawn point, keeps the header under the pointer
    pub spawn_offset: Point,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            node_extent: Extent::new(200.0, 200.0),
            spawn_offset: Point::new(-100.0, -15.0),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(text)?;

        if config.grid_size.is_nan() || config.grid_size <= 0.0 {
            return Err(ConfigError::InvalidGrid(config.grid_size));
        }

        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }
}
