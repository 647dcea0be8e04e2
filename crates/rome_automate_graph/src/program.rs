// SPDX-License-Identifier: MIT OR Apache-2.0
//! Saved automations.
//!
//! A program is written as RON. Loading one rebuilds the stores as they
//! were saved; specialization hooks are not run again since the saved
//! nodes already carry their learned kinds.

use crate::config::EditorConfig;
use crate::connection::Connection;
use crate::context::Context;
use crate::error::ProgramError;
use crate::graph::ConnectionGraph;
use crate::layout::{Layout, NodeLayout};
use crate::node::Node;
use crate::registry::NodeRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current program format version
pub const PROGRAM_FORMAT_VERSION: u32 = 1;

/// A whole automation as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProgram {
    /// Format version
    pub version: u32,
    /// Next node id to allocate
    pub counter: u64,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Wires
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Node placement
    #[serde(default)]
    pub positions: Vec<NodeLayout>,
}

impl SavedProgram {
    /// Parse a program, rejecting versions newer than this build
    pub fn from_ron(text: &str) -> Result<Self, ProgramError> {
        let program: SavedProgram = ron::from_str(text)?;

        if program.version > PROGRAM_FORMAT_VERSION {
            return Err(ProgramError::UnsupportedVersion {
                found: program.version,
                supported: PROGRAM_FORMAT_VERSION,
            });
        }

        Ok(program)
    }

    /// Encode as pretty RON
    pub fn to_ron(&self) -> Result<String, ProgramError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load a program file
    pub fn load(path: &Path) -> Result<Self, ProgramError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save to a program file
    pub fn save(&self, path: &Path) -> Result<(), ProgramError> {
        let content = self.to_ron()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Context {
    /// Rebuild a session from a saved program.
    ///
    /// Wires that do not run from an existing output to an existing input,
    /// or that would use a slot as both source and destination, are dropped
    /// with a warning.
    pub fn from_program(program: SavedProgram, config: EditorConfig) -> Self {
        let nodes = NodeRegistry::restore(program.nodes, program.counter);
        let layout = Layout::restore(program.positions, config.grid_size);

        let mut connections = ConnectionGraph::new();
        for connection in &program.connections {
            let Connection { from, to } = connection;
            let oriented = nodes.get(from.node_id).is_some_and(|n| n.output(&from.name).is_some())
                && nodes.get(to.node_id).is_some_and(|n| n.input(&to.name).is_some());

            if !oriented || !connections.fits(connection) {
                tracing::warn!("Dropping invalid connection {} -> {}", from, to);
                continue;
            }
            connections.add(connection);
        }

        tracing::debug!(
            "Restored program with {} nodes and {} connections",
            nodes.len(),
            connections.len()
        );
        Self::from_parts(config, nodes, connections, layout)
    }

    /// Snapshot the session for saving
    pub fn to_program(&self) -> SavedProgram {
        SavedProgram {
            version: PROGRAM_FORMAT_VERSION,
            counter: self.nodes.counter(),
            nodes: self.nodes.nodes().cloned().collect(),
            connections: self.connections.all(),
            positions: self.layout.positions(),
        }
    }
}
