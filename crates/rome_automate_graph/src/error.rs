// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types.

use crate::connection::{Connection, SlotRef};
use crate::node::NodeId;
use crate::slot::ValueKind;

/// Error when parsing the string form of a [`SlotRef`]
#[derive(Debug, thiserror::Error)]
#[error("Invalid slot reference: {0}")]
pub struct SlotRefParseError(#[from] serde_json::Error);

/// Error when creating a connection through the editor path
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Slot not found on the expected side of the node
    #[error("Slot not found: {0}")]
    SlotNotFound(SlotRef),

    /// Both ends on the same node
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// Kinds cannot flow into each other
    #[error("Incompatible slot kinds: {from:?} into {to:?}")]
    IncompatibleKinds {
        /// Kind of the output
        from: ValueKind,
        /// Kind of the input
        to: ValueKind,
    },

    /// Input already has a wire and does not accept more
    #[error("Slot already connected: {0}")]
    SlotAlreadyConnected(SlotRef),

    /// A slot key would be both a source and a destination, as happens when
    /// an input and an output of one node share a name
    #[error("Slot {0} is already wired on the other side")]
    SlotUsedOnBothSides(SlotRef),

    /// The same wire exists already
    #[error("Connection already exists: {} -> {}", .0.from, .0.to)]
    Duplicate(Connection),

    /// No wire is being dragged
    #[error("No connection in progress")]
    NotStarted,
}

/// Error when loading or saving a program
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed program text
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Encoding failure
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Program version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Latest version this build understands
        supported: u32,
    },
}

/// Error when loading editor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration text
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Grid must be positive
    #[error("Grid size must be positive, got {0}")]
    InvalidGrid(f32),
}

/// A broken structural invariant of the connection graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphInconsistency {
    /// Present in the outgoing index but missing from the incoming one
    #[error("Missing incoming entry for {} -> {}", .0.from, .0.to)]
    MissingIncoming(Connection),

    /// Present in the incoming index but missing from the outgoing one
    #[error("Missing outgoing entry for {} -> {}", .0.from, .0.to)]
    MissingOutgoing(Connection),

    /// An empty adjacency set was left behind
    #[error("Empty adjacency set for {0}")]
    EmptySet(SlotRef),

    /// A slot is used both as a source and a destination
    #[error("Slot {0} is both a source and a destination")]
    BothSides(SlotRef),
}
