// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data engine of the Rome automation editor.
//!
//! An automation is a directed graph of nodes with typed input and output
//! slots. This crate keeps that graph and everything the editor needs
//! around it:
//!
//! - [`NodeRegistry`] owns the node instances and hands out ids
//! - [`ConnectionGraph`] indexes the wires in both directions
//! - [`Layout`] and [`SelectedStore`] track placement and selection
//! - [`library`] builds the node prototypes offered in the palette
//! - [`Context`] ties it together, cascading removals and running the
//!   type specialization of generic nodes
//!
//! ## Example
//!
//! ```
//! use rome_automate_graph::library::{generic, logic, GENERIC_INPUT, RESULT};
//! use rome_automate_graph::{Connection, Context, SlotRef, ValueKind};
//!
//! let mut ctx = Context::new();
//! let and = ctx.add_node(logic::and(), None);
//! let null = ctx.add_node(generic::is_null_generic(), None);
//!
//! ctx.connect(&Connection::new(
//!     SlotRef::new(and, RESULT),
//!     SlotRef::new(null, GENERIC_INPUT),
//! ));
//!
//! let input = ctx.nodes().get_slot(&SlotRef::new(null, GENERIC_INPUT));
//! assert_eq!(input.map(|s| s.kind), Some(ValueKind::Bool));
//! ```

pub mod config;
pub mod connection;
pub mod context;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod library;
pub mod node;
pub mod observer;
pub mod program;
pub mod registry;
pub mod selection;
pub mod slot;
pub mod specialize;

pub use config::EditorConfig;
pub use connection::{Connection, IncompleteConnection, SlotRef};
pub use context::Context;
pub use error::{ConfigError, ConnectError, GraphInconsistency, ProgramError, SlotRefParseError};
pub use geometry::{Extent, Point, Rect};
pub use graph::ConnectionGraph;
pub use layout::{Layout, LayoutStore, NodeLayout};
pub use library::PrototypeLibrary;
pub use node::{Node, NodeId, NodeKind, NodePrototype, Settings};
pub use observer::SubscriptionId;
pub use program::{SavedProgram, PROGRAM_FORMAT_VERSION};
pub use registry::NodeRegistry;
pub use selection::{SelectedStore, SelectionMove};
pub use slot::{Slot, SlotDirection, SlotMeta, SlotValue, ValueKind};
