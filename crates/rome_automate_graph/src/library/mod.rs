// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node prototypes and the palette they are offered from.

pub mod device;
pub mod generic;
pub mod logic;
pub mod math;
pub mod state;

use crate::node::NodePrototype;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use device::{DeviceDescriptor, FeatureDescriptor, FeatureDirection};

/// Id of the slot that generic nodes specialize on
pub const GENERIC_INPUT: &str = "input";

/// Id of the single result slot most operators expose
pub const RESULT: &str = "result";

/// Palette category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Nodes that adapt to what they are wired to
    Generic,
    /// Device sources
    Devices,
    /// Boolean logic
    Logic,
    /// State comparisons
    State,
    /// Numeric operators
    Numbers,
}

/// A named prototype offered to the user
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    /// Menu text
    pub name: String,
    /// Icon name
    pub icon: String,
    /// Category
    pub category: Category,
    /// Template the node is created from
    pub prototype: NodePrototype,
}

/// Registry of available prototypes
#[derive(Debug, Clone, Default)]
pub struct PrototypeLibrary {
    entries: IndexMap<String, LibraryEntry>,
}

impl PrototypeLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding every built-in operator
    pub fn builtin() -> Self {
        let mut library = Self::new();

        library.register("is_null", Category::Generic, generic::is_null_generic());
        library.register("equals", Category::Generic, generic::equals_generic());

        library.register("and", Category::Logic, logic::and());
        library.register("or", Category::Logic, logic::or());
        library.register("not", Category::Logic, logic::not());
        library.register("xor", Category::Logic, logic::xor());
        library.register("latch", Category::Logic, logic::latch());
        library.register("toggle", Category::Logic, logic::toggle());

        library.register("state_compare", Category::State, state::compare(&[]));

        library.register("math_compare", Category::Numbers, math::compare("Eq"));
        library.register("max", Category::Numbers, math::max());
        library.register("min", Category::Numbers, math::min());

        library
    }

    /// Add a prototype under an id, named after its label
    pub fn register(&mut self, id: impl Into<String>, category: Category, prototype: NodePrototype) {
        let entry = LibraryEntry {
            name: prototype.label.clone(),
            icon: prototype.icon.clone(),
            category,
            prototype,
        };
        self.entries.insert(id.into(), entry);
    }

    /// Add a source node for every device of a catalog
    pub fn register_devices<'a>(&mut self, devices: impl IntoIterator<Item = &'a DeviceDescriptor>) {
        for d in devices {
            self.register(format!("device:{}", d.id), Category::Devices, device::device(d));
        }
    }

    /// Get an entry by id
    pub fn get(&self, id: &str) -> Option<&LibraryEntry> {
        self.entries.get(id)
    }

    /// Create a fresh prototype by id
    pub fn create(&self, id: &str) -> Option<NodePrototype> {
        self.get(id).map(|e| e.prototype.clone())
    }

    /// All entries with their ids
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e))
    }

    /// Entries of one category
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.entries().filter(move |(_, e)| e.category == category)
    }
}
