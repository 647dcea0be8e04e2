// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural diff of two slot lists, matched by slot id.

use crate::slot::Slot;

/// Outcome of comparing an old slot list with a new one
#[derive(Debug, Default, PartialEq)]
pub struct SlotDiff<'a> {
    /// Only in the old list
    pub removed: Vec<&'a Slot>,
    /// Only in the new list
    pub added: Vec<&'a Slot>,
    /// In both lists, as (old, new)
    pub same: Vec<(&'a Slot, &'a Slot)>,
}

impl<'a> SlotDiff<'a> {
    /// Compare two slot lists
    pub fn new(old: &'a [Slot], new: &'a [Slot]) -> Self {
        let mut diff = Self::default();

        for before in old {
            match new.iter().find(|s| s.id == before.id) {
                Some(after) => diff.same.push((before, after)),
                None => diff.removed.push(before),
            }
        }

        diff.added = new
            .iter()
            .filter(|after| !old.iter().any(|s| s.id == after.id))
            .collect();

        diff
    }

    /// Slots kept under the same id whose kind changed
    pub fn retyped(&self) -> impl Iterator<Item = &'a Slot> + '_ {
        self.same
            .iter()
            .filter(|(before, after)| before.kind != after.kind)
            .map(|(_, after)| *after)
    }

    /// Whether the lists are structurally identical
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.retyped().next().is_none()
    }
}
