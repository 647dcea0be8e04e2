// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type specialization of generic nodes.
//!
//! A generic node starts with an [`ValueKind::Any`] input. When that input
//! gets wired to an output of a known kind, the node is replaced in place by
//! a prototype with the kind (and metadata) baked in. Removing the wire
//! reverts it to the generic prototype.
//!
//! Propagation is one hop per event. Longer chains converge through
//! [`Context::replace_node`], which re-runs the neighbor's hook for every
//! wire on a slot whose kind changed.

use crate::connection::SlotRef;
use crate::context::Context;
use crate::library::{generic, state, GENERIC_INPUT};
use crate::node::{NodeKind, NodePrototype};
use crate::slot::{possible_states, SlotMeta, ValueKind};

/// Edit event delivered to both ends of a wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A wire was added
    Added,
    /// A wire was removed
    Removed,
}

/// React to a wire change on `local`, whose other end is `remote`.
///
/// Dispatches on the kind of the node owning `local`. Nodes without
/// specialization behavior ignore the event.
pub fn on_connection_event(ctx: &mut Context, event: ConnectionEvent, local: &SlotRef, remote: &SlotRef) {
    let Some(kind) = ctx.nodes().get(local.node_id).map(|n| n.kind.clone()) else {
        return;
    };

    tracing::trace!("{:?} on {} from {} ({:?})", event, local, remote, kind);

    match (kind, event) {
        (NodeKind::IsNull, ConnectionEvent::Added) => {
            specialize(ctx, local, remote, generic::is_null);
        }
        (NodeKind::IsNull, ConnectionEvent::Removed) => {
            generalize(ctx, local, generic::is_null_generic());
        }
        (NodeKind::Equals, ConnectionEvent::Added) => {
            specialize(ctx, local, remote, generic::equals);
        }
        (NodeKind::Equals, ConnectionEvent::Removed) => {
            generalize(ctx, local, generic::equals_generic());
        }
        (NodeKind::StateCompare, ConnectionEvent::Added) => {
            specialize_state(ctx, local, remote);
        }
        (NodeKind::StateCompare, ConnectionEvent::Removed) => {
            generalize(ctx, local, state::compare(&[]));
        }
        _ => {}
    }
}

/// Kind and metadata of the output at `remote`, when `local` is the generic input
fn learned(ctx: &Context, local: &SlotRef, remote: &SlotRef) -> Option<(ValueKind, Option<SlotMeta>)> {
    if local.name != GENERIC_INPUT {
        return None;
    }

    let slot = ctx.nodes().get(remote.node_id)?.output(&remote.name)?;
    Some((slot.kind, slot.meta.clone()))
}

fn specialize(
    ctx: &mut Context,
    local: &SlotRef,
    remote: &SlotRef,
    build: fn(ValueKind, Option<SlotMeta>) -> NodePrototype,
) {
    let Some((kind, meta)) = learned(ctx, local, remote) else {
        return;
    };
    if !kind.is_concrete() {
        return;
    }

    tracing::debug!("Specializing node {} to {:?}", local.node_id, kind);
    ctx.replace_node(local.node_id, build(kind, meta));
}

fn specialize_state(ctx: &mut Context, local: &SlotRef, remote: &SlotRef) {
    let Some((kind, meta)) = learned(ctx, local, remote) else {
        return;
    };
    if kind != ValueKind::State {
        return;
    }

    let possible = possible_states(meta.as_ref());

    tracing::debug!("Specializing node {} to states {:?}", local.node_id, possible);
    ctx.replace_node(local.node_id, state::compare(&possible));
}

fn generalize(ctx: &mut Context, local: &SlotRef, prototype: NodePrototype) {
    if local.name != GENERIC_INPUT {
        return;
    }

    tracing::debug!("Reverting node {} to its generic shape", local.node_id);
    ctx.replace_node(local.node_id, prototype);
}
