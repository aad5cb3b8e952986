// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gating evaluation: which outgoing edges are traversable.
//!
//! Gating is OR-over-required-items: an edge into a node that requires
//! items is unlocked when the player holds *any one* of them, and a node
//! with no required items is never gated. This matches the shipped
//! behavior exactly, even though "required" reads like all-of.

use crate::connection::Connection;
use crate::graph::Graph;
use crate::item::{Item, ItemId};
use crate::node::{Node, NodeId};
use indexmap::IndexSet;

/// One outgoing edge of a node, resolved and gated
#[derive(Debug, Clone, Copy)]
pub struct ReachableEdge<'a> {
    /// The outgoing connection
    pub connection: &'a Connection,
    /// The destination node
    pub destination: &'a Node,
    /// Whether the edge is traversable with the given item set
    pub unlocked: bool,
}

/// Check whether a requirement set is satisfied by the collected items.
///
/// An empty requirement set is satisfied vacuously (no gate, rather than
/// an impossible gate); otherwise one matching item id suffices.
pub fn is_unlocked(required: &[Item], collected: &IndexSet<ItemId>) -> bool {
    required.is_empty() || required.iter().any(|item| collected.contains(&item.id))
}

/// Compute the gated outgoing edges of a node.
///
/// Edges are returned in the graph's connection insertion order.
/// Connections whose destination no longer exists are skipped rather
/// than surfaced: a broken link means "destination no longer exists",
/// which playback treats as unreachable, never as an error.
pub fn reachable<'a>(
    graph: &'a Graph,
    node_id: NodeId,
    collected: &IndexSet<ItemId>,
) -> Vec<ReachableEdge<'a>> {
    graph
        .connections_from(node_id)
        .filter_map(|connection| {
            let destination = graph.node(connection.to_node)?;
            Some(ReachableEdge {
                connection,
                destination,
                unlocked: is_unlocked(&destination.detail.required_items, collected),
            })
        })
        .collect()
}
