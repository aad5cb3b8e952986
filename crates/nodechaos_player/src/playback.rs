// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback: walking a story graph, accumulating items through gates.

use indexmap::IndexSet;
use nodechaos_graph::gating::reachable;
use nodechaos_graph::{ConnectionId, Graph, ItemId, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix shown on the title of a gated, not-yet-unlocked option
pub const LOCKED_PREFIX: &str = "(LOCKED)";

/// One next-node choice offered to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackOption {
    /// The connection this option would traverse
    pub connection: ConnectionId,
    /// The destination node
    pub destination: NodeId,
    /// Destination title, prefixed with [`LOCKED_PREFIX`] when locked
    pub title: String,
    /// Locked options are disabled; selecting one is a no-op
    pub locked: bool,
}

/// Read-only view of the playback state, for rendering
#[derive(Debug, Clone, Copy)]
pub struct PlaybackSnapshot<'a> {
    /// The node currently being shown
    pub current: Option<NodeId>,
    /// Next-node options of the current node
    pub options: &'a [PlaybackOption],
    /// Connections highlighted as the active selection
    pub highlighted: &'a [ConnectionId],
}

/// A playback session over a story graph.
///
/// Items accumulate monotonically: visiting a node grants its items for
/// the rest of the session, and nothing revokes them. Only a fresh
/// [`start`](Playback::start) resets progress.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    current: Option<NodeId>,
    collected: IndexSet<ItemId>,
    options: Vec<PlaybackOption>,
    highlighted: Vec<ConnectionId>,
}

impl Playback {
    /// Create a new idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session at `node`, resetting collected items and
    /// highlights
    pub fn start(&mut self, graph: &Graph, node: NodeId) {
        self.collected.clear();
        self.highlighted.clear();
        self.options.clear();
        self.current = None;
        self.visit(graph, node);
    }

    /// Choose the option at `index`.
    ///
    /// Locked options, stale indices, and destinations deleted since the
    /// options were computed are all no-ops returning `false`.
    pub fn select(&mut self, graph: &Graph, index: usize) -> bool {
        let Some(option) = self.options.get(index) else {
            return false;
        };
        if option.locked {
            debug!(title = %option.title, "locked option ignored");
            return false;
        }
        let destination = option.destination;
        if graph.node(destination).is_none() {
            // Destination deleted mid-session: no longer reachable
            return false;
        }
        self.highlighted.clear();
        self.visit(graph, destination);
        true
    }

    /// End the session view, clearing the current node, options and
    /// highlights. Collected items survive until the next `start`.
    pub fn stop(&mut self) {
        self.current = None;
        self.options.clear();
        self.highlighted.clear();
    }

    fn visit(&mut self, graph: &Graph, node_id: NodeId) {
        let Some(node) = graph.node(node_id) else {
            return;
        };
        self.current = Some(node_id);

        // Visiting grants the node's items before its options are gated,
        // so a node can unlock its own exits
        for item in &node.detail.items {
            if self.collected.insert(item.id) {
                debug!(item = %item.name, "item collected");
            }
        }

        self.highlighted = graph.connections_from(node_id).map(|c| c.id).collect();
        self.options = reachable(graph, node_id, &self.collected)
            .into_iter()
            .map(|edge| {
                let title = &edge.destination.detail.title;
                PlaybackOption {
                    connection: edge.connection.id,
                    destination: edge.destination.id,
                    title: if edge.unlocked {
                        title.clone()
                    } else {
                        format!("{LOCKED_PREFIX}{title}")
                    },
                    locked: !edge.unlocked,
                }
            })
            .collect();

        debug!(
            node = %node.detail.title,
            options = self.options.len(),
            items = self.collected.len(),
            "visit"
        );
    }

    /// The node currently being shown
    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    /// Next-node options of the current node
    pub fn options(&self) -> &[PlaybackOption] {
        &self.options
    }

    /// Connections highlighted as the active selection
    pub fn highlighted(&self) -> &[ConnectionId] {
        &self.highlighted
    }

    /// Ids of all items collected this session, in collection order
    pub fn collected_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.collected.iter().copied()
    }

    /// Whether an item has been collected this session
    pub fn has_item(&self, item: ItemId) -> bool {
        self.collected.contains(&item)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> PlaybackSnapshot<'_> {
        PlaybackSnapshot {
            current: self.current,
            options: &self.options,
            highlighted: &self.highlighted,
        }
    }
}
