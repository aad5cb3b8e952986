// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive connection-creation state machine.
//!
//! Two states: idle, or pending with one selected port while the
//! rubber-band edge is dragged. Selecting the pending port again
//! deselects it; selecting a second port of the opposite direction
//! commits a connection; anything else aborts back to idle. A failed
//! commit (duplicate pair, stale port) also resets the interaction.

use crate::connection::ConnectionId;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::port::{PortDirection, PortId};
use tracing::debug;

/// What the pointer landed on, as reported by hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A port on a node
    Port {
        /// Owning node
        node: NodeId,
        /// The port itself
        port: PortId,
    },
    /// A node body (not one of its ports)
    Node(NodeId),
    /// A connection curve
    Connection(ConnectionId),
    /// Empty canvas space
    Empty,
}

/// Outcome of feeding one selection into the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// A port was selected; a rubber-band edge should be shown
    SelectionStarted {
        /// Owning node of the selected port
        node: NodeId,
        /// The selected port
        port: PortId,
    },
    /// A connection was committed to the graph
    ConnectionCreated(ConnectionId),
    /// The pending selection was dropped without creating anything
    SelectionAborted,
}

/// Connection-creation state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionProtocol {
    pending: Option<(NodeId, PortId)>,
}

impl ConnectionProtocol {
    /// Create a new idle protocol
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected port, if a connection is being dragged
    pub fn pending_port(&self) -> Option<(NodeId, PortId)> {
        self.pending
    }

    /// Whether a rubber-band edge is currently being dragged
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one pointer selection into the state machine.
    ///
    /// Returns `None` when nothing changed (a non-port selection while
    /// idle).
    pub fn select(&mut self, graph: &mut Graph, target: HitTarget) -> Option<ProtocolEvent> {
        match (self.pending, target) {
            (None, HitTarget::Port { node, port }) => {
                self.pending = Some((node, port));
                debug!(?node, ?port, "connection drag started");
                Some(ProtocolEvent::SelectionStarted { node, port })
            }
            (None, _) => None,
            (Some((_, pending_port)), HitTarget::Port { port, .. }) if port == pending_port => {
                // Clicking the selected port again deselects it
                self.pending = None;
                Some(ProtocolEvent::SelectionAborted)
            }
            (Some((pending_node, pending_port)), HitTarget::Port { node, port }) => {
                self.pending = None;
                Some(self.commit(graph, (pending_node, pending_port), (node, port)))
            }
            (Some(_), _) => {
                self.pending = None;
                debug!("connection drag aborted");
                Some(ProtocolEvent::SelectionAborted)
            }
        }
    }

    fn commit(
        &self,
        graph: &mut Graph,
        (p_node, p_port): (NodeId, PortId),
        (q_node, q_port): (NodeId, PortId),
    ) -> ProtocolEvent {
        let direction_of =
            |node: NodeId, port: PortId| graph.node(node)?.port(port).map(|p| p.direction);

        // Either port may have gone stale while pending
        let (Some(p_dir), Some(q_dir)) = (direction_of(p_node, p_port), direction_of(q_node, q_port))
        else {
            return ProtocolEvent::SelectionAborted;
        };

        if p_dir == q_dir {
            // Output-Output or Input-Input never connects
            return ProtocolEvent::SelectionAborted;
        }

        let (from, to) = if p_dir == PortDirection::Output {
            ((p_node, p_port), (q_node, q_port))
        } else {
            ((q_node, q_port), (p_node, p_port))
        };

        match graph.connect(from.0, from.1, to.0, to.1) {
            Ok(id) => {
                debug!(connection = ?id, "connection created");
                ProtocolEvent::ConnectionCreated(id)
            }
            Err(err) => {
                debug!(%err, "connection rejected");
                ProtocolEvent::SelectionAborted
            }
        }
    }
}
