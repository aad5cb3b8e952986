// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.
//!
//! The graph is the sole owner of connections; per-node connection lists
//! are derived queries over it, never ownership edges. Removing a node
//! cascades to every connection touching it, so no connection ever
//! references a node that is no longer present.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A story graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph.
    ///
    /// Fails if a node with the same id is already present.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        debug!(node = ?id, title = %node.detail.title, "add node");
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node and cascade-remove every connection touching it.
    ///
    /// Removing an id that is not present is a no-op returning `None`,
    /// so repeated removal is harmless.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        if !self.nodes.contains_key(&node_id) {
            return None;
        }
        // Connections first, so no edge ever dangles
        self.connections.retain(|_, c| !c.involves_node(node_id));
        debug!(node = ?node_id, "remove node");
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection from an output port to an input port.
    ///
    /// Both nodes and ports must exist, the source port must be an
    /// output and the destination port an input, and the exact port pair
    /// must not already be connected. Self-loops are permitted; playing
    /// one simply leads back to the same node.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, GraphError> {
        let source_node = self
            .nodes
            .get(&from_node)
            .ok_or(GraphError::NodeNotFound(from_node))?;
        let target_node = self
            .nodes
            .get(&to_node)
            .ok_or(GraphError::NodeNotFound(to_node))?;

        let source_port = source_node
            .port(from_port)
            .ok_or(GraphError::PortNotFound(from_port))?;
        let target_port = target_node
            .port(to_port)
            .ok_or(GraphError::PortNotFound(to_port))?;

        if source_port.direction != PortDirection::Output
            || target_port.direction != PortDirection::Input
        {
            return Err(GraphError::InvalidPortDirection {
                from: source_port.direction,
                to: target_port.direction,
            });
        }

        if self
            .connections
            .values()
            .any(|c| c.from_port == from_port && c.to_port == to_port)
        {
            return Err(GraphError::DuplicateConnection {
                from: from_port,
                to: to_port,
            });
        }

        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id;
        debug!(connection = ?id, from = ?from_node, to = ?to_node, "add connection");
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection; the endpoint nodes are untouched
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        debug!(connection = ?connection_id, "remove connection");
        self.connections.shift_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get outgoing connections of a node, in insertion order
    pub fn connections_from(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.from_node == node_id)
    }

    /// Get incoming connections of a node, in insertion order
    pub fn connections_to(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.to_node == node_id)
    }

    /// Get connections involving a node as either endpoint
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error raised by structural graph mutations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node with this id is already present
    #[error("duplicate node id: {0:?}")]
    DuplicateNode(NodeId),

    /// This exact port pair is already connected
    #[error("ports already connected: {from:?} -> {to:?}")]
    DuplicateConnection {
        /// Source port of the conflicting pair
        from: PortId,
        /// Destination port of the conflicting pair
        to: PortId,
    },

    /// Node not found
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found on the referenced node
    #[error("port not found: {0:?}")]
    PortNotFound(PortId),

    /// Connections run from an output port to an input port only
    #[error("invalid port directions: {from:?} -> {to:?}")]
    InvalidPortDirection {
        /// Direction of the attempted source port
        from: PortDirection,
        /// Direction of the attempted destination port
        to: PortDirection,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_connected_nodes() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new("test");
        let a = Node::new("A", [0.0, 0.0]);
        let b = Node::new("B", [100.0, 0.0]);
        let (a_out, b_in) = (a.outputs[0].id, b.inputs[0].id);
        let a_id = graph.add_node(a).unwrap();
        let b_id = graph.add_node(b).unwrap();
        graph.connect(a_id, a_out, b_id, b_in).unwrap();
        (graph, a_id, b_id)
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let mut graph = Graph::new("test");
        let node = Node::new("A", [0.0, 0.0]);
        let copy = node.clone();
        graph.add_node(node).unwrap();
        assert!(matches!(
            graph.add_node(copy),
            Err(GraphError::DuplicateNode(_))
        ));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_remove_node_cascades_connections() {
        let (mut graph, a_id, b_id) = two_connected_nodes();
        assert_eq!(graph.connection_count(), 1);

        graph.remove_node(b_id).unwrap();

        // No surviving connection references the deleted node
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.connections().all(|c| !c.involves_node(b_id)));
        assert!(graph.node(a_id).is_some());
    }

    #[test]
    fn test_remove_node_twice_is_noop() {
        let (mut graph, a_id, _) = two_connected_nodes();
        assert!(graph.remove_node(a_id).is_some());
        assert!(graph.remove_node(a_id).is_none());
    }

    #[test]
    fn test_missing_node_lookup_returns_none() {
        let graph = Graph::new("test");
        assert!(graph.node(NodeId::new()).is_none());
    }

    #[test]
    fn test_connect_validates_directions() {
        let mut graph = Graph::new("test");
        let a = Node::new("A", [0.0, 0.0]);
        let b = Node::new("B", [0.0, 0.0]);
        let (a_in, a_out) = (a.inputs[0].id, a.outputs[0].id);
        let (b_in, b_out) = (b.inputs[0].id, b.outputs[0].id);
        let a_id = graph.add_node(a).unwrap();
        let b_id = graph.add_node(b).unwrap();

        // Output -> Output
        assert!(matches!(
            graph.connect(a_id, a_out, b_id, b_out),
            Err(GraphError::InvalidPortDirection { .. })
        ));
        // Input -> Input
        assert!(matches!(
            graph.connect(a_id, a_in, b_id, b_in),
            Err(GraphError::InvalidPortDirection { .. })
        ));
        // Reversed endpoints
        assert!(matches!(
            graph.connect(a_id, a_in, b_id, b_out),
            Err(GraphError::InvalidPortDirection { .. })
        ));
        assert_eq!(graph.connection_count(), 0);

        assert!(graph.connect(a_id, a_out, b_id, b_in).is_ok());
    }

    #[test]
    fn test_duplicate_connection_rejected() {
        let (mut graph, a_id, b_id) = two_connected_nodes();
        let a_out = graph.node(a_id).unwrap().outputs[0].id;
        let b_in = graph.node(b_id).unwrap().inputs[0].id;
        assert!(matches!(
            graph.connect(a_id, a_out, b_id, b_in),
            Err(GraphError::DuplicateConnection { .. })
        ));
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_self_loop_permitted() {
        let mut graph = Graph::new("test");
        let node = Node::new("A", [0.0, 0.0]);
        let (n_out, n_in) = (node.outputs[0].id, node.inputs[0].id);
        let id = graph.add_node(node).unwrap();
        assert!(graph.connect(id, n_out, id, n_in).is_ok());
    }

    #[test]
    fn test_disconnect_keeps_nodes() {
        let (mut graph, a_id, b_id) = two_connected_nodes();
        let conn_id = graph.connections().next().unwrap().id;
        assert!(graph.disconnect(conn_id).is_some());
        assert!(graph.disconnect(conn_id).is_none());
        assert!(graph.node(a_id).is_some());
        assert!(graph.node(b_id).is_some());
    }

    #[test]
    fn test_outgoing_connections_keep_insertion_order() {
        let mut graph = Graph::new("test");
        let hub = Node::new("Hub", [0.0, 0.0]);
        let hub_out = hub.outputs[0].id;
        let hub_id = graph.add_node(hub).unwrap();

        let mut expected = Vec::new();
        for title in ["B", "C", "D"] {
            let node = Node::new(title, [0.0, 0.0]);
            let node_in = node.inputs[0].id;
            let node_id = graph.add_node(node).unwrap();
            expected.push(graph.connect(hub_id, hub_out, node_id, node_in).unwrap());
        }

        let order: Vec<_> = graph.connections_from(hub_id).map(|c| c.id).collect();
        assert_eq!(order, expected);
    }
}
