// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the story graph.

use crate::item::Item;
use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-node story payload.
///
/// `items` are granted to the player when the node is visited;
/// `required_items` gate incoming traversal: an edge into this node is
/// unlocked when the player holds at least one of them (any one
/// suffices). An empty requirement set means the node is never gated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detail {
    /// Display title
    pub title: String,
    /// Story text body
    pub text: String,
    /// Items granted upon visiting this node
    pub items: Vec<Item>,
    /// Items of which at least one must be held to enter this node
    pub required_items: Vec<Item>,
}

/// A story beat in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Story payload
    pub detail: Detail,
    /// Position on the canvas
    pub position: [f32; 2],
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create a new node at a canvas position with one input and one
    /// output port
    pub fn new(title: impl Into<String>, position: [f32; 2]) -> Self {
        Self {
            id: NodeId::new(),
            detail: Detail {
                title: title.into(),
                ..Detail::default()
            },
            position,
            inputs: vec![Port::input()],
            outputs: vec![Port::output()],
        }
    }

    /// Set the story text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.detail.text = text.into();
        self
    }

    /// Add an item granted upon visiting this node
    pub fn grants(mut self, item: Item) -> Self {
        self.detail.items.push(item);
        self
    }

    /// Add an item gating entry to this node
    pub fn requires(mut self, item: Item) -> Self {
        self.detail.required_items.push(item);
        self
    }

    /// Get an input port by index
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Get an output port by index
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&Port> {
        self.inputs
            .iter()
            .find(|p| p.id == port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == port_id))
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortDirection;

    #[test]
    fn test_new_node_has_knob_pair() {
        let node = Node::new("Cave", [10.0, 20.0]);
        assert_eq!(node.inputs.len(), 1);
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(node.inputs[0].direction, PortDirection::Input);
        assert_eq!(node.outputs[0].direction, PortDirection::Output);
        assert_eq!(node.position, [10.0, 20.0]);
    }

    #[test]
    fn test_port_lookup_covers_both_sides() {
        let node = Node::new("Cave", [0.0, 0.0]);
        let input_id = node.inputs[0].id;
        let output_id = node.outputs[0].id;
        assert_eq!(node.port(input_id).map(|p| p.direction), Some(PortDirection::Input));
        assert_eq!(node.port(output_id).map(|p| p.direction), Some(PortDirection::Output));
        assert!(node.port(PortId::new()).is_none());
        assert_eq!(node.ports().count(), 2);
    }

    #[test]
    fn test_builder_fills_detail() {
        let key = Item::new("Key");
        let node = Node::new("Gate", [0.0, 0.0])
            .with_text("A locked gate.")
            .requires(key.clone());
        assert_eq!(node.detail.text, "A locked gate.");
        assert_eq!(node.detail.required_items, vec![key]);
        assert!(node.detail.items.is_empty());
    }
}
