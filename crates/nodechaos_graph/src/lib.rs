// SPDX-License-Identifier: MIT OR Apache-2.0
//! Story graph core for `NodeChaos`.
//!
//! A branching narrative is a directed graph: nodes are story beats
//! carrying text and items, connections run from output to input ports,
//! and traversal is gated by item possession.
//!
//! ## Architecture
//!
//! - [`graph`] owns all nodes and connections and enforces the
//!   structural invariants (unique ids, Output→Input edges, cascade
//!   deletion).
//! - [`protocol`] is the two-state machine behind interactive
//!   connection creation.
//! - [`gating`] computes which outgoing edges are traversable for a
//!   given item set.
//! - [`view`] tracks the canvas pan/zoom transform.
//! - [`document`] serializes whole graphs.
//!
//! Nothing in this crate renders; the editor shell drives it through
//! hit-test results and reads state back for drawing.

pub mod connection;
pub mod document;
pub mod gating;
pub mod graph;
pub mod item;
pub mod node;
pub mod port;
pub mod protocol;
pub mod view;

pub use connection::{Connection, ConnectionId};
pub use graph::{Graph, GraphError};
pub use item::{Item, ItemId, ItemRegistry};
pub use node::{Detail, Node, NodeId};
pub use port::{Port, PortDirection, PortId};
pub use protocol::{ConnectionProtocol, HitTarget, ProtocolEvent};
pub use view::ViewTransform;
