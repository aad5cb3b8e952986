// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port (knob) definitions for node connection points.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Incoming connections terminate here
    Input,
    /// Outgoing connections originate here
    Output,
}

/// A directional attachment point on a node.
///
/// A port has no identity beyond its id and direction; it is owned by
/// exactly one node and is destroyed with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port direction
    pub direction: PortDirection,
}

impl Port {
    /// Create a new input port
    pub fn input() -> Self {
        Self {
            id: PortId::new(),
            direction: PortDirection::Input,
        }
    }

    /// Create a new output port
    pub fn output() -> Self {
        Self {
            id: PortId::new(),
            direction: PortDirection::Output,
        }
    }

    /// Check if a connection to another port is valid.
    ///
    /// Output connects only to Input and vice versa; two ports of the
    /// same direction can never connect.
    pub fn can_connect(&self, other: &Port) -> bool {
        self.direction != other.direction
    }
}
