// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph document serialization.
//!
//! The persisted schema is whatever serde derives for [`Graph`]; callers
//! treat the string as an opaque document.

use crate::graph::Graph;

impl Graph {
    /// Serialize the graph to a RON document
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize a graph from a RON document
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
