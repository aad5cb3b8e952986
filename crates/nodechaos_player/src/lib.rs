// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback engine for `NodeChaos` story graphs.
//!
//! Walks a graph built with `nodechaos_graph` from a start node,
//! granting each visited node's items and offering the gated set of
//! next-node options. The presentation layer renders the
//! [`PlaybackSnapshot`] and feeds selections back in.

pub mod playback;

pub use playback::{Playback, PlaybackOption, PlaybackSnapshot, LOCKED_PREFIX};
