// SPDX-License-Identifier: MIT OR Apache-2.0
//! View transform bookkeeping for the interactive canvas.
//!
//! Tracks the zoom factor and the addressable scene rectangle for a 2D
//! canvas, independent of any rendering surface. The canvas layer applies
//! the resulting transform; nothing here draws.

use crate::graph::Graph;
use crate::node::{Node, NodeId};
use egui::{Pos2, Rect, Vec2};
use tracing::trace;

/// Zoom floor; shrinking below this would degenerate the viewport
pub const MIN_ZOOM: f32 = 0.05;
/// Per-wheel-step zoom multiplier
pub const ZOOM_STEP: f32 = 1.1;

/// Node visual dimensions
const NODE_WIDTH: f32 = 180.0;
const NODE_HEADER_HEIGHT: f32 = 24.0;
const PORT_HEIGHT: f32 = 22.0;

/// Scene-rect margin moved per zoom step, as a fraction of each edge
const ZOOM_RECT_MARGIN: f32 = 0.1;

/// Default addressable canvas extent
const SCENE_EXTENT: f32 = 99_999.0;

/// Canvas rectangle of a node, derived from its position and port count
pub fn node_rect(node: &Node) -> Rect {
    let port_count = node.inputs.len().max(node.outputs.len());
    let height = NODE_HEADER_HEIGHT + port_count as f32 * PORT_HEIGHT + 8.0;
    Rect::from_min_size(
        Pos2::new(node.position[0], node.position[1]),
        Vec2::new(NODE_WIDTH, height),
    )
}

/// Pan/zoom state of the interactive canvas
#[derive(Debug, Clone)]
pub struct ViewTransform {
    zoom: f32,
    scene_rect: Rect,
    center: Pos2,
}

impl ViewTransform {
    /// Create a transform at 1x zoom over the default scene rect
    pub fn new() -> Self {
        let scene_rect = Rect::from_min_size(Pos2::ZERO, Vec2::splat(SCENE_EXTENT));
        Self {
            zoom: 1.0,
            scene_rect,
            center: scene_rect.center(),
        }
    }

    /// Current zoom factor
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Currently addressable scene bounds
    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    /// Current view center in scene coordinates
    pub fn center(&self) -> Pos2 {
        self.center
    }

    /// Multiply the zoom by `factor` (> 1 enlarges, < 1 shrinks).
    ///
    /// A shrink that would land below [`MIN_ZOOM`] is rejected outright.
    /// Each scene-rect edge moves inward by 10% of its dimension per
    /// zoom-in step and outward per zoom-out step; the adjustment is
    /// symmetric rather than centered on `anchor` (the canvas layer
    /// anchors the visual transform under the pointer itself).
    pub fn zoom_by(&mut self, factor: f32, anchor: Pos2) {
        if factor <= 0.0 {
            return;
        }
        if factor < 1.0 && self.zoom * factor < MIN_ZOOM {
            return;
        }
        let sign = if factor >= 1.0 { 1.0 } else { -1.0 };
        let rect = self.scene_rect;
        let dx = rect.width() * ZOOM_RECT_MARGIN * sign;
        let dy = rect.height() * ZOOM_RECT_MARGIN * sign;
        self.scene_rect = Rect::from_min_max(
            Pos2::new(rect.left() + dx, rect.top() + dy),
            Pos2::new(rect.right() - dx, rect.bottom() - dy),
        );
        self.zoom *= factor;
        trace!(zoom = self.zoom, anchor_x = anchor.x, anchor_y = anchor.y, "zoom");
    }

    /// Translate the view center by `delta`, scaled by the current zoom.
    ///
    /// When the pan pushes the center past an edge of the scene rect,
    /// that edge grows to accommodate it, so panning never silently
    /// clips.
    pub fn pan_by(&mut self, delta: Vec2) {
        let delta = delta * self.zoom;
        self.center += delta;

        let rect = &mut self.scene_rect;
        if delta.x < 0.0 && self.center.x < rect.left() {
            rect.set_left(rect.left() + delta.x);
        } else if delta.x > 0.0 && self.center.x > rect.right() {
            rect.set_right(rect.right() + delta.x);
        }
        if delta.y < 0.0 && self.center.y < rect.top() {
            rect.set_top(rect.top() + delta.y);
        } else if delta.y > 0.0 && self.center.y > rect.bottom() {
            rect.set_bottom(rect.bottom() + delta.y);
        }
        trace!(center_x = self.center.x, center_y = self.center.y, "pan");
    }

    /// Center the view on the bounding rectangle of the given nodes.
    ///
    /// An empty selection frames every node in the graph; a graph with
    /// no nodes is a no-op. With `reset_zoom` the transform first
    /// returns to 1x.
    pub fn frame(&mut self, graph: &Graph, selection: &[NodeId], reset_zoom: bool) {
        let mut bounds: Option<Rect> = None;
        let mut include = |rect: Rect| {
            bounds = Some(match bounds {
                Some(b) => b.union(rect),
                None => rect,
            });
        };

        if selection.is_empty() {
            for node in graph.nodes() {
                include(node_rect(node));
            }
        } else {
            for id in selection {
                if let Some(node) = graph.node(*id) {
                    include(node_rect(node));
                }
            }
        }

        let Some(bounds) = bounds else { return };
        if reset_zoom {
            self.zoom = 1.0;
        }
        self.center = bounds.center();
        trace!(center_x = self.center.x, center_y = self.center.y, "frame");
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_never_drops_below_minimum() {
        let mut view = ViewTransform::new();
        for _ in 0..100 {
            view.zoom_by(1.0 / ZOOM_STEP, Pos2::ZERO);
            assert!(view.zoom() >= MIN_ZOOM);
        }
    }

    #[test]
    fn test_rejected_shrink_leaves_state_untouched() {
        let mut view = ViewTransform::new();
        for _ in 0..100 {
            view.zoom_by(1.0 / ZOOM_STEP, Pos2::ZERO);
        }
        let zoom = view.zoom();
        let rect = view.scene_rect();
        view.zoom_by(1.0 / ZOOM_STEP, Pos2::ZERO);
        assert_eq!(view.zoom(), zoom);
        assert_eq!(view.scene_rect(), rect);
    }

    #[test]
    fn test_inverse_zoom_steps_cancel() {
        let mut view = ViewTransform::new();
        for _ in 0..5 {
            view.zoom_by(ZOOM_STEP, Pos2::ZERO);
        }
        for _ in 0..5 {
            view.zoom_by(1.0 / ZOOM_STEP, Pos2::ZERO);
        }
        assert!((view.zoom() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_in_contracts_scene_rect() {
        let mut view = ViewTransform::new();
        let before = view.scene_rect();
        view.zoom_by(ZOOM_STEP, Pos2::ZERO);
        let after = view.scene_rect();
        assert!(after.width() < before.width());
        assert!(after.height() < before.height());
        assert!(after.left() > before.left());

        view.zoom_by(1.0 / ZOOM_STEP, Pos2::ZERO);
        assert!(view.scene_rect().width() > after.width());
    }

    #[test]
    fn test_pan_grows_scene_rect_at_edges() {
        let mut view = ViewTransform::new();
        let rect = view.scene_rect();

        // Way past the left edge
        view.pan_by(Vec2::new(-2.0 * SCENE_EXTENT, 0.0));
        assert!(view.scene_rect().left() < rect.left());
        assert!(view.center().x >= view.scene_rect().left());

        // A small pan inside the range leaves the rect alone
        let rect = view.scene_rect();
        view.pan_by(Vec2::new(10.0, 0.0));
        assert_eq!(view.scene_rect(), rect);
    }

    #[test]
    fn test_pan_scales_with_zoom() {
        let mut view = ViewTransform::new();
        let start = view.center();
        view.zoom_by(ZOOM_STEP, Pos2::ZERO);
        view.pan_by(Vec2::new(10.0, 0.0));
        assert!((view.center().x - start.x - 10.0 * view.zoom()).abs() < 1e-3);
    }

    #[test]
    fn test_frame_centers_on_node_bounds() {
        let mut graph = Graph::new("test");
        graph.add_node(Node::new("A", [0.0, 0.0])).unwrap();
        graph.add_node(Node::new("B", [200.0, 300.0])).unwrap();

        let mut view = ViewTransform::new();
        view.zoom_by(ZOOM_STEP, Pos2::ZERO);
        view.frame(&graph, &[], true);

        assert_eq!(view.zoom(), 1.0);
        let bounds = node_rect(graph.nodes().next().unwrap())
            .union(node_rect(graph.nodes().nth(1).unwrap()));
        assert_eq!(view.center(), bounds.center());
    }

    #[test]
    fn test_frame_empty_graph_is_noop() {
        let graph = Graph::new("test");
        let mut view = ViewTransform::new();
        let center = view.center();
        view.frame(&graph, &[], true);
        assert_eq!(view.center(), center);
    }

    #[test]
    fn test_frame_selection_ignores_stale_ids() {
        let mut graph = Graph::new("test");
        let a = graph.add_node(Node::new("A", [50.0, 60.0])).unwrap();
        let stale = NodeId::new();

        let mut view = ViewTransform::new();
        view.frame(&graph, &[a, stale], false);
        assert_eq!(view.center(), node_rect(graph.node(a).unwrap()).center());
    }
}
