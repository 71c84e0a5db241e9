//! 2D minimap projection.
//!
//! Node positions are normalized into the canvas rectangle (minus padding)
//! with canvas y growing downward. Everything here reads the same
//! [`NodePositionMap`] and active node as the main view.

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::frustum::{viewport_corners, CameraView};
use crate::roadmap::{LayoutEngine, NodePositionMap, NodeRole};

pub const ACTIVE_DOT_RADIUS: f32 = 6.0;
pub const DOT_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinimapMode {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

impl MinimapMode {
    pub fn toggle(self) -> Self {
        match self {
            MinimapMode::TwoD => MinimapMode::ThreeD,
            MinimapMode::ThreeD => MinimapMode::TwoD,
        }
    }
}

/// Canvas size and padding in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapCanvas {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Default for MinimapCanvas {
    fn default() -> Self {
        Self {
            width: 192.0,
            height: 144.0,
            padding: 20.0,
        }
    }
}

impl MinimapCanvas {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Maps world x/y into canvas pixels for one set of node bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjector {
    canvas: MinimapCanvas,
    min: Vec2,
    max: Vec2,
}

impl MinimapProjector {
    /// Build a projector for the current positions. An empty map projects
    /// everything to the canvas center.
    pub fn new(canvas: MinimapCanvas, positions: &NodePositionMap) -> Self {
        let (min, max) = positions
            .bounds()
            .map(|(lo, hi)| (lo.truncate(), hi.truncate()))
            .unwrap_or((Vec2::ZERO, Vec2::ZERO));
        Self { canvas, min, max }
    }

    pub fn canvas(&self) -> &MinimapCanvas {
        &self.canvas
    }

    /// Project a world position. An axis with zero extent maps to the
    /// canvas center on that axis.
    pub fn project(&self, world: Vec3) -> Vec2 {
        let inner_w = self.canvas.width - 2.0 * self.canvas.padding;
        let inner_h = self.canvas.height - 2.0 * self.canvas.padding;
        let span = self.max - self.min;
        let center = self.canvas.center();

        let x = if span.x > f32::EPSILON {
            self.canvas.padding + (world.x - self.min.x) / span.x * inner_w
        } else {
            center.x
        };
        let y = if span.y > f32::EPSILON {
            self.canvas.height - (self.canvas.padding + (world.y - self.min.y) / span.y * inner_h)
        } else {
            center.y
        };
        Vec2::new(x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimapDot {
    pub id: String,
    pub position: Vec2,
    pub role: NodeRole,
    pub active: bool,
    pub radius: f32,
}

/// Everything the 2D minimap draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapFrame2d {
    pub dots: Vec<MinimapDot>,
    pub lines: Vec<(Vec2, Vec2)>,
    /// Main camera view rectangle, counter-clockwise from bottom-left.
    pub view_quad: [Vec2; 4],
}

/// Project nodes, edges, and the main camera's view into canvas space.
///
/// Edges with unknown endpoints are skipped.
pub fn project_2d(
    engine: &LayoutEngine,
    active: Option<&str>,
    camera: &CameraView,
    canvas: MinimapCanvas,
) -> MinimapFrame2d {
    let positions = engine.positions();
    let projector = MinimapProjector::new(canvas, positions);

    let lines = engine
        .edge_endpoints()
        .map(|(_, a, b)| (projector.project(a), projector.project(b)))
        .collect();

    let dots = engine
        .nodes()
        .iter()
        .filter_map(|node| {
            let world = positions.get(&node.id)?;
            let is_active = active == Some(node.id.as_str());
            Some(MinimapDot {
                id: node.id.clone(),
                position: projector.project(world),
                role: node.role,
                active: is_active,
                radius: if is_active {
                    ACTIVE_DOT_RADIUS
                } else {
                    DOT_RADIUS
                },
            })
        })
        .collect();

    let view_quad = viewport_corners(camera).map(|corner| projector.project(corner));

    MinimapFrame2d {
        dots,
        lines,
        view_quad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::{layout, AuthoringPosition, GraphNode, RoadmapData};

    fn node(id: &str, x: f32, y: f32) -> GraphNode {
        GraphNode {
            id: id.into(),
            label: id.into(),
            position: AuthoringPosition { x, y },
            role: NodeRole::Subpattern,
        }
    }

    #[test]
    fn test_projection_fills_padded_canvas_with_y_flipped() {
        let map = layout(&[node("a", 0.0, 0.0), node("b", 100.0, 100.0)]);
        let projector = MinimapProjector::new(MinimapCanvas::default(), &map);
        let a = projector.project(map.get("a").unwrap());
        let b = projector.project(map.get("b").unwrap());
        assert!((a - Vec2::new(20.0, 124.0)).length() < 1e-4);
        assert!((b - Vec2::new(172.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_degenerate_axis_maps_to_center() {
        let map = layout(&[node("a", 0.0, 50.0), node("b", 100.0, 50.0)]);
        let projector = MinimapProjector::new(MinimapCanvas::default(), &map);
        for (_, p) in map.iter() {
            let projected = projector.project(p);
            assert!(projected.is_finite());
            assert_eq!(projected.y, 72.0);
        }
        let single = layout(&[node("only", 3.0, 4.0)]);
        let projector = MinimapProjector::new(MinimapCanvas::default(), &single);
        assert_eq!(projector.project(single.get("only").unwrap()), Vec2::new(96.0, 72.0));
    }

    #[test]
    fn test_frame_highlights_active_node() {
        let engine = LayoutEngine::new(RoadmapData::builtin().unwrap());
        let framing = engine.framing(&Default::default());
        let view = CameraView::looking_at(framing.position, framing.target, 75.0, 16.0 / 9.0);
        let frame = project_2d(&engine, Some("p1"), &view, MinimapCanvas::default());
        assert_eq!(frame.dots.len(), 18);
        assert_eq!(frame.lines.len(), 21);
        let active: Vec<_> = frame.dots.iter().filter(|d| d.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "p1");
        assert_eq!(active[0].radius, ACTIVE_DOT_RADIUS);
    }

    #[test]
    fn test_view_quad_follows_camera() {
        let engine = LayoutEngine::new(RoadmapData::builtin().unwrap());
        let canvas = MinimapCanvas::default();
        let near = CameraView::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 75.0, 1.5);
        let far = CameraView::looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 75.0, 1.5);
        let width = |view: &CameraView| {
            let quad = project_2d(&engine, None, view, canvas).view_quad;
            (quad[1].x - quad[0].x).abs()
        };
        assert!(width(&far) > width(&near) * 1.9);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(MinimapMode::TwoD.toggle(), MinimapMode::ThreeD);
        assert_eq!(MinimapMode::TwoD.toggle().toggle(), MinimapMode::TwoD);
    }
}
