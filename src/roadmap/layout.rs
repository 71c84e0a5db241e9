//! Node-graph layout: authoring positions to centered world coordinates,
//! plus the drag and reset operations that are its only mutators.

use std::collections::HashMap;

use bevy::math::Vec3;
use serde::Serialize;

use super::model::{GraphEdge, GraphNode, RoadmapData};
use crate::camera::{frame_positions, CameraSettings, Framing};

/// Authoring units per world unit.
pub const NODE_SCALE: f32 = 25.0;
/// Bézier control point lift along z, as a share of the edge length.
pub const EDGE_ARC: f32 = 0.2;

/// Node id to world position, in node order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePositionMap {
    ids: Vec<String>,
    positions: Vec<Vec3>,
    index: HashMap<String, usize>,
}

impl NodePositionMap {
    pub fn get(&self, id: &str) -> Option<Vec3> {
        self.index.get(id).map(|&idx| self.positions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.positions.iter().copied())
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Serializable copy for renderers outside the ECS.
    pub fn snapshot(&self) -> Vec<PositionEntry> {
        self.iter()
            .map(|(id, p)| PositionEntry {
                id: id.to_string(),
                position: p.to_array(),
            })
            .collect()
    }

    fn translate_all(&mut self, delta: Vec3) {
        for p in &mut self.positions {
            *p += delta;
        }
    }

    fn set(&mut self, id: &str, position: Vec3) -> bool {
        match self.index.get(id) {
            Some(&idx) => {
                self.positions[idx] = position;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEntry {
    pub id: String,
    pub position: [f32; 3],
}

/// Map authoring positions onto the z = 0 plane and center on the centroid.
///
/// A repeated id keeps its first position; later copies are skipped.
pub fn layout(nodes: &[GraphNode]) -> NodePositionMap {
    let mut map = NodePositionMap::default();
    for node in nodes {
        if map.index.contains_key(&node.id) {
            tracing::warn!("Skipping duplicate roadmap node {}", node.id);
            continue;
        }
        let position = Vec3::new(
            node.position.x / NODE_SCALE,
            node.position.y / NODE_SCALE,
            0.0,
        );
        map.index.insert(node.id.clone(), map.ids.len());
        map.ids.push(node.id.clone());
        map.positions.push(position);
    }
    let centroid = map.centroid();
    map.translate_all(-centroid);
    map
}

/// Owns the roadmap content and its live node positions.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    data: RoadmapData,
    positions: NodePositionMap,
}

impl LayoutEngine {
    pub fn new(data: RoadmapData) -> Self {
        let positions = layout(&data.nodes);
        tracing::info!(
            "Laid out roadmap: {} nodes, {} edges",
            data.nodes.len(),
            data.edges.len()
        );
        Self { data, positions }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.data.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.data.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.data.node(id)
    }

    pub fn positions(&self) -> &NodePositionMap {
        &self.positions
    }

    /// Move a node. When `locked`, the node's displacement is applied to
    /// every node instead. Returns false for an unknown id.
    pub fn drag_node(&mut self, id: &str, new_position: Vec3, locked: bool) -> bool {
        let Some(old) = self.positions.get(id) else {
            return false;
        };
        if locked {
            self.positions.translate_all(new_position - old);
            true
        } else {
            self.positions.set(id, new_position)
        }
    }

    /// Translate the whole graph by `delta`. Only allowed in locked mode.
    pub fn drag_edges(&mut self, delta: Vec3, locked: bool) -> bool {
        if !locked {
            return false;
        }
        self.positions.translate_all(delta);
        true
    }

    /// Discard all drags and return a framing for the restored layout.
    pub fn reset(&mut self, settings: &CameraSettings) -> Framing {
        self.positions = layout(&self.data.nodes);
        tracing::debug!("Roadmap layout reset");
        self.framing(settings)
    }

    pub fn framing(&self, settings: &CameraSettings) -> Framing {
        frame_positions(self.positions.positions(), settings)
    }

    /// Edges whose endpoints both exist, with their current positions.
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (&GraphEdge, Vec3, Vec3)> {
        self.data.edges.iter().filter_map(|edge| {
            let start = self.positions.get(&edge.source)?;
            let end = self.positions.get(&edge.target)?;
            Some((edge, start, end))
        })
    }
}

/// Sample the quadratic Bézier drawn for an edge.
///
/// The control point sits at the midpoint, lifted along z by
/// `EDGE_ARC * |end - start|`.
pub fn edge_curve(start: Vec3, end: Vec3, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| edge_point(start, end, i as f32 / segments as f32))
        .collect()
}

/// Point at parameter `t` on the edge curve between `start` and `end`.
pub fn edge_point(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    let control = start.lerp(end, 0.5) + Vec3::Z * (start.distance(end) * EDGE_ARC);
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}
