//! Pointer drag sessions over the roadmap plane.

use bevy::math::Vec3;

use super::layout::LayoutEngine;

#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Node(String),
    Edge,
}

/// One press-move-release sequence.
///
/// Positions come from intersecting the pointer ray with the graph plane.
/// The grab offset keeps a node from jumping to the cursor on the first move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    target: DragTarget,
    last_point: Vec3,
    grab_offset: Vec3,
}

impl DragSession {
    pub fn start_node(id: impl Into<String>, node_position: Vec3, pointer: Vec3) -> Self {
        Self {
            target: DragTarget::Node(id.into()),
            last_point: pointer,
            grab_offset: node_position - pointer,
        }
    }

    pub fn start_edge(pointer: Vec3) -> Self {
        Self {
            target: DragTarget::Edge,
            last_point: pointer,
            grab_offset: Vec3::ZERO,
        }
    }

    pub fn target(&self) -> &DragTarget {
        &self.target
    }

    /// Apply the pointer's new plane position to the layout.
    pub fn update(&mut self, engine: &mut LayoutEngine, pointer: Vec3, locked: bool) -> bool {
        let moved = match &self.target {
            DragTarget::Node(id) => engine.drag_node(id, pointer + self.grab_offset, locked),
            DragTarget::Edge => engine.drag_edges(pointer - self.last_point, locked),
        };
        self.last_point = pointer;
        moved
    }
}

/// Intersect a ray with the plane `z = plane_z`.
pub fn pointer_on_plane(origin: Vec3, direction: Vec3, plane_z: f32) -> Option<Vec3> {
    if direction.z.abs() < 1e-6 {
        return None;
    }
    let t = (plane_z - origin.z) / direction.z;
    (t >= 0.0).then(|| origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::model::RoadmapData;

    #[test]
    fn test_pointer_on_plane() {
        let hit = pointer_on_plane(Vec3::new(1.0, 2.0, 10.0), Vec3::NEG_Z, 0.0).unwrap();
        assert_eq!(hit, Vec3::new(1.0, 2.0, 0.0));
        assert!(pointer_on_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, 0.0).is_none());
        assert!(pointer_on_plane(Vec3::ZERO, Vec3::X, 0.0).is_none());
    }

    #[test]
    fn test_node_drag_keeps_grab_offset() {
        let mut engine = LayoutEngine::new(RoadmapData::builtin().unwrap());
        let start = engine.positions().get("p1").unwrap();
        let grab = start + Vec3::new(0.2, 0.1, 0.0);
        let mut session = DragSession::start_node("p1", start, grab);
        assert!(session.update(&mut engine, grab + Vec3::X, false));
        let moved = engine.positions().get("p1").unwrap();
        assert!((moved - (start + Vec3::X)).length() < 1e-5);
    }

    #[test]
    fn test_edge_drag_accumulates_deltas_when_locked() {
        let mut engine = LayoutEngine::new(RoadmapData::builtin().unwrap());
        let before = engine.positions().get("start").unwrap();
        let mut session = DragSession::start_edge(Vec3::ZERO);
        session.update(&mut engine, Vec3::new(1.0, 0.0, 0.0), true);
        session.update(&mut engine, Vec3::new(1.0, 2.0, 0.0), true);
        let after = engine.positions().get("start").unwrap();
        assert!((after - before - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_edge_drag_ignored_when_unlocked() {
        let mut engine = LayoutEngine::new(RoadmapData::builtin().unwrap());
        let before = engine.positions().clone();
        let mut session = DragSession::start_edge(Vec3::ZERO);
        assert!(!session.update(&mut engine, Vec3::ONE, false));
        assert_eq!(engine.positions(), &before);
    }
}
