//! Node and edge dragging, click-to-select, and focus.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::ui::Node as UiNode;

use crate::roadmap::{pointer_on_plane, DragSession, DragTarget};
use crate::visualization::components::{EdgeHotspot, MainCamera, RoadmapNode};
use crate::visualization::constants::{CLICK_THRESHOLD_PX, HOTSPOT_SIZE};
use crate::visualization::resources::{
    CameraOrbit, CameraStateRes, CurrentSelection, DragState, LayoutRes, MinimapState,
    NodeClicked, NodeSelected,
};

fn hotspot_contains(node_ui: &UiNode, cursor: Vec2) -> bool {
    let (Val::Px(left), Val::Px(top)) = (node_ui.left, node_ui.top) else {
        return false;
    };
    cursor.x >= left
        && cursor.x <= left + HOTSPOT_SIZE
        && cursor.y >= top
        && cursor.y <= top + HOTSPOT_SIZE
}

/// Drag nodes or edges with left-click. A short click on a node selects it.
///
/// Unlocked, a node drag moves only that node and edges cannot be dragged.
/// Locked, any drag translates the whole graph.
#[allow(clippy::too_many_arguments)]
pub fn drag_system(
    mut drag_state: ResMut<DragState>,
    mut layout: ResMut<LayoutRes>,
    camera_state: Res<CameraStateRes>,
    minimap: Res<MinimapState>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    node_query: Query<(&Transform, &RoadmapNode)>,
    hotspot_query: Query<(&UiNode, &EdgeHotspot)>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut clicked: EventWriter<NodeClicked>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let cursor = window.cursor_position();
    let ray = cursor.and_then(|c| camera.viewport_to_world(camera_transform, c).ok());
    let locked = camera_state.0.locked;

    // Start drag on left click
    if mouse_button.just_pressed(MouseButton::Left) {
        drag_state.session = None;
        drag_state.total_movement = 0.0;

        let in_minimap = cursor.is_some_and(|c| minimap.contains(c));
        if let (Some(ray), Some(cursor), false) = (ray, cursor, in_minimap) {
            // Find closest node hit by ray
            let mut closest: Option<(&str, f32, Vec3)> = None;
            for (transform, node) in node_query.iter() {
                let node_pos = transform.translation;
                let t = (node_pos - ray.origin).dot(*ray.direction);
                if t <= 0.0 {
                    continue;
                }
                let distance = (ray.origin + *ray.direction * t - node_pos).length();
                // Hit radius slightly larger than visual for easier selection
                if distance < node.radius * 1.8 && closest.is_none_or(|(_, best, _)| t < best) {
                    closest = Some((node.id.as_str(), t, node_pos));
                }
            }

            if let Some((id, _, node_pos)) = closest {
                if let Some(point) = pointer_on_plane(ray.origin, *ray.direction, node_pos.z) {
                    tracing::debug!("Drag start on node {id}");
                    drag_state.session = Some(DragSession::start_node(id, node_pos, point));
                }
            } else if let Some((_, hotspot)) = hotspot_query
                .iter()
                .find(|(node_ui, _)| hotspot_contains(node_ui, cursor))
            {
                let plane_z = layout.0.positions().centroid().z;
                if let Some(point) = pointer_on_plane(ray.origin, *ray.direction, plane_z) {
                    tracing::debug!("Drag start on edge {}", hotspot.edge_id);
                    drag_state.session = Some(DragSession::start_edge(point));
                }
            }
        }
    }

    // Continue drag
    let movement: f32 = mouse_motion.read().map(|ev| ev.delta.length()).sum();
    if mouse_button.pressed(MouseButton::Left) {
        if let Some(session) = drag_state.session.as_mut() {
            let plane_z = match session.target() {
                DragTarget::Node(id) => layout.0.positions().get(id).map(|p| p.z),
                DragTarget::Edge => Some(layout.0.positions().centroid().z),
            };
            if let Some(point) = ray
                .zip(plane_z)
                .and_then(|(ray, z)| pointer_on_plane(ray.origin, *ray.direction, z))
            {
                session.update(&mut layout.0, point, locked);
            }
        }
        if drag_state.session.is_some() {
            drag_state.total_movement += movement;
        }
    }

    // End drag on release
    if mouse_button.just_released(MouseButton::Left) {
        if let Some(session) = drag_state.session.take() {
            if let DragTarget::Node(id) = session.target() {
                if drag_state.total_movement < CLICK_THRESHOLD_PX && !locked {
                    clicked.send(NodeClicked(id.clone()));
                }
            }
        }
        drag_state.total_movement = 0.0;
    }
}

/// Activate a clicked node and focus the orbit on it, keeping the camera offset.
pub fn node_click_system(
    mut clicked: EventReader<NodeClicked>,
    mut selected: EventWriter<NodeSelected>,
    mut selection: ResMut<CurrentSelection>,
    mut orbit: ResMut<CameraOrbit>,
    layout: Res<LayoutRes>,
) {
    for NodeClicked(id) in clicked.read() {
        let Some(position) = layout.0.positions().get(id) else {
            continue;
        };
        orbit.target = position;
        selection.active = Some(id.clone());
        tracing::info!("Selected node {id}");
        selected.send(NodeSelected(id.clone()));
    }
}
