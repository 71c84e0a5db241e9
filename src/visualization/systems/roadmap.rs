//! Roadmap scene: node sync, constellation edges, and keyboard commands.

use bevy::prelude::*;

use crate::roadmap::{edge_curve, NodeRole};
use crate::visualization::components::RoadmapNode;
use crate::visualization::constants::{
    edge_pulse, node_scale, ACTIVE_NODE_SCALE, COLOR_EDGE, EDGE_SEGMENTS, NODE_SPIN_SPEED,
};
use crate::visualization::resources::{
    AppScene, CameraOrbit, CameraStateRes, CurrentSelection, DragState, LayoutRes, NodeMaterials,
    ViewSettings,
};

/// Move node spheres to their layout positions and apply role styling.
pub fn sync_nodes_system(
    time: Res<Time>,
    layout: Res<LayoutRes>,
    selection: Res<CurrentSelection>,
    camera_state: Res<CameraStateRes>,
    materials: Option<Res<NodeMaterials>>,
    mut node_query: Query<(
        &mut Transform,
        &mut MeshMaterial3d<StandardMaterial>,
        &RoadmapNode,
    )>,
) {
    let spin = if camera_state.0.locked {
        0.0
    } else {
        NODE_SPIN_SPEED * time.delta_secs()
    };

    for (mut transform, mut material, node) in node_query.iter_mut() {
        if let Some(position) = layout.0.positions().get(&node.id) {
            transform.translation = position;
        }
        transform.rotate_y(spin);

        let active = selection.active.as_deref() == Some(node.id.as_str());
        let scale = node_scale(node.role) * if active { ACTIVE_NODE_SCALE } else { 1.0 };
        transform.scale = Vec3::splat(scale);

        if let Some(materials) = &materials {
            let (normal, highlighted) = match node.role {
                NodeRole::Start => &materials.start,
                NodeRole::Pattern => &materials.pattern,
                NodeRole::Subpattern => &materials.subpattern,
            };
            let wanted = if active { highlighted } else { normal };
            if material.0 != *wanted {
                material.0 = wanted.clone();
            }
        }
    }
}

/// Draw curved edges. Animated edges pulse in opacity.
pub fn draw_edges_system(time: Res<Time>, layout: Res<LayoutRes>, mut gizmos: Gizmos) {
    let pulse = edge_pulse(time.elapsed_secs());
    for (edge, start, end) in layout.0.edge_endpoints() {
        let alpha = if edge.animated { 0.25 + 0.75 * pulse } else { 0.6 };
        gizmos.linestrip(
            edge_curve(start, end, EDGE_SEGMENTS),
            COLOR_EDGE.with_alpha(alpha),
        );
    }
}

/// Keyboard commands:
/// - `L`: Toggle locked mode
/// - `R`: Reset layout and camera framing
/// - `Escape`: Back to the galaxy
#[allow(clippy::too_many_arguments)]
pub fn roadmap_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<ViewSettings>,
    mut layout: ResMut<LayoutRes>,
    mut camera_state: ResMut<CameraStateRes>,
    mut orbit: ResMut<CameraOrbit>,
    mut selection: ResMut<CurrentSelection>,
    mut drag_state: ResMut<DragState>,
    mut next_scene: ResMut<NextState<AppScene>>,
) {
    if keyboard.just_pressed(KeyCode::KeyL) {
        camera_state.0.locked = !camera_state.0.locked;
        tracing::info!(
            "Locked mode {}",
            if camera_state.0.locked { "on" } else { "off" }
        );
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        let framing = layout.0.reset(&settings.camera);
        *orbit = CameraOrbit::from_position(framing.position, framing.target);
        selection.active = None;
        *drag_state = DragState::default();
        tracing::info!("Layout reset (camera distance {:.1})", framing.distance());
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        next_scene.set(AppScene::Galaxy);
    }
}
