//! UI systems for labels, edge hotspots, the info panel, and the cursor.

use bevy::prelude::*;
use bevy::ui::Node as UiNode;
use bevy::window::SystemCursorIcon;
use bevy::winit::cursor::CursorIcon;

use crate::minimap::MinimapMode;
use crate::navigation::CursorStyle;
use crate::roadmap::{edge_point, NodeRole};
use crate::visualization::components::{
    EdgeHotspot, InfoPanelText, MainCamera, NodeLabel, RoadmapNode,
};
use crate::visualization::constants::HOTSPOT_SIZE;
use crate::visualization::resources::{
    AppScene, CameraStateRes, CurrentSelection, DragState, GalaxySurfaceRes, LayoutRes,
    MinimapState, NavigationRes,
};

/// Project a world point to the viewport if it lies in front of the camera.
fn screen_position(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    world: Vec3,
) -> Option<Vec2> {
    let to_point = world - camera_transform.translation();
    if to_point.dot(*camera_transform.forward()) <= 0.0 {
        return None;
    }
    camera.world_to_viewport(camera_transform, world).ok()
}

/// Keep labels just above their nodes in screen space.
pub fn update_labels_system(
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    node_query: Query<(&Transform, &RoadmapNode)>,
    mut label_query: Query<(&mut UiNode, &mut Visibility, &NodeLabel)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (mut node_ui, mut visibility, label) in label_query.iter_mut() {
        let Some((transform, node)) = node_query.iter().find(|(_, n)| n.id == label.id) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let anchor = transform.translation + Vec3::Y * (node.radius * 1.2 + 0.3);
        match screen_position(camera, camera_transform, anchor) {
            Some(pos) => {
                *visibility = Visibility::Visible;
                node_ui.left = Val::Px(pos.x - 40.0);
                node_ui.top = Val::Px(pos.y - 10.0);
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Center edge hotspots on the curve midpoints.
pub fn update_edge_hotspots_system(
    layout: Res<LayoutRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut hotspot_query: Query<(&mut UiNode, &EdgeHotspot)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (mut node_ui, hotspot) in hotspot_query.iter_mut() {
        let midpoint = layout
            .0
            .edge_endpoints()
            .find(|(edge, _, _)| edge.id == hotspot.edge_id)
            .map(|(_, a, b)| edge_point(a, b, 0.5));

        match midpoint.and_then(|m| screen_position(camera, camera_transform, m)) {
            Some(pos) => {
                node_ui.left = Val::Px(pos.x - HOTSPOT_SIZE / 2.0);
                node_ui.top = Val::Px(pos.y - HOTSPOT_SIZE / 2.0);
            }
            None => {
                // Move offscreen when behind camera
                node_ui.left = Val::Px(-100.0);
                node_ui.top = Val::Px(-100.0);
            }
        }
    }
}

fn role_name(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Start => "Start",
        NodeRole::Pattern => "Pattern",
        NodeRole::Subpattern => "Subpattern",
    }
}

/// Describe the active node, lock mode, and key bindings.
pub fn update_info_panel_system(
    selection: Res<CurrentSelection>,
    camera_state: Res<CameraStateRes>,
    minimap: Res<MinimapState>,
    layout: Res<LayoutRes>,
    mut text_query: Query<(&mut Text, Ref<InfoPanelText>)>,
    mut shown: Local<Option<(Option<String>, bool, MinimapMode)>>,
) {
    let Ok((mut text, marker)) = text_query.get_single_mut() else {
        return;
    };
    let current = (
        selection.active.clone(),
        camera_state.0.locked,
        minimap.mode,
    );
    // Freshly spawned panels are always filled
    if !marker.is_added() && shown.as_ref() == Some(&current) {
        return;
    }
    *shown = Some(current);

    let mut body = String::new();
    match selection.active.as_deref().and_then(|id| layout.0.node(id)) {
        Some(node) => {
            let connections: Vec<&str> = layout
                .0
                .edges()
                .iter()
                .filter_map(|e| {
                    if e.source == node.id {
                        Some(e.target.as_str())
                    } else if e.target == node.id {
                        Some(e.source.as_str())
                    } else {
                        None
                    }
                })
                .filter_map(|id| layout.0.node(id).map(|n| n.label.as_str()))
                .collect();
            body.push_str(&format!(
                "\n{}\nRole: {}\nConnections: {}\n{}\n",
                node.label,
                role_name(node.role),
                connections.len(),
                connections.join("\n")
            ));
        }
        None => body.push_str("\nClick a node to focus it.\n"),
    }

    body.push_str(&format!(
        "\nMode: {}\nMinimap: {:?}\n\n[L] lock  [R] reset  [M] minimap\n[+/-] zoom  [Esc] galaxy",
        if camera_state.0.locked { "locked" } else { "free" },
        minimap.mode
    ));
    **text = body;
}

fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => SystemCursorIcon::Default.into(),
        CursorStyle::Grab => SystemCursorIcon::Grab.into(),
        CursorStyle::Grabbing => SystemCursorIcon::Grabbing.into(),
    }
}

/// Follow drags and lock mode with the cursor, and record it in the store.
///
/// A hovered target star shows a grab cursor in the galaxy scene.
pub fn cursor_style_system(
    mut commands: Commands,
    scene: Res<State<AppScene>>,
    drag_state: Res<DragState>,
    camera_state: Res<CameraStateRes>,
    surface: Option<Res<GalaxySurfaceRes>>,
    mut navigation: ResMut<NavigationRes>,
    windows: Query<Entity, With<Window>>,
    mut applied: Local<bool>,
) {
    let style = match scene.get() {
        AppScene::Roadmap if drag_state.session.is_some() => CursorStyle::Grabbing,
        AppScene::Roadmap if camera_state.0.locked => CursorStyle::Grab,
        AppScene::Galaxy if surface.is_some_and(|s| s.0.hovered()) => CursorStyle::Grab,
        _ => CursorStyle::Default,
    };
    if *applied && navigation.0.cursor_style() == style {
        return;
    }
    *applied = true;

    if navigation.0.cursor_style() != style {
        navigation.0.set_cursor_style(style);
    }
    for window in windows.iter() {
        commands.entity(window).insert(cursor_icon(style));
    }
}
