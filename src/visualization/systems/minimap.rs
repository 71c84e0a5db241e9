//! Minimap viewport, mode switching, and drawing.
//!
//! The minimap camera renders only [`MinimapGizmos`] on its own render layer.
//! In 2D mode it looks down an orthographic box sized to the canvas, so one
//! world unit is one canvas pixel. In 3D mode it orbits the graph.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::render::camera::{ScalingMode, Viewport};
use bevy::ui::Node as UiNode;

use crate::minimap::{project_2d, CameraView, FrustumBox, MinimapCanvas, MinimapMode};
use crate::visualization::components::{MainCamera, MinimapCamera};
use crate::visualization::constants::{
    minimap_color, MINIMAP_EDGE, MINIMAP_MARGIN, MINIMAP_VIEW,
};
use crate::visualization::resources::{
    CameraStateRes, CurrentSelection, LayoutRes, MinimapOrbit, MinimapState, ViewSettings,
};

/// Gizmo group drawn only by the minimap camera.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct MinimapGizmos;

/// UI border around the minimap viewport.
#[derive(Component)]
pub struct MinimapFrame;

const MINIMAP_FOV_DEGREES: f32 = 50.0;
const DOT_SEGMENTS: usize = 12;
const NODE_MARKER_SIZE: f32 = 0.35;

/// Canvas pixel coordinates (origin top-left, y down) to minimap world space.
fn canvas_to_world(canvas: &MinimapCanvas, point: Vec2) -> Vec3 {
    Vec3::new(
        point.x - canvas.width / 2.0,
        canvas.height / 2.0 - point.y,
        0.0,
    )
}

fn ring(center: Vec3, radius: f32) -> impl Iterator<Item = Vec3> {
    (0..=DOT_SEGMENTS).map(move |i| {
        let angle = std::f32::consts::TAU * i as f32 / DOT_SEGMENTS as f32;
        center + Vec3::new(angle.cos(), angle.sin(), 0.0) * radius
    })
}

pub fn minimap_projection(mode: MinimapMode, canvas: &MinimapCanvas) -> Projection {
    match mode {
        MinimapMode::TwoD => Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: canvas.width,
                height: canvas.height,
            },
            ..OrthographicProjection::default_3d()
        }),
        MinimapMode::ThreeD => Projection::Perspective(PerspectiveProjection {
            fov: MINIMAP_FOV_DEGREES.to_radians(),
            ..default()
        }),
    }
}

pub fn minimap_transform(mode: MinimapMode, orbit: &MinimapOrbit) -> Transform {
    match mode {
        MinimapMode::TwoD => Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
        MinimapMode::ThreeD => {
            Transform::from_translation(orbit.0.position()).looking_at(orbit.0.target, Vec3::Y)
        }
    }
}

/// Pin the minimap to the bottom-right corner of the window.
pub fn minimap_viewport_system(
    mut minimap: ResMut<MinimapState>,
    windows: Query<&Window>,
    mut camera_query: Query<&mut Camera, With<MinimapCamera>>,
    mut frame_query: Query<&mut UiNode, With<MinimapFrame>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let canvas = minimap.canvas;
    let min = Vec2::new(
        (window.width() - MINIMAP_MARGIN - canvas.width).max(0.0),
        (window.height() - MINIMAP_MARGIN - canvas.height).max(0.0),
    );
    let rect = Rect::from_corners(min, min + Vec2::new(canvas.width, canvas.height));
    if minimap.rect != rect {
        minimap.rect = rect;
    }

    let scale = window.scale_factor();
    let physical_window = window.physical_size();
    let position = (rect.min * scale).as_uvec2().min(physical_window);
    let size = (rect.size() * scale)
        .as_uvec2()
        .min(physical_window.saturating_sub(position))
        .max(UVec2::ONE);

    for mut camera in camera_query.iter_mut() {
        let viewport = Viewport {
            physical_position: position,
            physical_size: size,
            ..default()
        };
        let stale = camera.viewport.as_ref().is_none_or(|current| {
            current.physical_position != position || current.physical_size != size
        });
        if stale {
            camera.viewport = Some(viewport);
        }
    }

    for mut node in frame_query.iter_mut() {
        node.left = Val::Px(rect.min.x - 2.0);
        node.top = Val::Px(rect.min.y - 2.0);
    }
}

/// `M` toggles between the 2D projection and the 3D miniature.
pub fn minimap_mode_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut minimap: ResMut<MinimapState>,
    orbit: Res<MinimapOrbit>,
    mut camera_query: Query<(&mut Projection, &mut Transform), With<MinimapCamera>>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        minimap.mode = minimap.mode.toggle();
        tracing::info!("Minimap mode {:?}", minimap.mode);
    }

    if !minimap.is_changed() && !orbit.is_changed() {
        return;
    }
    for (mut projection, mut transform) in camera_query.iter_mut() {
        let wanted = minimap_projection(minimap.mode, &minimap.canvas);
        if std::mem::discriminant(&*projection) != std::mem::discriminant(&wanted) {
            *projection = wanted;
        }
        *transform = minimap_transform(minimap.mode, &orbit);
    }
}

/// Left-drag inside the 3D minimap orbits its camera.
pub fn minimap_orbit_system(
    minimap: Res<MinimapState>,
    mut orbit: ResMut<MinimapOrbit>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut dragging: Local<bool>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        *dragging = minimap.mode == MinimapMode::ThreeD
            && windows
                .get_single()
                .ok()
                .and_then(Window::cursor_position)
                .is_some_and(|cursor| minimap.contains(cursor));
    }
    if !mouse_button.pressed(MouseButton::Left) {
        *dragging = false;
    }

    if !*dragging {
        mouse_motion.clear();
        return;
    }
    for ev in mouse_motion.read() {
        orbit.0.yaw -= ev.delta.x * 0.01;
        orbit.0.pitch = (orbit.0.pitch + ev.delta.y * 0.01).clamp(-1.5, 1.5);
    }
}

/// Draw the minimap for the current mode.
pub fn draw_minimap_system(
    minimap: Res<MinimapState>,
    layout: Res<LayoutRes>,
    selection: Res<CurrentSelection>,
    camera_state: Res<CameraStateRes>,
    settings: Res<ViewSettings>,
    windows: Query<&Window>,
    main_camera: Query<&GlobalTransform, With<MainCamera>>,
    mut gizmos: Gizmos<MinimapGizmos>,
) {
    let aspect = windows
        .get_single()
        .ok()
        .filter(|w| w.height() > 0.0)
        .map_or(16.0 / 9.0, |w| w.width() / w.height());
    let position = main_camera
        .get_single()
        .map_or(camera_state.0.position, GlobalTransform::translation);
    let view = CameraView::looking_at(
        position,
        camera_state.0.look_at,
        settings.camera.fov_degrees,
        aspect,
    );
    let active = selection.active.as_deref();

    match minimap.mode {
        MinimapMode::TwoD => {
            let canvas = minimap.canvas;
            let frame = project_2d(&layout.0, active, &view, canvas);

            for (a, b) in &frame.lines {
                gizmos.line(
                    canvas_to_world(&canvas, *a),
                    canvas_to_world(&canvas, *b),
                    MINIMAP_EDGE,
                );
            }
            for dot in &frame.dots {
                let center = canvas_to_world(&canvas, dot.position);
                let color = minimap_color(dot.role, dot.active);
                for fraction in [1.0, 0.66, 0.33] {
                    gizmos.linestrip(ring(center, dot.radius * fraction), color);
                }
            }
            let quad = frame.view_quad.map(|corner| canvas_to_world(&canvas, corner));
            gizmos.linestrip(quad.iter().copied().chain([quad[0]]), MINIMAP_VIEW);
        }
        MinimapMode::ThreeD => {
            for (_, a, b) in layout.0.edge_endpoints() {
                gizmos.line(a, b, MINIMAP_EDGE);
            }
            for node in layout.0.nodes() {
                let Some(p) = layout.0.positions().get(&node.id) else {
                    continue;
                };
                let color = minimap_color(node.role, active == Some(node.id.as_str()));
                for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                    gizmos.line(
                        p - axis * NODE_MARKER_SIZE,
                        p + axis * NODE_MARKER_SIZE,
                        color,
                    );
                }
            }
            for (a, b) in FrustumBox::from_view(&view).edges() {
                gizmos.line(a, b, MINIMAP_VIEW);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_to_world_centers_canvas() {
        let canvas = MinimapCanvas::default();
        assert_eq!(canvas_to_world(&canvas, canvas.center()), Vec3::ZERO);
        let top_left = canvas_to_world(&canvas, Vec2::ZERO);
        assert_eq!(top_left, Vec3::new(-canvas.width / 2.0, canvas.height / 2.0, 0.0));
    }

    #[test]
    fn test_ring_is_closed() {
        let points: Vec<Vec3> = ring(Vec3::ZERO, 4.0).collect();
        assert_eq!(points.len(), DOT_SEGMENTS + 1);
        assert!(points[0].distance(points[DOT_SEGMENTS]) < 1e-4);
        assert!(points.iter().all(|p| (p.length() - 4.0).abs() < 1e-4));
    }
}
