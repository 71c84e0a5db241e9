//! Camera orbit, pan, and zoom systems.

use std::f32::consts::FRAC_PI_4;

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::camera::{zoom, ZoomDirection};
use crate::visualization::components::MainCamera;
use crate::visualization::resources::{CameraOrbit, CameraStateRes, MinimapState, ViewSettings};

/// Orbit sensitivity in radians per pixel.
const ORBIT_SPEED: f32 = 0.01;
/// Pan sensitivity in world units per pixel.
const PAN_SPEED: f32 = 0.02;
/// Galaxy view pitch limit, matching a polar angle range of [π/4, 3π/4].
const GALAXY_PITCH_LIMIT: f32 = FRAC_PI_4;

/// Place the main camera according to the orbit.
pub fn apply_orbit(orbit: &CameraOrbit, transform: &mut Transform) {
    *transform = Transform::from_translation(orbit.position()).looking_at(orbit.target, Vec3::Y);
}

fn wheel_direction(ev: &MouseWheel) -> Option<ZoomDirection> {
    if ev.y > 0.0 {
        Some(ZoomDirection::In)
    } else if ev.y < 0.0 {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}

/// Free orbit around the galaxy.
///
/// Controls:
/// - Right-click drag: Orbit around the center
/// - Scroll wheel: Zoom
///
/// Input is ignored while a transition is running.
pub fn galaxy_camera_system(
    mut orbit: ResMut<CameraOrbit>,
    mut camera_state: ResMut<CameraStateRes>,
    settings: Res<ViewSettings>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    if !camera_state.0.orbit_enabled() {
        mouse_motion.clear();
        scroll.clear();
        return;
    }

    if mouse_button.pressed(MouseButton::Right) {
        for ev in mouse_motion.read() {
            orbit.yaw -= ev.delta.x * ORBIT_SPEED;
            orbit.pitch = (orbit.pitch + ev.delta.y * ORBIT_SPEED)
                .clamp(-GALAXY_PITCH_LIMIT, GALAXY_PITCH_LIMIT);
        }
    } else {
        mouse_motion.clear();
    }

    for ev in scroll.read() {
        orbit.distance = settings
            .camera
            .clamp_distance(orbit.distance - ev.y * 0.5);
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        apply_orbit(&orbit, &mut transform);
        camera_state.0.position = transform.translation;
        camera_state.0.look_at = orbit.target;
    }
}

/// Orbit, pan, and zoom over the roadmap.
///
/// Controls:
/// - Right-click drag: Orbit around target (unlocked only)
/// - Middle-click drag (or Alt+right-click): Pan (unlocked only)
/// - Scroll wheel, `+` / `-`: Zoom by fixed factors
#[allow(clippy::too_many_arguments)]
pub fn roadmap_camera_system(
    mut orbit: ResMut<CameraOrbit>,
    mut camera_state: ResMut<CameraStateRes>,
    settings: Res<ViewSettings>,
    minimap: Res<MinimapState>,
    windows: Query<&Window>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    let over_minimap = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .is_some_and(|cursor| minimap.contains(cursor));

    let alt_held = keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
    let rotating = mouse_button.pressed(MouseButton::Right) && !alt_held;
    let panning = mouse_button.pressed(MouseButton::Middle)
        || (mouse_button.pressed(MouseButton::Right) && alt_held);

    if camera_state.0.locked || over_minimap || !(rotating || panning) {
        mouse_motion.clear();
    } else {
        for ev in mouse_motion.read() {
            if rotating {
                orbit.yaw -= ev.delta.x * ORBIT_SPEED;
                orbit.pitch = (orbit.pitch + ev.delta.y * ORBIT_SPEED).clamp(-1.5, 1.5);
            } else {
                // Pan perpendicular to view direction
                let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());
                orbit.target += right * -ev.delta.x * PAN_SPEED;
                orbit.target += Vec3::Y * ev.delta.y * PAN_SPEED;
            }
        }
    }

    let mut steps: Vec<ZoomDirection> = Vec::new();
    if over_minimap {
        scroll.clear();
    } else {
        steps.extend(scroll.read().filter_map(wheel_direction));
    }
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        steps.push(ZoomDirection::In);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        steps.push(ZoomDirection::Out);
    }
    for direction in steps {
        let position = zoom(orbit.position(), orbit.target, direction, &settings.camera);
        orbit.distance = position.distance(orbit.target);
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        apply_orbit(&orbit, &mut transform);
        camera_state.0.position = transform.translation;
        camera_state.0.look_at = orbit.target;
    }
}
