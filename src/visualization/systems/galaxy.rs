//! Galaxy scene: field animation, target picking, and the camera flight.

use bevy::prelude::*;

use crate::camera::{advance, TransitionEvent, TransitionPhase};
use crate::galaxy::{cycle, generate_with_targets, GalaxyTarget, SurfaceHit, TARGET_STAR};
use crate::visualization::components::{GalaxyRoot, MainCamera, TargetStar};
use crate::visualization::constants::TARGET_HOVER_SCALE;
use crate::visualization::resources::{
    AppScene, CameraOrbit, CameraStateRes, GalaxyControls, GalaxySurfaceRes, NavigationRes,
    ParticleFieldRes, TargetClicked, TargetMaterials, TransitionCompleted, ViewSettings,
};
use crate::visualization::setup::particle_mesh;

/// Keyboard controls for the field.
///
/// - `G`: next preset
/// - `D`: toggle dust lanes
/// - `N`: toggle the active nucleus
/// - `A`: toggle auto-rotation
///
/// Any parameter change regenerates the field and swaps the point mesh in place.
#[allow(clippy::too_many_arguments)]
pub fn galaxy_controls_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    camera_state: Res<CameraStateRes>,
    mut controls: ResMut<GalaxyControls>,
    mut field: ResMut<ParticleFieldRes>,
    mut surface: ResMut<GalaxySurfaceRes>,
    mut meshes: ResMut<Assets<Mesh>>,
    root_query: Query<&Mesh3d, With<GalaxyRoot>>,
) {
    if keyboard.just_pressed(KeyCode::KeyA) {
        controls.auto_rotate = !controls.auto_rotate;
        surface.0.set_auto_rotate(controls.auto_rotate);
        tracing::info!("Galaxy auto-rotate: {}", controls.auto_rotate);
    }

    let mut next = controls.config.clone();
    if keyboard.just_pressed(KeyCode::KeyG) {
        next = cycle(&next);
    }
    if keyboard.just_pressed(KeyCode::KeyD) {
        next.dust_lanes = !next.dust_lanes;
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        next.has_active_nucleus = !next.has_active_nucleus;
    }
    if next == controls.config {
        return;
    }
    if !camera_state.0.orbit_enabled() {
        tracing::debug!("Galaxy change ignored during camera flight");
        return;
    }

    let target = GalaxyTarget::new(TARGET_STAR, controls.target);
    let regenerated = match generate_with_targets(&next, &[target]) {
        Ok(regenerated) => regenerated,
        Err(err) => {
            tracing::warn!("Galaxy regeneration failed: {err}");
            return;
        }
    };

    // Point meshes live only in the render world, so the asset is replaced
    // rather than edited.
    for mesh in root_query.iter() {
        meshes.insert(&mesh.0, particle_mesh(&regenerated));
    }
    surface.0.rebind(&regenerated, TARGET_STAR);
    field.0 = regenerated;
    tracing::info!(
        "Regenerated {} galaxy (dust lanes: {}, active nucleus: {})",
        next.galaxy_type,
        next.dust_lanes,
        next.has_active_nucleus
    );
    controls.config = next;
}

/// Rotate the field and play the entry animation.
pub fn animate_galaxy_system(
    time: Res<Time>,
    mut surface: ResMut<GalaxySurfaceRes>,
    mut root_query: Query<&mut Transform, With<GalaxyRoot>>,
) {
    surface.0.advance(time.delta_secs());

    for mut transform in root_query.iter_mut() {
        transform.rotation = Quat::from_rotation_y(surface.0.rotation());
        transform.scale = Vec3::splat(surface.0.scale());
    }
}

/// Hover highlight and click detection on the target star.
#[allow(clippy::too_many_arguments)]
pub fn target_pointer_system(
    mut surface: ResMut<GalaxySurfaceRes>,
    camera_state: Res<CameraStateRes>,
    materials: Option<Res<TargetMaterials>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut star_query: Query<
        (&mut Transform, &mut MeshMaterial3d<StandardMaterial>),
        With<TargetStar>,
    >,
    mut clicked: EventWriter<TargetClicked>,
) {
    let ray = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .zip(camera_query.get_single().ok())
        .and_then(|(cursor, (camera, transform))| {
            camera.viewport_to_world(transform, cursor).ok()
        });

    let changed = match ray {
        Some(ray) if camera_state.0.orbit_enabled() => {
            surface.0.update_hover(ray.origin, *ray.direction)
        }
        _ => {
            let was_hovered = surface.0.hovered();
            surface.0.clear_hover();
            was_hovered
        }
    };

    if changed {
        let hovered = surface.0.hovered();
        tracing::debug!("Target hover: {hovered}");
        for (mut transform, mut material) in star_query.iter_mut() {
            transform.scale = Vec3::splat(if hovered { TARGET_HOVER_SCALE } else { 1.0 });
            if let Some(materials) = &materials {
                material.0 = if hovered {
                    materials.hover.clone()
                } else {
                    materials.normal.clone()
                };
            }
        }
    }

    if !mouse_button.just_pressed(MouseButton::Left) || !camera_state.0.orbit_enabled() {
        return;
    }
    let Some(ray) = ray else {
        return;
    };
    match surface.0.click(ray.origin, *ray.direction) {
        SurfaceHit::Target => {
            if let Some(target) = surface.0.target_world_position() {
                tracing::info!("Target star clicked at {target}");
                clicked.send(TargetClicked { target });
            }
        }
        SurfaceHit::Unsettled => tracing::debug!("Click ignored during entry animation"),
        SurfaceHit::Miss => {}
    }
}

/// Start the camera flight toward a clicked target.
pub fn begin_transition_system(
    mut events: EventReader<TargetClicked>,
    mut camera_state: ResMut<CameraStateRes>,
    mut navigation: ResMut<NavigationRes>,
) {
    for event in events.read() {
        if camera_state.0.begin(event.target) {
            navigation.0.set_transitioning(true);
        }
    }
}

/// Advance the flight and move the main camera along the arc.
pub fn camera_transition_system(
    time: Res<Time>,
    settings: Res<ViewSettings>,
    mut camera_state: ResMut<CameraStateRes>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut completed: EventWriter<TransitionCompleted>,
) {
    if camera_state.0.phase != TransitionPhase::Transitioning {
        return;
    }

    let (next, event) = advance(camera_state.0, time.delta_secs(), &settings.transition);
    camera_state.0 = next;

    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = Transform::from_translation(next.position).looking_at(next.look_at, Vec3::Y);
    }

    if let Some(TransitionEvent::Completed { target }) = event {
        tracing::info!("Camera arrived at {target}");
        completed.send(TransitionCompleted);
    }
}

/// Enter the roadmap once the camera has arrived.
pub fn enter_roadmap_system(
    mut events: EventReader<TransitionCompleted>,
    mut next_scene: ResMut<NextState<AppScene>>,
) {
    if events.read().last().is_some() {
        next_scene.set(AppScene::Roadmap);
    }
}

/// Escape aborts a running flight and returns to free orbit.
pub fn cancel_transition_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut camera_state: ResMut<CameraStateRes>,
    mut orbit: ResMut<CameraOrbit>,
    mut navigation: ResMut<NavigationRes>,
) {
    if !keyboard.just_pressed(KeyCode::Escape)
        || camera_state.0.phase != TransitionPhase::Transitioning
    {
        return;
    }

    camera_state.0.cancel();
    navigation.0.set_transitioning(false);

    let mut resumed = CameraOrbit::from_position(camera_state.0.position, Vec3::ZERO);
    resumed.pitch = resumed
        .pitch
        .clamp(-std::f32::consts::FRAC_PI_4, std::f32::consts::FRAC_PI_4);
    *orbit = resumed;
    camera_state.0.look_at = Vec3::ZERO;
    tracing::info!("Camera transition cancelled");
}
