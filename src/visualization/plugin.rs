//! Visualization plugin for Bevy.

use bevy::prelude::*;
use std::sync::Mutex;

use super::resources::{
    AppScene, CameraOrbit, CameraStateRes, CurrentSelection, DragState, GalaxyControls, LayoutRes,
    MinimapOrbit, MinimapState, NavigationRes, NodeClicked, NodeSelected, ParticleFieldRes,
    TargetClicked, TransitionCompleted, ViewSettings,
};
use super::setup::{setup_common, setup_galaxy_scene, setup_roadmap_scene};
use super::systems;
use crate::camera::CameraState;
use crate::galaxy::ParticleField;
use crate::navigation::NavigationStore;
use crate::roadmap::LayoutEngine;

/// Everything the scenes need, prepared before the app starts.
pub struct SceneInput {
    pub field: ParticleField,
    pub galaxy: GalaxyControls,
    pub layout: LayoutEngine,
    pub navigation: NavigationStore,
    pub settings: ViewSettings,
    pub minimap: MinimapState,
    /// Scene shown first.
    pub start: AppScene,
}

/// Plugin that adds the galaxy and roadmap scenes.
///
/// The input uses `Mutex<Option<...>>` to allow moving ownership into
/// resources during `build()` (which takes `&self`).
pub struct StellarPlugin {
    input: Mutex<Option<SceneInput>>,
}

impl StellarPlugin {
    pub fn new(input: SceneInput) -> Self {
        Self {
            input: Mutex::new(Some(input)),
        }
    }
}

impl Plugin for StellarPlugin {
    fn build(&self, app: &mut App) {
        // Take ownership of the input (moves it out, leaves None)
        let Some(input) = self.input.lock().ok().and_then(|mut slot| slot.take()) else {
            tracing::error!("StellarPlugin input already consumed; plugin added twice?");
            return;
        };

        let galaxy_position = Vec3::from_array(input.settings.camera.galaxy_position);

        app.insert_resource(ParticleFieldRes(input.field))
            .insert_resource(input.galaxy)
            .insert_resource(LayoutRes(input.layout))
            .insert_resource(NavigationRes(input.navigation))
            .insert_resource(input.settings)
            .insert_resource(input.minimap)
            .insert_resource(CameraStateRes(CameraState::idle(
                galaxy_position,
                Vec3::ZERO,
            )))
            .init_resource::<CameraOrbit>()
            .init_resource::<MinimapOrbit>()
            .init_resource::<DragState>()
            .init_resource::<CurrentSelection>()
            .add_event::<TargetClicked>()
            .add_event::<TransitionCompleted>()
            .add_event::<NodeClicked>()
            .add_event::<NodeSelected>()
            .insert_state(input.start)
            .enable_state_scoped_entities::<AppScene>()
            .init_gizmo_group::<systems::MinimapGizmos>()
            .add_systems(Startup, setup_common)
            .add_systems(OnEnter(AppScene::Galaxy), setup_galaxy_scene)
            .add_systems(OnEnter(AppScene::Roadmap), setup_roadmap_scene)
            .add_systems(
                Update,
                (
                    systems::galaxy_controls_system,
                    systems::animate_galaxy_system,
                    systems::target_pointer_system,
                    systems::begin_transition_system,
                    systems::cancel_transition_system,
                    systems::camera_transition_system,
                    systems::enter_roadmap_system,
                    systems::galaxy_camera_system,
                )
                    .chain()
                    .run_if(in_state(AppScene::Galaxy)),
            )
            .add_systems(
                Update,
                (
                    systems::roadmap_keyboard_system,
                    systems::drag_system,
                    systems::node_click_system,
                    systems::roadmap_camera_system,
                    systems::sync_nodes_system,
                    systems::draw_edges_system,
                    systems::update_labels_system,
                    systems::update_edge_hotspots_system,
                    systems::update_info_panel_system,
                    systems::minimap_viewport_system,
                    systems::minimap_orbit_system,
                    systems::minimap_mode_system,
                    systems::draw_minimap_system,
                )
                    .chain()
                    .run_if(in_state(AppScene::Roadmap)),
            )
            .add_systems(Update, systems::cursor_style_system);
    }
}
