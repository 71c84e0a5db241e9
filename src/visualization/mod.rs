//! Galaxy and roadmap rendering with Bevy.
//!
//! ## Module Structure
//!
//! - `components` - ECS components for stars, nodes, labels, cameras
//! - `resources` - ECS resources, scene states, and events
//! - `systems` - ECS systems (camera, galaxy, interaction, roadmap, minimap, UI)
//! - `setup` - Scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - Colors, sizes, and other constants

mod components;
mod constants;
mod plugin;
mod resources;
mod setup;
mod systems;

pub use plugin::{SceneInput, StellarPlugin};
pub use resources::{AppScene, GalaxyControls, MinimapState, ViewSettings};

use bevy::prelude::*;

use crate::config::WindowConfig;

/// Run the visualizer.
///
/// This spawns a Bevy window and blocks until it is closed.
pub fn run_visualizer(input: SceneInput, window: &WindowConfig) {
    tracing::info!("Opening {:?} scene", input.start);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: (window.width, window.height).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.008, 0.008, 0.02)))
        .add_plugins(StellarPlugin::new(input))
        .run();
}
