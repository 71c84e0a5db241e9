//! ECS resources, scene states, and events.
//!
//! Resources are global singleton data - there's only one instance
//! of each resource in the entire app.

use bevy::prelude::*;

use crate::camera::{CameraSettings, CameraState, TransitionSettings};
use crate::galaxy::{GalaxyConfig, ParticleField, ParticleSurface};
use crate::minimap::{MinimapCanvas, MinimapMode};
use crate::navigation::{NavigationStore, SceneKind};
use crate::roadmap::{DragSession, LayoutEngine};

// =============================================================================
// Scenes and Events
// =============================================================================

/// Top-level scene. Entities spawned for a scene are scoped to it.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppScene {
    #[default]
    Galaxy,
    Roadmap,
}

impl From<SceneKind> for AppScene {
    fn from(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Galaxy => AppScene::Galaxy,
            SceneKind::Roadmap => AppScene::Roadmap,
        }
    }
}

impl From<AppScene> for SceneKind {
    fn from(scene: AppScene) -> Self {
        match scene {
            AppScene::Galaxy => SceneKind::Galaxy,
            AppScene::Roadmap => SceneKind::Roadmap,
        }
    }
}

/// The target star was clicked; carries its world position.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetClicked {
    pub target: Vec3,
}

/// The camera reached the target star.
#[derive(Event, Debug, Clone, Copy)]
pub struct TransitionCompleted;

/// A roadmap node was clicked.
#[derive(Event, Debug, Clone)]
pub struct NodeClicked(pub String);

/// A roadmap node became the active selection.
#[derive(Event, Debug, Clone)]
pub struct NodeSelected(pub String);

// =============================================================================
// Camera State
// =============================================================================

/// Camera orbit state for 3D navigation.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CameraOrbit {
    /// Horizontal rotation angle (radians).
    pub yaw: f32,
    /// Vertical rotation angle (radians).
    pub pitch: f32,
    /// Distance from target.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 25.0,
            target: Vec3::ZERO,
        }
    }
}

impl CameraOrbit {
    /// Orbit that places the camera at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                target,
                distance: 0.0,
                ..default()
            };
        }
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            target,
        }
    }

    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }
}

/// Transition state machine plus lock mode for the main camera.
#[derive(Resource)]
pub struct CameraStateRes(pub CameraState);

/// Camera, transition, and galaxy target settings.
#[derive(Resource, Clone)]
pub struct ViewSettings {
    pub camera: CameraSettings,
    pub transition: TransitionSettings,
}

// =============================================================================
// Galaxy
// =============================================================================

/// The generated particle field.
#[derive(Resource)]
pub struct ParticleFieldRes(pub ParticleField);

/// Generator settings behind the current field, adjusted from the keyboard.
#[derive(Resource, Debug, Clone)]
pub struct GalaxyControls {
    pub config: GalaxyConfig,
    /// Local position of the target star, kept across regenerations.
    pub target: Vec3,
    pub auto_rotate: bool,
}

/// Rotation, entry animation, and hover state of the field.
#[derive(Resource)]
pub struct GalaxySurfaceRes(pub ParticleSurface);

/// Normal and hover materials for the target star.
#[derive(Resource)]
pub struct TargetMaterials {
    pub normal: Handle<StandardMaterial>,
    pub hover: Handle<StandardMaterial>,
}

// =============================================================================
// Roadmap
// =============================================================================

/// The roadmap layout and its content.
#[derive(Resource)]
pub struct LayoutRes(pub LayoutEngine);

/// State for node and edge dragging.
#[derive(Resource, Default)]
pub struct DragState {
    pub session: Option<DragSession>,
    /// Total mouse movement during drag (to detect click vs drag).
    pub total_movement: f32,
}

/// The active roadmap node, shared by the main view and the minimap.
#[derive(Resource, Default)]
pub struct CurrentSelection {
    pub active: Option<String>,
}

/// Pre-created materials per node role: (normal, active).
#[derive(Resource)]
pub struct NodeMaterials {
    pub start: (Handle<StandardMaterial>, Handle<StandardMaterial>),
    pub pattern: (Handle<StandardMaterial>, Handle<StandardMaterial>),
    pub subpattern: (Handle<StandardMaterial>, Handle<StandardMaterial>),
}

// =============================================================================
// Minimap
// =============================================================================

#[derive(Resource, Clone, Copy, Default)]
pub struct MinimapState {
    pub mode: MinimapMode,
    pub canvas: MinimapCanvas,
    /// Minimap rectangle in logical window pixels.
    pub rect: Rect,
}

impl MinimapState {
    pub fn contains(&self, cursor: Vec2) -> bool {
        self.rect.contains(cursor)
    }
}

/// Independent orbit of the 3D minimap camera.
#[derive(Resource, Clone, Copy)]
pub struct MinimapOrbit(pub CameraOrbit);

impl Default for MinimapOrbit {
    fn default() -> Self {
        Self(CameraOrbit::from_position(Vec3::new(0.0, 15.0, 15.0), Vec3::ZERO))
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// The navigation store, written on scene changes and cursor updates.
#[derive(Resource)]
pub struct NavigationRes(pub NavigationStore);
