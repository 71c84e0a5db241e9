//! ECS components for the galaxy and roadmap scenes.

use bevy::prelude::*;

use crate::roadmap::NodeRole;

/// The main perspective camera.
#[derive(Component)]
pub struct MainCamera;

/// The minimap camera rendering into the bottom-right viewport.
#[derive(Component)]
pub struct MinimapCamera;

/// Root entity of the particle field. Rotation and entry scale live here.
#[derive(Component)]
pub struct GalaxyRoot;

/// The clickable star, a child of [`GalaxyRoot`].
#[derive(Component)]
pub struct TargetStar;

/// A roadmap node sphere.
#[derive(Component)]
pub struct RoadmapNode {
    /// Node id in the layout engine.
    pub id: String,
    pub role: NodeRole,
    /// Visual radius at rest scale.
    pub radius: f32,
}

/// Label that follows a node in screen space.
#[derive(Component)]
pub struct NodeLabel {
    pub id: String,
}

/// Invisible hotspot at an edge midpoint, used to grab edges.
#[derive(Component)]
pub struct EdgeHotspot {
    pub edge_id: String,
}

/// Text content of the info panel.
#[derive(Component)]
pub struct InfoPanelText;
