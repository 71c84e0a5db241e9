//! Visual constants for the galaxy and roadmap scenes.

use bevy::prelude::*;

use crate::roadmap::NodeRole;

// =============================================================================
// Roadmap Node Colors
// =============================================================================

/// Start node color (Gold).
pub const COLOR_START: Color = Color::srgb(1.0, 0.843, 0.0); // #FFD700
/// Pattern node color (Indigo).
pub const COLOR_PATTERN: Color = Color::srgb(0.388, 0.4, 0.945); // #6366F1
/// Subpattern node color (Slate).
pub const COLOR_SUBPATTERN: Color = Color::srgb(0.294, 0.333, 0.388); // #4B5563
/// Active node color (Sky blue).
pub const COLOR_ACTIVE: Color = Color::srgb(0.376, 0.647, 0.98); // #60A5FA

/// Constellation edge color.
pub const COLOR_EDGE: Color = Color::srgb(0.55, 0.6, 0.7);

// =============================================================================
// Minimap Colors
// =============================================================================

/// Active and start dots (Amber).
pub const MINIMAP_HIGHLIGHT: Color = Color::srgb(0.984, 0.749, 0.141); // #fbbf24
/// Pattern dots (Light indigo).
pub const MINIMAP_PATTERN: Color = Color::srgb(0.506, 0.549, 0.973); // #818cf8
/// Subpattern dots (Cyan).
pub const MINIMAP_SUBPATTERN: Color = Color::srgb(0.133, 0.827, 0.933); // #22d3ee
/// Minimap edges (Slate).
pub const MINIMAP_EDGE: Color = Color::srgb(0.278, 0.333, 0.412); // #475569
/// Camera view quad and frustum box.
pub const MINIMAP_VIEW: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
pub const MINIMAP_BACKGROUND: Color = Color::srgba(0.06, 0.07, 0.1, 0.95);

// =============================================================================
// Galaxy
// =============================================================================

pub const COLOR_TARGET: Color = Color::srgb(1.0, 0.95, 0.8);
pub const COLOR_TARGET_HOVER: Color = Color::srgb(0.6, 0.85, 1.0);
pub const TARGET_STAR_RADIUS: f32 = 0.12;
/// Scale applied to the target star while hovered.
pub const TARGET_HOVER_SCALE: f32 = 1.6;

// =============================================================================
// Sizing and Motion
// =============================================================================

/// Base node sphere radius before role scaling.
pub const BASE_NODE_RADIUS: f32 = 0.5;
/// Scale multiplier for the active node.
pub const ACTIVE_NODE_SCALE: f32 = 1.2;
/// Idle spin of unlocked nodes, radians per second.
pub const NODE_SPIN_SPEED: f32 = 0.6;
/// Cursor travel in pixels below which a press counts as a click.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;
/// Edge hotspot size in pixels.
pub const HOTSPOT_SIZE: f32 = 30.0;
/// Sample count per Bézier edge.
pub const EDGE_SEGMENTS: usize = 24;
/// Margin between the minimap and the window corner, in pixels.
pub const MINIMAP_MARGIN: f32 = 16.0;

// =============================================================================
// Helpers
// =============================================================================

pub fn node_scale(role: NodeRole) -> f32 {
    match role {
        NodeRole::Start => 1.2,
        NodeRole::Pattern => 1.0,
        NodeRole::Subpattern => 0.8,
    }
}

pub fn node_color(role: NodeRole) -> Color {
    match role {
        NodeRole::Start => COLOR_START,
        NodeRole::Pattern => COLOR_PATTERN,
        NodeRole::Subpattern => COLOR_SUBPATTERN,
    }
}

pub fn minimap_color(role: NodeRole, active: bool) -> Color {
    if active {
        return MINIMAP_HIGHLIGHT;
    }
    match role {
        NodeRole::Start => MINIMAP_HIGHLIGHT,
        NodeRole::Pattern => MINIMAP_PATTERN,
        NodeRole::Subpattern => MINIMAP_SUBPATTERN,
    }
}

/// Opacity of an animated edge at `elapsed` seconds.
pub fn edge_pulse(elapsed: f32) -> f32 {
    (2.0 * elapsed).sin() * 0.5 + 0.5
}
