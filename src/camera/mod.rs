//! Camera math shared by the galaxy and roadmap scenes.

pub mod framing;
pub mod transition;

pub use framing::{frame_positions, zoom, zoom_distance, CameraSettings, Framing, ZoomDirection};
pub use transition::{
    advance, arc_point, CameraState, TransitionEvent, TransitionPhase, TransitionSettings,
};
