//! Minimap projection of the roadmap and the main camera.

pub mod frustum;
pub mod projector;

pub use frustum::{viewport_corners, CameraView, FrustumBox};
pub use projector::{
    project_2d, MinimapCanvas, MinimapDot, MinimapFrame2d, MinimapMode, MinimapProjector,
};
