//! Main camera view geometry as seen from the minimap.

use bevy::math::{Quat, Vec3};
use bevy::transform::components::Transform;

/// Frustum box scale per unit of camera distance from the origin.
pub const FRUSTUM_BOX_SCALE: f32 = 0.2;

/// Pose and lens of the main camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Quat,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl CameraView {
    pub fn looking_at(position: Vec3, target: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        let rotation = Transform::from_translation(position)
            .looking_at(target, Vec3::Y)
            .rotation;
        Self {
            position,
            rotation,
            target,
            fov_degrees,
            aspect,
        }
    }
}

/// Corners of the visible rectangle at the camera-to-target distance,
/// ordered bottom-left, bottom-right, top-right, top-left.
pub fn viewport_corners(view: &CameraView) -> [Vec3; 4] {
    let distance = view.position.distance(view.target);
    let half_height = (view.fov_degrees.to_radians() / 2.0).tan() * distance;
    let half_width = half_height * view.aspect;

    let forward = view.rotation * Vec3::NEG_Z;
    let right = view.rotation * Vec3::X;
    let up = view.rotation * Vec3::Y;
    let center = view.position + forward * distance;

    [
        center - right * half_width - up * half_height,
        center + right * half_width - up * half_height,
        center + right * half_width + up * half_height,
        center - right * half_width + up * half_height,
    ]
}

/// Wireframe cube placed at the main camera pose in the 3D minimap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBox {
    pub center: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl FrustumBox {
    pub fn from_view(view: &CameraView) -> Self {
        Self {
            center: view.position,
            rotation: view.rotation,
            scale: view.position.length() * FRUSTUM_BOX_SCALE,
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let local = Vec3::new(
                if i & 1 == 0 { -0.5 } else { 0.5 },
                if i & 2 == 0 { -0.5 } else { 0.5 },
                if i & 4 == 0 { -0.5 } else { 0.5 },
            );
            *corner = self.center + self.rotation * (local * self.scale);
        }
        corners
    }

    /// The 12 cube edges as line segments.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        let mut edges = [(Vec3::ZERO, Vec3::ZERO); 12];
        let mut n = 0;
        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    edges[n] = (c[i], c[i | bit]);
                    n += 1;
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_corners_centered_on_target() {
        let view = CameraView::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 90.0, 2.0);
        let corners = viewport_corners(&view);
        let center = corners.iter().copied().sum::<Vec3>() / 4.0;
        assert!(center.length() < 1e-4);
        // tan(45°) * 10 = 10 half height, 20 half width.
        assert!((corners[2].y - 10.0).abs() < 1e-3);
        assert!((corners[2].x - 20.0).abs() < 1e-3);
        assert!((corners[0].x + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_frustum_box_scales_with_distance() {
        let view = CameraView::looking_at(Vec3::new(0.0, 15.0, 15.0), Vec3::ZERO, 75.0, 1.0);
        let frustum = FrustumBox::from_view(&view);
        let expected = Vec3::new(0.0, 15.0, 15.0).length() * 0.2;
        assert!((frustum.scale - expected).abs() < 1e-5);
        for (a, b) in frustum.edges() {
            assert!((a.distance(b) - expected).abs() < 1e-4);
        }
    }
}
