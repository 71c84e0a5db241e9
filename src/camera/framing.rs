//! Camera auto-framing and zoom for the roadmap view.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance multiplier for one zoom-in step.
    pub zoom_in: f32,
    /// Distance multiplier for one zoom-out step.
    pub zoom_out: f32,
    pub framing_scale: f32,
    /// Downward shift of camera and target, as a share of the distance.
    pub vertical_bias: f32,
    /// Galaxy scene camera start position.
    pub galaxy_position: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            min_distance: 5.0,
            max_distance: 100.0,
            zoom_in: 0.75,
            zoom_out: 1.25,
            framing_scale: 0.8,
            vertical_bias: 0.05,
            galaxy_position: [0.0, 3.0, 10.0],
        }
    }
}

impl CameraSettings {
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Clamp to the distance bounds. Callers rely on [`Self::validate`] having
    /// passed, since `f32::clamp` panics on inverted or NaN bounds.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// Check the bounds the framing and zoom math rely on.
    pub fn validate(&self) -> Result<(), CameraError> {
        for (field, value) in [
            ("fov_degrees", self.fov_degrees),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("zoom_in", self.zoom_in),
            ("zoom_out", self.zoom_out),
            ("framing_scale", self.framing_scale),
            ("vertical_bias", self.vertical_bias),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        if !self.galaxy_position.iter().all(|v| v.is_finite()) {
            return Err(invalid(
                "galaxy_position",
                format!("must be finite, got {:?}", self.galaxy_position),
            ));
        }
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(invalid(
                "fov_degrees",
                format!("must be within (0, 180), got {}", self.fov_degrees),
            ));
        }
        if self.min_distance <= 0.0 {
            return Err(invalid(
                "min_distance",
                format!("must be positive, got {}", self.min_distance),
            ));
        }
        if self.min_distance > self.max_distance {
            return Err(invalid(
                "max_distance",
                format!(
                    "must not be below min_distance ({}), got {}",
                    self.min_distance, self.max_distance
                ),
            ));
        }
        for (field, value) in [
            ("zoom_in", self.zoom_in),
            ("zoom_out", self.zoom_out),
            ("framing_scale", self.framing_scale),
        ] {
            if value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> CameraError {
    CameraError::InvalidSetting { field, reason }
}

/// Camera pose that shows every node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub position: Vec3,
    pub target: Vec3,
}

impl Framing {
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Frame a set of points looking down `-z`.
///
/// `distance = max_planar_dim / (2 tan(fov / 2)) * framing_scale`, clamped to
/// the distance bounds. Camera and target are both lowered by
/// `vertical_bias * distance` so the graph sits a little above center.
pub fn frame_positions(
    positions: impl IntoIterator<Item = Vec3>,
    settings: &CameraSettings,
) -> Framing {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    let mut any = false;
    for p in positions {
        min = min.min(p);
        max = max.max(p);
        any = true;
    }
    if !any {
        min = Vec3::ZERO;
        max = Vec3::ZERO;
    }

    let center = (min + max) / 2.0;
    let size = max - min;
    let max_dim = size.x.max(size.y);
    let half_fov = settings.fov_radians() / 2.0;
    let raw = max_dim / (2.0 * half_fov.tan()) * settings.framing_scale;
    let distance = settings.clamp_distance(raw);

    let offset = Vec3::Y * (settings.vertical_bias * distance);
    Framing {
        position: center + Vec3::Z * distance - offset,
        target: center - offset,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

pub fn zoom_distance(current: f32, direction: ZoomDirection, settings: &CameraSettings) -> f32 {
    let factor = match direction {
        ZoomDirection::In => settings.zoom_in,
        ZoomDirection::Out => settings.zoom_out,
    };
    settings.clamp_distance(current * factor)
}

/// Move `position` along its line of sight to `target` by one zoom step.
pub fn zoom(
    position: Vec3,
    target: Vec3,
    direction: ZoomDirection,
    settings: &CameraSettings,
) -> Vec3 {
    let offset = position - target;
    let dir = offset.try_normalize().unwrap_or(Vec3::Z);
    target + dir * zoom_distance(offset.length(), direction, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_unusable_bounds() {
        assert_eq!(CameraSettings::default().validate(), Ok(()));

        let inverted = CameraSettings {
            min_distance: 50.0,
            max_distance: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(CameraError::InvalidSetting { field: "max_distance", .. })
        ));

        let nan = CameraSettings {
            min_distance: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(CameraError::InvalidSetting { field: "min_distance", .. })
        ));

        for fov_degrees in [0.0, 180.0, -10.0] {
            let settings = CameraSettings {
                fov_degrees,
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "fov {fov_degrees}");
        }

        let frozen_zoom = CameraSettings {
            zoom_in: 0.0,
            ..Default::default()
        };
        assert!(frozen_zoom.validate().is_err());
    }

    #[test]
    fn test_zoom_stays_within_bounds() {
        let settings = CameraSettings::default();
        let target = Vec3::new(1.0, -2.0, 0.0);
        let mut position = target + Vec3::new(3.0, 4.0, 12.0);
        for _ in 0..50 {
            position = zoom(position, target, ZoomDirection::In, &settings);
            let d = position.distance(target);
            assert!(d >= settings.min_distance - 1e-4 && d <= settings.max_distance + 1e-4);
        }
        for _ in 0..50 {
            position = zoom(position, target, ZoomDirection::Out, &settings);
            let d = position.distance(target);
            assert!(d >= settings.min_distance - 1e-4 && d <= settings.max_distance + 1e-4);
        }
        assert!((position.distance(target) - settings.max_distance).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_preserves_direction() {
        let settings = CameraSettings::default();
        let position = Vec3::new(0.0, 6.0, 8.0);
        let zoomed = zoom(position, Vec3::ZERO, ZoomDirection::Out, &settings);
        assert!(zoomed.normalize().distance(position.normalize()) < 1e-5);
        assert!((zoomed.length() - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_framing_distance_formula() {
        let settings = CameraSettings::default();
        let points = [Vec3::new(-20.0, -5.0, 0.0), Vec3::new(20.0, 5.0, 0.0)];
        let framing = frame_positions(points, &settings);
        let expected = 40.0 / (2.0 * (37.5_f32).to_radians().tan()) * 0.8;
        assert!((framing.distance() - expected).abs() < 1e-3);
        // Graph sits above the target.
        assert!(framing.target.y < 0.0);
        assert!((framing.target.y + 0.05 * expected).abs() < 1e-4);
        assert_eq!(framing.position.y, framing.target.y);
    }

    #[test]
    fn test_framing_clamps_tiny_graphs() {
        let settings = CameraSettings::default();
        let framing = frame_positions([Vec3::ZERO], &settings);
        assert!((framing.distance() - settings.min_distance).abs() < 1e-4);
        let empty = frame_positions(std::iter::empty(), &settings);
        assert!(empty.position.is_finite());
    }
}
