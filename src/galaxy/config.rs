//! Galaxy configuration, colors, and per-field overrides.

use std::fmt;
use std::str::FromStr;

use bevy::color::Srgba;
use serde::{Deserialize, Serialize};

use crate::error::GalaxyError;

/// An sRGB color with channels in `[0, 1]`, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `#rgb`) hex string.
    pub fn hex(value: &str) -> Result<Self, GalaxyError> {
        let color =
            Srgba::hex(value).map_err(|_| GalaxyError::InvalidColor(value.to_string()))?;
        Ok(Self::new(color.red, color.green, color.blue))
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl TryFrom<String> for Rgb {
    type Error = GalaxyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Galaxy morphology. Each type has a preset in [`super::presets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalaxyType {
    #[default]
    Spiral,
    Barred,
    Irregular,
}

impl GalaxyType {
    pub const ALL: [GalaxyType; 3] = [
        GalaxyType::Spiral,
        GalaxyType::Barred,
        GalaxyType::Irregular,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GalaxyType::Spiral => "spiral",
            GalaxyType::Barred => "barred",
            GalaxyType::Irregular => "irregular",
        }
    }

    /// The following type in [`GalaxyType::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            GalaxyType::Spiral => GalaxyType::Barred,
            GalaxyType::Barred => GalaxyType::Irregular,
            GalaxyType::Irregular => GalaxyType::Spiral,
        }
    }
}

impl fmt::Display for GalaxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GalaxyType {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GalaxyType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GalaxyError::UnknownPreset(s.to_string()))
    }
}

/// Full parameter set for one particle field.
///
/// Immutable once handed to the generator; a new config produces a fully
/// independent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyConfig {
    pub galaxy_type: GalaxyType,
    pub particles_count: usize,
    pub radius: f32,
    /// Number of spiral arms. Zero disables the arm formula entirely.
    pub branches: u32,
    pub spin: f32,
    /// Exponent applied to positional jitter; higher values give tighter arms.
    pub randomness_power: f32,
    /// Share of particles placed in the central bulge.
    pub bulge_fraction: f32,
    /// Bulge radius as a fraction of the galaxy radius.
    pub bulge_size: f32,
    /// Vertical squash of the bulge (1.0 is spherical).
    pub bulge_height: f32,
    pub arm_width: f32,
    pub dust_lanes: bool,
    pub core_intensity: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
    pub dust_color: Rgb,
    pub has_active_nucleus: bool,
    pub star_formation_rate: f32,
    pub disk_height: f32,
    /// Logarithmic arm pitch. Zero keeps the pure linear spin.
    pub spiral_pitch: f32,
    /// Bar half-length as a fraction of the radius (barred galaxies).
    pub bar_length: Option<f32>,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        super::presets::preset(GalaxyType::Spiral)
    }
}

impl GalaxyConfig {
    /// Check the invariants the generator relies on.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.particles_count == 0 {
            return Err(GalaxyError::EmptyField);
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius", format!("must be positive, got {}", self.radius)));
        }
        for (field, value) in [
            ("bulge_fraction", self.bulge_fraction),
            ("bulge_size", self.bulge_size),
            ("bulge_height", self.bulge_height),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be within [0, 1], got {value}")));
            }
        }
        for (field, value) in [
            ("spin", self.spin),
            ("randomness_power", self.randomness_power),
            ("arm_width", self.arm_width),
            ("core_intensity", self.core_intensity),
            ("star_formation_rate", self.star_formation_rate),
            ("disk_height", self.disk_height),
            ("spiral_pitch", self.spiral_pitch),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        for (field, value) in [
            ("randomness_power", self.randomness_power),
            ("arm_width", self.arm_width),
            ("core_intensity", self.core_intensity),
            ("star_formation_rate", self.star_formation_rate),
            ("disk_height", self.disk_height),
        ] {
            if value < 0.0 {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }
        if let Some(bar) = self.bar_length {
            if !(0.0..=1.0).contains(&bar) {
                return Err(invalid("bar_length", format!("must be within [0, 1], got {bar}")));
            }
        }
        Ok(())
    }

    /// Number of bulge particles: `floor(particles_count * bulge_fraction)`.
    pub fn bulge_count(&self) -> usize {
        let count = (self.particles_count as f64 * self.bulge_fraction as f64).floor() as usize;
        count.min(self.particles_count)
    }

    pub fn bulge_radius(&self) -> f32 {
        self.radius * self.bulge_size
    }

    /// Apply any subset of overrides on top of this config.
    pub fn with_overrides(mut self, overrides: &GalaxyOverrides) -> Self {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = overrides.$field.clone() {
                    self.$field = value;
                })*
            };
        }
        apply!(
            particles_count,
            radius,
            branches,
            spin,
            randomness_power,
            bulge_fraction,
            bulge_size,
            bulge_height,
            arm_width,
            dust_lanes,
            core_intensity,
            inside_color,
            outside_color,
            dust_color,
            has_active_nucleus,
            star_formation_rate,
            disk_height,
            spiral_pitch,
        );
        if overrides.bar_length.is_some() {
            self.bar_length = overrides.bar_length;
        }
        self
    }
}

fn invalid(field: &'static str, reason: String) -> GalaxyError {
    GalaxyError::InvalidParameter { field, reason }
}

/// Partial galaxy config; unset fields fall back to the chosen preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spin: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub randomness_power: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulge_fraction: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulge_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulge_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dust_lanes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dust_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_active_nucleus: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_formation_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiral_pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_length: Option<f32>,
}
