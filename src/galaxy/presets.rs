//! Named galaxy presets.

use super::config::{GalaxyConfig, GalaxyOverrides, GalaxyType, Rgb};
use crate::error::GalaxyError;

fn hex(rgb: u32) -> Rgb {
    Rgb::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

/// Preset configuration for a galaxy type.
pub fn preset(kind: GalaxyType) -> GalaxyConfig {
    match kind {
        GalaxyType::Spiral => GalaxyConfig {
            galaxy_type: kind,
            particles_count: 200_000,
            radius: 12.0,
            branches: 5,
            spin: 1.5,
            randomness_power: 2.8,
            bulge_fraction: 0.3,
            bulge_size: 0.3,
            bulge_height: 0.4,
            arm_width: 0.4,
            dust_lanes: true,
            core_intensity: 2.5,
            inside_color: hex(0xffab4d),
            outside_color: hex(0x3b7bcc),
            dust_color: hex(0x4a2d05),
            has_active_nucleus: false,
            star_formation_rate: 1.0,
            disk_height: 0.8,
            spiral_pitch: 0.2,
            bar_length: None,
        },
        GalaxyType::Barred => GalaxyConfig {
            galaxy_type: kind,
            particles_count: 250_000,
            radius: 14.0,
            branches: 2,
            spin: 0.8,
            randomness_power: 2.5,
            bulge_fraction: 0.35,
            bulge_size: 0.4,
            bulge_height: 0.5,
            arm_width: 0.6,
            dust_lanes: true,
            core_intensity: 3.0,
            inside_color: hex(0xffd700),
            outside_color: hex(0x4169e1),
            dust_color: hex(0x32251a),
            has_active_nucleus: false,
            star_formation_rate: 1.0,
            disk_height: 1.0,
            spiral_pitch: 0.15,
            bar_length: Some(0.7),
        },
        GalaxyType::Irregular => GalaxyConfig {
            galaxy_type: kind,
            particles_count: 180_000,
            radius: 10.0,
            branches: 0,
            spin: 0.2,
            randomness_power: 4.0,
            bulge_fraction: 0.25,
            bulge_size: 0.2,
            bulge_height: 0.3,
            arm_width: 1.0,
            dust_lanes: false,
            core_intensity: 2.0,
            inside_color: hex(0xff8c00),
            outside_color: hex(0x4682b4),
            dust_color: hex(0x2f2f2f),
            has_active_nucleus: false,
            star_formation_rate: 0.5,
            disk_height: 1.2,
            spiral_pitch: 0.0,
            bar_length: None,
        },
    }
}

/// Look up a preset by name and apply overrides on top of it.
pub fn resolve(name: &str, overrides: &GalaxyOverrides) -> Result<GalaxyConfig, GalaxyError> {
    let kind: GalaxyType = name.parse()?;
    let config = preset(kind).with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Switch to the next preset while keeping the particle count.
pub fn cycle(config: &GalaxyConfig) -> GalaxyConfig {
    GalaxyConfig {
        particles_count: config.particles_count,
        ..preset(config.galaxy_type.next())
    }
}
