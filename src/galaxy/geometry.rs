//! Procedural particle-field generation.
//!
//! A field is split into two populations:
//! - **Bulge**: ids `0..bulge_count`, a power-law concentrated spheroid.
//! - **Disk/arms**: the remaining ids, distributed along logarithmic/linear
//!   spiral arms, a central bar, or a uniform disk when `branches == 0`.
//!
//! Generation is intentionally unseeded: two calls with the same config give
//! different but statistically similar fields. Tests use
//! [`generate_with_rng`] with a seeded RNG.

use std::collections::{BTreeMap, HashSet};
use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::math::Vec3;
use rand::Rng;
use serde::Serialize;

use super::config::{GalaxyConfig, Rgb};
use crate::error::GalaxyError;

/// Semantic id of the clickable star that starts the roadmap transition.
pub const TARGET_STAR: &str = "target-star";

/// Radial falloff exponent for bulge placement.
const BULGE_FALLOFF: f32 = 2.0;
/// Sharper falloff used when the galaxy has an active nucleus.
const NUCLEUS_FALLOFF: f32 = 3.0;
const NUCLEUS_BOOST: f32 = 2.0;
/// Innermost share of the bulge radius that gets the largest particles.
const CORE_FRACTION: f32 = 0.1;
pub const CORE_SIZE_MIN: f32 = 1.2;
const CORE_SIZE_MAX: f32 = 1.5;
const TARGET_SIZE: f32 = 1.0;

const COLOR_FADE_EXPONENT: f32 = 1.5;
const COLOR_VARIATION: f32 = 0.1;
const DUST_LANE_BAND: f32 = 0.3;
const DUST_PROBABILITY: f64 = 0.3;
const STAR_FORMING_BAND: (f32, f32) = (0.3, 0.7);
const STAR_FORMING_CHANCE: f32 = 0.05;
const STAR_FORMING_BOOST: f32 = 1.5;
/// Disk thickness decays as `exp(-DISK_FALLOFF * r / radius)`.
const DISK_FALLOFF: f32 = 2.0;
/// Avoids `ln(0)` for arm particles sitting on the galactic center.
const MIN_PITCH_RADIUS: f32 = 1e-3;

/// A semantically named particle written into a reserved disk slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyTarget {
    pub id: String,
    pub position: Vec3,
}

impl GalaxyTarget {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Maps semantic ids to particle buffer indices.
///
/// Interactive particles are looked up by id rather than by where the
/// generator happened to put them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetTable {
    entries: BTreeMap<String, usize>,
}

impl TargetTable {
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(id, idx)| (id.as_str(), *idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generated particle buffers.
///
/// Positions and colors hold three floats per particle, sizes one.
/// The field is never edited in place; a config change replaces it.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    bulge_count: usize,
    targets: TargetTable,
}

impl ParticleField {
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn bulge_count(&self) -> usize {
        self.bulge_count
    }

    pub fn arm_count(&self) -> usize {
        self.len() - self.bulge_count
    }

    pub fn targets(&self) -> &TargetTable {
        &self.targets
    }

    pub fn position(&self, idx: usize) -> Option<Vec3> {
        self.positions
            .get(idx * 3..idx * 3 + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    pub fn color(&self, idx: usize) -> Option<[f32; 3]> {
        self.colors
            .get(idx * 3..idx * 3 + 3)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Local-space position of a named target particle.
    pub fn target_position(&self, id: &str) -> Option<Vec3> {
        self.targets.index_of(id).and_then(|idx| self.position(idx))
    }

    /// Upper bound for any color channel produced from `config`.
    ///
    /// Bulge colors reach `core_intensity` (doubled with an active nucleus);
    /// star-forming disk particles reach `(1 + variation/2) * boost`.
    pub fn color_bound(config: &GalaxyConfig) -> f32 {
        let nucleus = if config.has_active_nucleus {
            NUCLEUS_BOOST
        } else {
            1.0
        };
        let bulge = config.core_intensity * nucleus;
        let disk = (1.0 + COLOR_VARIATION / 2.0) * STAR_FORMING_BOOST;
        bulge.max(disk)
    }

    /// Statistics used by the `inspect` command.
    pub fn summary(&self) -> FieldSummary {
        let mut max_planar_radius = 0.0_f32;
        let mut max_abs_height = 0.0_f32;
        for p in self.positions.chunks_exact(3) {
            max_planar_radius = max_planar_radius.max((p[0] * p[0] + p[2] * p[2]).sqrt());
            max_abs_height = max_abs_height.max(p[1].abs());
        }
        let fold = |values: &[f32]| {
            values.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
        };
        let (color_min, color_max) = fold(&self.colors);
        let (size_min, size_max) = fold(&self.sizes);

        FieldSummary {
            particles: self.len(),
            bulge_particles: self.bulge_count,
            arm_particles: self.arm_count(),
            max_planar_radius,
            max_abs_height,
            color_min,
            color_max,
            size_min,
            size_max,
            targets: self
                .targets
                .iter()
                .map(|(id, idx)| (id.to_string(), idx))
                .collect(),
        }
    }
}

/// Aggregate statistics of a generated field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub particles: usize,
    pub bulge_particles: usize,
    pub arm_particles: usize,
    pub max_planar_radius: f32,
    pub max_abs_height: f32,
    pub color_min: f32,
    pub color_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub targets: BTreeMap<String, usize>,
}

/// Generate a field from `config` using the thread-local RNG.
pub fn generate(config: &GalaxyConfig) -> Result<ParticleField, GalaxyError> {
    generate_with_targets(config, &[])
}

/// Generate a field and write `targets` into reserved disk slots.
pub fn generate_with_targets(
    config: &GalaxyConfig,
    targets: &[GalaxyTarget],
) -> Result<ParticleField, GalaxyError> {
    generate_with_rng(config, targets, &mut rand::thread_rng())
}

/// Generate a field with a caller-supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GalaxyConfig,
    targets: &[GalaxyTarget],
    rng: &mut R,
) -> Result<ParticleField, GalaxyError> {
    config.validate()?;

    let count = config.particles_count;
    let bulge_count = config.bulge_count();
    let available = count - bulge_count;
    if targets.len() > available {
        return Err(GalaxyError::TargetSlots {
            requested: targets.len(),
            available,
        });
    }
    let mut seen = HashSet::new();
    for target in targets {
        if !seen.insert(target.id.as_str()) {
            return Err(GalaxyError::DuplicateTarget(target.id.clone()));
        }
    }

    let mut positions = vec![0.0_f32; count * 3];
    let mut colors = vec![0.0_f32; count * 3];
    let mut sizes = vec![0.0_f32; count];

    let mut write = |idx: usize, position: Vec3, color: Rgb, size: f32| {
        let i3 = idx * 3;
        positions[i3..i3 + 3].copy_from_slice(&position.to_array());
        colors[i3..i3 + 3].copy_from_slice(&color.to_array());
        sizes[idx] = size;
    };

    for idx in 0..bulge_count {
        let (position, color, size) = bulge_particle(config, rng);
        write(idx, position, color, size);
    }

    let target_start = count - targets.len();
    for idx in bulge_count..target_start {
        let (position, color, size) = disk_particle(config, idx, rng);
        write(idx, position, color, size);
    }

    let mut table = TargetTable::default();
    for (offset, target) in targets.iter().enumerate() {
        let idx = target_start + offset;
        write(idx, target.position, config.inside_color, TARGET_SIZE);
        table.entries.insert(target.id.clone(), idx);
    }

    tracing::info!(
        "Generated {} galaxy: {} particles ({} bulge, {} disk, {} targets)",
        config.galaxy_type,
        count,
        bulge_count,
        count - bulge_count,
        targets.len()
    );

    Ok(ParticleField {
        positions,
        colors,
        sizes,
        bulge_count,
        targets: table,
    })
}

/// Place one bulge particle.
///
/// Inclination is drawn as `acos(2u - 1)` so points are uniform over the
/// sphere instead of bunching at the poles.
fn bulge_particle<R: Rng + ?Sized>(config: &GalaxyConfig, rng: &mut R) -> (Vec3, Rgb, f32) {
    let bulge_radius = config.bulge_radius();
    let exponent = if config.has_active_nucleus {
        NUCLEUS_FALLOFF
    } else {
        BULGE_FALLOFF
    };

    let r = bulge_radius * rng.gen::<f32>().powf(exponent);
    let azimuth = rng.gen_range(0.0..TAU);
    let inclination = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();

    let position = Vec3::new(
        r * inclination.sin() * azimuth.cos(),
        r * inclination.cos() * config.bulge_height,
        r * inclination.sin() * azimuth.sin(),
    );

    let falloff = if bulge_radius > 0.0 {
        (1.0 - r / bulge_radius).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mut intensity = if config.has_active_nucleus {
        falloff * falloff
    } else {
        falloff
    } * config.core_intensity;
    if config.has_active_nucleus {
        intensity *= NUCLEUS_BOOST;
    }
    let color = config.inside_color.scale(intensity);

    let size = if r <= bulge_radius * CORE_FRACTION {
        rng.gen_range(CORE_SIZE_MIN..CORE_SIZE_MAX)
    } else {
        rng.gen_range(0.5..1.0)
    };

    (position, color, size)
}

/// Place one disk/arm particle.
fn disk_particle<R: Rng + ?Sized>(
    config: &GalaxyConfig,
    idx: usize,
    rng: &mut R,
) -> (Vec3, Rgb, f32) {
    let radius = config.radius;
    let inner = config.bulge_radius();
    let r = inner + rng.gen::<f32>() * (radius - inner);

    let arm_offset = (rng.gen::<f32>() - 0.5) * config.arm_width;
    let jx = jitter(rng, config.randomness_power);
    let jy = jitter(rng, config.randomness_power);
    let jz = jitter(rng, config.randomness_power);

    let in_bar = config
        .bar_length
        .is_some_and(|bar| r < bar * radius);

    let (mut x, mut z) = if in_bar {
        let along = if rng.gen_bool(0.5) { r } else { -r };
        (along + jx, arm_offset + jz)
    } else {
        let angle = arm_angle(config, idx, r, rng);
        let across = angle + FRAC_PI_2;
        (
            angle.cos() * r + jx + across.cos() * arm_offset,
            angle.sin() * r + jz + across.sin() * arm_offset,
        )
    };

    // Jitter never pushes a particle past the galaxy edge.
    let planar = (x * x + z * z).sqrt();
    if planar > radius {
        x *= radius / planar;
        z *= radius / planar;
    }

    let y = jy * config.disk_height * (-DISK_FALLOFF * r / radius).exp();
    let position = Vec3::new(x, y, z);

    let radius_percent = (r / radius).powf(COLOR_FADE_EXPONENT);
    let in_dust_lane = config.dust_lanes
        && arm_offset.abs() < config.arm_width * DUST_LANE_BAND
        && rng.gen_bool(DUST_PROBABILITY);

    let mut size = rng.gen_range(0.25..0.75) * (1.0 - radius_percent * 0.5);
    let mut color = if in_dust_lane {
        config.dust_color
    } else {
        let base = config.inside_color.lerp(config.outside_color, radius_percent);
        let variation = COLOR_VARIATION * (1.0 - radius_percent);
        let mut vary = |c: f32| (c + (rng.gen::<f32>() - 0.5) * variation).max(0.0);
        Rgb::new(vary(base.r), vary(base.g), vary(base.b))
    };

    let relative = r / radius;
    let chance = (STAR_FORMING_CHANCE * config.star_formation_rate).clamp(0.0, 1.0);
    if (STAR_FORMING_BAND.0..=STAR_FORMING_BAND.1).contains(&relative)
        && rng.gen::<f32>() < chance
    {
        color.r *= STAR_FORMING_BOOST;
        color.g *= STAR_FORMING_BOOST;
        size *= STAR_FORMING_BOOST;
    }

    (position, color, size)
}

/// Angular position of a disk particle.
///
/// With `branches == 0` the particle is scattered uniformly and the arm
/// formula (and its division by `branches`) is never evaluated.
fn arm_angle<R: Rng + ?Sized>(config: &GalaxyConfig, idx: usize, r: f32, rng: &mut R) -> f32 {
    if config.branches == 0 {
        return rng.gen_range(0.0..TAU);
    }
    let branches = config.branches as usize;
    let branch_angle = (idx % branches) as f32 / branches as f32 * TAU;
    let pitch = if config.spiral_pitch > 0.0 {
        config.spiral_pitch * r.max(MIN_PITCH_RADIUS).ln()
    } else {
        0.0
    };
    branch_angle + pitch + r * config.spin
}

/// `u^power` with a random sign; higher powers keep the jitter near zero.
fn jitter<R: Rng + ?Sized>(rng: &mut R, power: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(power);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::config::GalaxyType;
    use crate::galaxy::presets::preset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small(kind: GalaxyType) -> GalaxyConfig {
        GalaxyConfig {
            particles_count: 2000,
            ..preset(kind)
        }
    }

    /// A large galaxy with zero arm width, so a particle's planar distance is
    /// within `JITTER_SLACK * radius` of the radius it was drawn at.
    fn wide() -> GalaxyConfig {
        GalaxyConfig {
            radius: 100.0,
            arm_width: 0.0,
            ..small(GalaxyType::Spiral)
        }
    }

    const JITTER_SLACK: f32 = std::f32::consts::SQRT_2 / 100.0;

    fn relative_radius(p: Vec3, config: &GalaxyConfig) -> f32 {
        Vec3::new(p.x, 0.0, p.z).length() / config.radius
    }

    #[test]
    fn test_buffer_lengths_match_count() {
        let field = generate(&small(GalaxyType::Spiral)).unwrap();
        assert_eq!(field.positions().len(), 6000);
        assert_eq!(field.colors().len(), 6000);
        assert_eq!(field.sizes().len(), 2000);
    }

    #[test]
    fn test_rejects_empty_field() {
        let config = GalaxyConfig {
            particles_count: 0,
            ..GalaxyConfig::default()
        };
        assert_eq!(generate(&config).unwrap_err(), GalaxyError::EmptyField);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = small(GalaxyType::Barred);
        let a = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn test_bulge_particles_stay_inside_bulge_radius() {
        let config = small(GalaxyType::Spiral);
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(1)).unwrap();
        let limit = config.bulge_radius() + 1e-4;
        for idx in 0..field.bulge_count() {
            let p = field.position(idx).unwrap();
            assert!(p.length() <= limit, "bulge particle {idx} at {p}");
        }
    }

    #[test]
    fn test_largest_sizes_reserved_for_core() {
        let config = small(GalaxyType::Spiral);
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(3)).unwrap();
        let core_limit = config.bulge_radius() * CORE_FRACTION;
        for (idx, size) in field.sizes().iter().enumerate() {
            if *size >= CORE_SIZE_MIN {
                assert!(idx < field.bulge_count(), "disk particle {idx} has core size");
                let p = field.position(idx).unwrap();
                assert!(p.length() <= core_limit + 1e-4);
            }
        }
    }

    #[test]
    fn test_zero_branches_uses_uniform_scatter() {
        let config = GalaxyConfig {
            branches: 0,
            ..small(GalaxyType::Irregular)
        };
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(field.positions().iter().all(|v| v.is_finite()));

        // Uniform scatter covers all four quadrants.
        let mut quadrants = [0usize; 4];
        for idx in field.bulge_count()..field.len() {
            let p = field.position(idx).unwrap();
            let q = (p.x >= 0.0) as usize + 2 * (p.z >= 0.0) as usize;
            quadrants[q] += 1;
        }
        assert!(quadrants.iter().all(|&n| n > 100), "{quadrants:?}");
    }

    #[test]
    fn test_bar_particles_lie_along_x_axis() {
        let config = GalaxyConfig {
            randomness_power: 6.0,
            arm_width: 0.2,
            ..small(GalaxyType::Barred)
        };
        let bar = config.bar_length.unwrap() * config.radius;
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(5)).unwrap();
        let mut bar_particles = 0;
        for idx in field.bulge_count()..field.len() {
            let p = field.position(idx).unwrap();
            if p.x.abs() < bar - 1.0 && p.z.abs() < 0.5 {
                bar_particles += 1;
            }
        }
        assert!(bar_particles > 100, "only {bar_particles} particles on the bar");
    }

    #[test]
    fn test_targets_are_tagged_not_positional() {
        let config = small(GalaxyType::Spiral);
        let target = Vec3::new(5.0, 0.2, 3.0);
        let field = generate_with_targets(&config, &[GalaxyTarget::new(TARGET_STAR, target)])
            .unwrap();
        let idx = field.targets().index_of(TARGET_STAR).unwrap();
        assert!(idx >= field.bulge_count());
        assert_eq!(field.position(idx), Some(target));
        assert_eq!(field.target_position(TARGET_STAR), Some(target));
        assert_eq!(field.targets().index_of("missing"), None);
    }

    #[test]
    fn test_too_many_targets_rejected() {
        let config = GalaxyConfig {
            particles_count: 3,
            bulge_fraction: 1.0,
            ..GalaxyConfig::default()
        };
        let err = generate_with_targets(&config, &[GalaxyTarget::new("a", Vec3::ZERO)])
            .unwrap_err();
        assert_eq!(
            err,
            GalaxyError::TargetSlots {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let targets = [
            GalaxyTarget::new("a", Vec3::ZERO),
            GalaxyTarget::new("a", Vec3::ONE),
        ];
        assert_eq!(
            generate_with_targets(&small(GalaxyType::Spiral), &targets).unwrap_err(),
            GalaxyError::DuplicateTarget("a".to_string())
        );
    }

    #[test]
    fn test_active_nucleus_brightens_core() {
        let base = GalaxyConfig {
            has_active_nucleus: false,
            ..small(GalaxyType::Spiral)
        };
        let active = GalaxyConfig {
            has_active_nucleus: true,
            ..base.clone()
        };
        let brightest = |config: &GalaxyConfig| {
            let field = generate_with_rng(config, &[], &mut StdRng::seed_from_u64(9)).unwrap();
            field.colors()[..field.bulge_count() * 3]
                .iter()
                .fold(0.0_f32, |a, b| a.max(*b))
        };
        assert!(brightest(&active) > brightest(&base));
        assert!(brightest(&active) <= ParticleField::color_bound(&active));
    }

    #[test]
    fn test_dust_lanes_recolor_arm_particles() {
        let dusty = GalaxyConfig {
            dust_lanes: true,
            star_formation_rate: 0.0,
            dust_color: Rgb::new(0.05, 0.04, 0.03),
            ..small(GalaxyType::Spiral)
        };
        let clear = GalaxyConfig {
            dust_lanes: false,
            ..dusty.clone()
        };
        let dust_particles = |config: &GalaxyConfig| {
            let field = generate_with_rng(config, &[], &mut StdRng::seed_from_u64(21)).unwrap();
            (field.bulge_count()..field.len())
                .filter(|&idx| field.color(idx) == Some(config.dust_color.to_array()))
                .count()
        };
        assert!(dust_particles(&dusty) > 50);
        assert_eq!(dust_particles(&clear), 0);
    }

    #[test]
    fn test_star_forming_boost_limited_to_mid_disk() {
        let grey = Rgb::new(0.5, 0.5, 0.5);
        let config = GalaxyConfig {
            dust_lanes: false,
            // Every particle in the band is boosted.
            star_formation_rate: 100.0,
            inside_color: grey,
            outside_color: grey,
            ..wide()
        };
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(13)).unwrap();
        let (low, high) = STAR_FORMING_BAND;

        let mut boosted = 0;
        let mut enlarged = 0;
        for idx in field.bulge_count()..field.len() {
            let relative = relative_radius(field.position(idx).unwrap(), &config);
            let [r, g, b] = field.color(idx).unwrap();
            let size = field.sizes()[idx];
            // Unboosted channels stay within 0.5 +/- 0.05.
            if r > 0.6 {
                boosted += 1;
                assert!(g > 0.6 && b < 0.6, "particle {idx}: {r} {g} {b}");
                assert!(
                    relative >= low - JITTER_SLACK && relative <= high + JITTER_SLACK,
                    "boosted particle {idx} at relative radius {relative}"
                );
                if size > 0.75 {
                    enlarged += 1;
                }
            } else {
                assert!(size <= 0.75, "particle {idx} size {size}");
                assert!(
                    relative < low + JITTER_SLACK || relative > high - JITTER_SLACK,
                    "mid-disk particle {idx} at {relative} not boosted"
                );
            }
        }
        assert!(boosted > 100, "only {boosted} boosted");
        assert!(enlarged > 0);
    }

    #[test]
    fn test_spiral_pitch_winds_arms_logarithmically() {
        let straight = GalaxyConfig {
            spiral_pitch: 0.0,
            ..wide()
        };
        let pitched = GalaxyConfig {
            spiral_pitch: 0.5,
            ..straight.clone()
        };
        let a = generate_with_rng(&straight, &[], &mut StdRng::seed_from_u64(17)).unwrap();
        let b = generate_with_rng(&pitched, &[], &mut StdRng::seed_from_u64(17)).unwrap();

        for idx in a.bulge_count()..a.len() {
            let (pa, pb) = (a.position(idx).unwrap(), b.position(idx).unwrap());
            assert_eq!(pa.y, pb.y);
            let r = Vec3::new(pa.x, 0.0, pa.z).length();
            let turned = pb.z.atan2(pb.x) - pa.z.atan2(pa.x);
            let expected = pitched.spiral_pitch * r.ln();
            let error = (turned - expected + std::f32::consts::PI).rem_euclid(TAU)
                - std::f32::consts::PI;
            assert!(error.abs() < 0.15, "particle {idx}: turned {turned}, expected {expected}");
        }
    }

    #[test]
    fn test_disk_thins_toward_the_edge() {
        let config = GalaxyConfig {
            disk_height: 2.0,
            ..wide()
        };
        let field = generate_with_rng(&config, &[], &mut StdRng::seed_from_u64(19)).unwrap();

        let (mut inner, mut outer) = (Vec::new(), Vec::new());
        for idx in field.bulge_count()..field.len() {
            let p = field.position(idx).unwrap();
            let relative = relative_radius(p, &config);
            let envelope =
                config.disk_height * (-DISK_FALLOFF * (relative - JITTER_SLACK)).exp();
            assert!(p.y.abs() <= envelope + 1e-5, "particle {idx} y {} at {relative}", p.y);
            if relative < 0.5 {
                inner.push(p.y.abs());
            } else if relative > 0.8 {
                outer.push(p.y.abs());
            }
        }
        let mean = |values: &[f32]| values.iter().sum::<f32>() / values.len() as f32;
        assert!(!inner.is_empty() && !outer.is_empty());
        assert!(mean(&inner) > mean(&outer) * 1.5);
    }

    #[test]
    fn test_summary_reports_counts() {
        let config = small(GalaxyType::Irregular);
        let field = generate(&config).unwrap();
        let summary = field.summary();
        assert_eq!(summary.particles, 2000);
        assert_eq!(summary.bulge_particles + summary.arm_particles, 2000);
        assert!(summary.max_planar_radius <= config.radius + 1e-4);
        assert!(summary.color_min >= 0.0);
    }
}
