//! Procedural galaxy particle fields.

pub mod config;
pub mod geometry;
pub mod presets;
pub mod surface;

pub use config::{GalaxyConfig, GalaxyOverrides, GalaxyType, Rgb};
pub use geometry::{
    generate, generate_with_rng, generate_with_targets, FieldSummary, GalaxyTarget,
    ParticleField, TargetTable, TARGET_STAR,
};
pub use presets::{cycle, preset, resolve};
pub use surface::{EntryAnimation, ParticleSurface, SurfaceHit};
