//! Inspect subcommand - generate a galaxy headlessly.

use bevy::math::Vec3;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::GalaxyArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::galaxy::{
    generate_with_rng, FieldSummary, GalaxyConfig, GalaxyTarget, ParticleField, TARGET_STAR,
};

/// Generate a galaxy without opening a window and print a JSON summary.
#[derive(Parser)]
pub struct InspectCommand {
    #[command(flatten)]
    pub galaxy: GalaxyArgs,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    config: &'a GalaxyConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    summary: FieldSummary,
}

impl InspectCommand {
    /// Run the inspect command.
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let galaxy = self.galaxy.resolve(&config.galaxy).map_err(AppError::from)?;
        let field = self.generate(&galaxy, config)?;
        let report = InspectReport {
            config: &galaxy,
            seed: self.seed,
            summary: field.summary(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(AppError::from)?;
        println!("{json}");
        Ok(())
    }

    fn generate(&self, galaxy: &GalaxyConfig, config: &Config) -> Result<ParticleField, AppError> {
        let targets = [GalaxyTarget::new(
            TARGET_STAR,
            Vec3::from_array(config.galaxy.target),
        )];
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(generate_with_rng(galaxy, &targets, &mut rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_inspect_is_reproducible() {
        let cmd = InspectCommand {
            galaxy: GalaxyArgs {
                particles: Some(1_000),
                ..Default::default()
            },
            seed: Some(42),
            pretty: false,
        };
        let config = Config::default();
        let galaxy = cmd.galaxy.resolve(&config.galaxy).unwrap();

        let a = cmd.generate(&galaxy, &config).unwrap();
        let b = cmd.generate(&galaxy, &config).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.summary().particles, 1_000);
        assert!(a.summary().targets.contains_key(TARGET_STAR));
    }
}
