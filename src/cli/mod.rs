//! CLI module for Stellar.
//!
//! Subcommands:
//! - `galaxy`: Open the galaxy scene and fly into the roadmap
//! - `roadmap`: Open the roadmap explorer directly
//! - `inspect`: Generate a galaxy headlessly and print a JSON summary

mod galaxy;
mod inspect;
mod roadmap;

use std::path::Path;

use bevy::math::{Rect, Vec3};
use clap::{Args, Parser, Subcommand};

pub use galaxy::GalaxyCommand;
pub use inspect::InspectCommand;
pub use roadmap::RoadmapCommand;

use crate::config::{Config, GalaxySection};
use crate::error::{AppError, GalaxyError, RoadmapError};
use crate::galaxy::{generate_with_targets, GalaxyConfig, GalaxyTarget, GalaxyType, TARGET_STAR};
use crate::navigation::NavigationStore;
use crate::roadmap::{LayoutEngine, RoadmapData};
use crate::visualization::{AppScene, GalaxyControls, MinimapState, SceneInput, ViewSettings};

/// Stellar - Galaxy and roadmap explorer
#[derive(Parser)]
#[command(name = "stellar")]
#[command(about = "Procedural galaxy and interactive roadmap explorer")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the galaxy scene
    Galaxy(GalaxyCommand),

    /// Open the roadmap explorer
    Roadmap(RoadmapCommand),

    /// Generate a galaxy without a window and print statistics as JSON
    Inspect(InspectCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load().map_err(AppError::from)?;
        match self.command {
            Command::Galaxy(cmd) => cmd.run(&config),
            Command::Roadmap(cmd) => cmd.run(&config),
            Command::Inspect(cmd) => cmd.run(&config),
        }
    }
}

/// Galaxy options shared by subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GalaxyArgs {
    /// Galaxy preset (spiral, barred, irregular)
    #[arg(long)]
    pub preset: Option<GalaxyType>,

    /// Number of particles to generate
    #[arg(long)]
    pub particles: Option<usize>,
}

impl GalaxyArgs {
    /// Apply the command-line options over the configured galaxy section.
    pub fn resolve(&self, section: &GalaxySection) -> Result<GalaxyConfig, GalaxyError> {
        let mut section = section.clone();
        if let Some(preset) = self.preset {
            section.preset = preset;
        }
        if let Some(particles) = self.particles {
            section.overrides.particles_count = Some(particles);
        }
        section.resolve()
    }
}

/// Load a roadmap from `input`, then the configured path, then the built-in data.
pub fn load_roadmap(input: Option<&Path>, config: &Config) -> Result<RoadmapData, RoadmapError> {
    match input.or(config.roadmap.path.as_deref()) {
        Some(path) => {
            tracing::info!("Loading roadmap from {}", path.display());
            RoadmapData::load(path)
        }
        None => RoadmapData::builtin(),
    }
}

/// Generate the galaxy, lay out the roadmap, and open navigation storage.
///
/// With no explicit `start`, the persisted scene is resumed.
pub fn scene_input(
    config: &Config,
    galaxy: &GalaxyConfig,
    roadmap: RoadmapData,
    start: Option<AppScene>,
) -> Result<SceneInput, AppError> {
    let target = Vec3::from_array(config.galaxy.target);
    let field = generate_with_targets(galaxy, &[GalaxyTarget::new(TARGET_STAR, target)])?;
    let navigation = NavigationStore::load(config.navigation.persistence());
    let start = start.unwrap_or_else(|| navigation.current_scene().into());

    Ok(SceneInput {
        field,
        galaxy: GalaxyControls {
            config: galaxy.clone(),
            target,
            auto_rotate: config.galaxy.auto_rotate,
        },
        layout: LayoutEngine::new(roadmap),
        navigation,
        settings: ViewSettings {
            camera: config.camera,
            transition: config.transition,
        },
        minimap: MinimapState {
            mode: config.minimap.mode,
            canvas: config.minimap.canvas,
            rect: Rect::default(),
        },
        start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let args = ["stellar", "-v", "inspect", "--preset", "barred", "--seed", "7"];
        let app = App::try_parse_from(args).unwrap();
        assert!(app.verbose);
        let Command::Inspect(cmd) = app.command else {
            panic!("expected inspect");
        };
        assert_eq!(cmd.galaxy.preset, Some(GalaxyType::Barred));
        assert_eq!(cmd.seed, Some(7));

        let app = App::try_parse_from(["stellar", "roadmap", "--input", "map.json"]).unwrap();
        assert!(matches!(app.command, Command::Roadmap(_)));
        assert!(App::try_parse_from(["stellar", "galaxy", "--preset", "elliptical"]).is_err());
    }

    #[test]
    fn test_galaxy_args_override_section() {
        let args = GalaxyArgs {
            preset: Some(GalaxyType::Irregular),
            particles: Some(500),
        };
        let config = args.resolve(&GalaxySection::default()).unwrap();
        assert_eq!(config.galaxy_type, GalaxyType::Irregular);
        assert_eq!(config.particles_count, 500);

        let zero = GalaxyArgs {
            particles: Some(0),
            ..Default::default()
        };
        assert!(zero.resolve(&GalaxySection::default()).is_err());
    }

    #[test]
    fn test_load_roadmap_falls_back_to_builtin() {
        let data = load_roadmap(None, &Config::default()).unwrap();
        assert_eq!(data.nodes.len(), 18);

        let missing = load_roadmap(
            Some(Path::new("/nonexistent/roadmap.json")),
            &Config::default(),
        );
        assert!(matches!(missing, Err(RoadmapError::Read { .. })));
    }

    #[test]
    fn test_scene_input_resumes_persisted_scene() {
        let mut config = Config::default();
        config.navigation.ephemeral = true;
        let galaxy = GalaxyArgs {
            particles: Some(2_000),
            ..Default::default()
        }
        .resolve(&config.galaxy)
        .unwrap();

        let input = scene_input(&config, &galaxy, RoadmapData::builtin().unwrap(), None).unwrap();
        assert_eq!(input.start, AppScene::Galaxy);
        assert_eq!(input.field.len(), 2_000);
        assert!(input.field.target_position(TARGET_STAR).is_some());
        assert_eq!(input.galaxy.config, galaxy);
        assert!(input.galaxy.auto_rotate);

        let input = scene_input(
            &config,
            &galaxy,
            RoadmapData::builtin().unwrap(),
            Some(AppScene::Roadmap),
        )
        .unwrap();
        assert_eq!(input.start, AppScene::Roadmap);
    }
}
