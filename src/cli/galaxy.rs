//! Galaxy subcommand - open the galaxy scene.

use std::path::PathBuf;

use clap::Parser;

use super::{load_roadmap, scene_input, GalaxyArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::visualization::{run_visualizer, AppScene};

/// Open the galaxy scene. Clicking the bright star flies into the roadmap.
#[derive(Parser)]
pub struct GalaxyCommand {
    #[command(flatten)]
    pub galaxy: GalaxyArgs,

    /// Roadmap JSON file shown after the flight (built-in roadmap if omitted).
    #[arg(long)]
    pub roadmap: Option<PathBuf>,

    /// Resume the scene saved by the previous session.
    #[arg(long)]
    pub resume: bool,
}

impl GalaxyCommand {
    /// Run the galaxy command.
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let galaxy = self.galaxy.resolve(&config.galaxy).map_err(AppError::from)?;
        let roadmap = load_roadmap(self.roadmap.as_deref(), config).map_err(AppError::from)?;
        let start = (!self.resume).then_some(AppScene::Galaxy);

        tracing::info!(
            "Generating {} galaxy with {} particles",
            galaxy.galaxy_type,
            galaxy.particles_count
        );
        let input = scene_input(config, &galaxy, roadmap, start)?;
        run_visualizer(input, &config.window);
        Ok(())
    }
}
