//! Roadmap subcommand - open the roadmap explorer.

use std::path::PathBuf;

use clap::Parser;

use super::{load_roadmap, scene_input, GalaxyArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::visualization::{run_visualizer, AppScene};

/// Open the roadmap explorer from a JSON file or the built-in roadmap.
#[derive(Parser)]
pub struct RoadmapCommand {
    /// Path to a JSON file with `nodes` and `edges`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl RoadmapCommand {
    /// Run the roadmap command.
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let roadmap = load_roadmap(self.input.as_deref(), config).map_err(AppError::from)?;
        tracing::info!(
            "Loaded roadmap with {} nodes and {} edges",
            roadmap.nodes.len(),
            roadmap.edges.len()
        );

        // The galaxy is still generated so Escape can return to it.
        let galaxy = GalaxyArgs::default()
            .resolve(&config.galaxy)
            .map_err(AppError::from)?;
        let input = scene_input(config, &galaxy, roadmap, Some(AppScene::Roadmap))?;
        run_visualizer(input, &config.window);
        Ok(())
    }
}
