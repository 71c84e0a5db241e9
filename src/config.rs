//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/stellar/config.toml` (XDG) or platform config dir
//! 3. Project config: `.stellar.toml`
//! 4. Environment variables: `STELLAR_*`, nested keys separated by `__`
//!
//! # Example
//!
//! ```toml
//! [galaxy]
//! preset = "barred"
//! target = [5.0, 0.2, 3.0]
//!
//! [galaxy.overrides]
//! particles_count = 120000
//! inside_color = "#ffd27f"
//!
//! [camera]
//! fov_degrees = 60.0
//!
//! [minimap]
//! mode = "3d"
//! ```
//!
//! `STELLAR_CAMERA__FOV_DEGREES=60` overrides the same camera setting.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraSettings, TransitionSettings};
use crate::error::{CameraError, GalaxyError};
use crate::galaxy::{GalaxyConfig, GalaxyOverrides, GalaxyType};
use crate::minimap::{MinimapCanvas, MinimapMode};
use crate::navigation::{FilePersistence, MemoryPersistence, NavigationPersistence};

const PROJECT_CONFIG: &str = ".stellar.toml";
const ENV_PREFIX: &str = "STELLAR_";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

impl From<CameraError> for ConfigError {
    fn from(err: CameraError) -> Self {
        Self(Box::new(figment::Error::from(err.to_string())))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub galaxy: GalaxySection,
    pub camera: CameraSettings,
    pub transition: TransitionSettings,
    pub minimap: MinimapConfig,
    pub roadmap: RoadmapConfig,
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stellar Roadmap".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Galaxy preset plus per-field overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxySection {
    pub preset: GalaxyType,
    pub overrides: GalaxyOverrides,
    /// Local position of the clickable target star.
    pub target: [f32; 3],
    /// Spin the field while the galaxy scene is open.
    pub auto_rotate: bool,
}

impl Default for GalaxySection {
    fn default() -> Self {
        Self {
            preset: GalaxyType::default(),
            overrides: GalaxyOverrides::default(),
            target: [5.0, 0.2, 3.0],
            auto_rotate: true,
        }
    }
}

impl GalaxySection {
    /// Resolve the preset with overrides applied and validated.
    pub fn resolve(&self) -> Result<GalaxyConfig, GalaxyError> {
        let config = crate::galaxy::preset(self.preset).with_overrides(&self.overrides);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    pub mode: MinimapMode,
    pub canvas: MinimapCanvas,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    /// Roadmap JSON file. The built-in roadmap is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Directory for persisted navigation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Keep navigation state in memory only.
    pub ephemeral: bool,
}

impl NavigationConfig {
    pub fn persistence(&self) -> Box<dyn NavigationPersistence> {
        if self.ephemeral {
            return Box::new(MemoryPersistence::new());
        }
        match self.storage_dir.clone().or_else(FilePersistence::default_dir) {
            Some(dir) => Box::new(FilePersistence::new(dir)),
            None => {
                tracing::warn!("No state directory available, navigation state will not persist");
                Box::new(MemoryPersistence::new())
            }
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::user_config_path(), Path::new(PROJECT_CONFIG))
    }

    /// Extract and validate the config from the given files.
    pub fn load_from(user_config: &Path, project_config: &Path) -> Result<Self, ConfigError> {
        let config: Config = Self::figment(user_config, project_config).extract()?;
        config.camera.validate()?;
        Ok(config)
    }

    /// The layered provider stack for the given config files.
    pub fn figment(user_config: &Path, project_config: &Path) -> Figment {
        Figment::new()
            // Layer 1: Built-in defaults (lowest priority)
            .merge(Serialized::defaults(Config::default()))
            // Layer 2: User config
            .merge(Toml::file(user_config))
            // Layer 3: Project config
            .merge(Toml::file(project_config))
            // Layer 4: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// User config path: ~/.config/stellar/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("stellar").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("stellar").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn extract(user: &Path, project: &Path) -> Config {
        Config::figment(user, project).extract().unwrap()
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let tmp = tempfile::tempdir().unwrap();
        let config = extract(&tmp.path().join("none.toml"), &tmp.path().join("none2.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.minimap.canvas.width, 192.0);
    }

    #[test]
    #[serial]
    fn test_project_overrides_user() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user.toml");
        let project = tmp.path().join("project.toml");
        std::fs::write(
            &user,
            "[galaxy]\npreset = \"barred\"\n[camera]\nfov_degrees = 60.0\n",
        )
        .unwrap();
        std::fs::write(
            &project,
            concat!(
                "[camera]\nfov_degrees = 50.0\n",
                "[galaxy.overrides]\nparticles_count = 4000\ninside_color = \"#ff0000\"\n",
                "[minimap]\nmode = \"3d\"\n",
            ),
        )
        .unwrap();

        let config = extract(&user, &project);
        assert_eq!(config.galaxy.preset, GalaxyType::Barred);
        assert_eq!(config.camera.fov_degrees, 50.0);
        assert_eq!(config.camera.min_distance, 5.0);
        assert_eq!(config.minimap.mode, MinimapMode::ThreeD);

        let galaxy = config.galaxy.resolve().unwrap();
        assert_eq!(galaxy.particles_count, 4000);
        assert_eq!(galaxy.galaxy_type, GalaxyType::Barred);
        assert_eq!(galaxy.inside_color.to_string(), "#ff0000");
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project.toml");
        std::fs::write(&project, "[camera]\nfov_degrees = 50.0\n").unwrap();

        std::env::set_var("STELLAR_CAMERA__FOV_DEGREES", "42.5");
        let config = Config::figment(&tmp.path().join("none.toml"), &project).extract::<Config>();
        std::env::remove_var("STELLAR_CAMERA__FOV_DEGREES");

        assert_eq!(config.unwrap().camera.fov_degrees, 42.5);
    }

    #[test]
    #[serial]
    fn test_invalid_value_reports_error() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project.toml");
        std::fs::write(&project, "[galaxy]\npreset = \"lenticular\"\n").unwrap();
        let result: Result<Config, ConfigError> = Config::figment(&tmp.path().join("x"), &project)
            .extract()
            .map_err(ConfigError::from);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_inverted_camera_bounds_rejected_at_load() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project.toml");
        std::fs::write(&project, "[camera]\nmin_distance = 50.0\nmax_distance = 10.0\n").unwrap();

        let err = Config::load_from(&tmp.path().join("none.toml"), &project).unwrap_err();
        assert!(err.to_string().contains("max_distance"), "{err}");

        std::fs::write(&project, "[camera]\nmin_distance = 2.0\nmax_distance = 40.0\n").unwrap();
        let config = Config::load_from(&tmp.path().join("none.toml"), &project).unwrap();
        assert_eq!(config.camera.max_distance, 40.0);
    }

    #[test]
    fn test_ephemeral_navigation_uses_memory() {
        let nav = NavigationConfig {
            storage_dir: None,
            ephemeral: true,
        };
        let persistence = nav.persistence();
        assert_eq!(persistence.load("anything").unwrap(), None);
    }
}
