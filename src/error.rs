//! Error types for the galaxy generator, roadmap loading, navigation
//! persistence, and the application shell.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or generating a galaxy.
///
/// These indicate a caller configuration bug and are never recovered from
/// silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalaxyError {
    #[error("Particle count must be positive")]
    EmptyField,

    #[error("Invalid galaxy parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Unknown galaxy preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Not enough disk particles to place {requested} targets (have {available})")]
    TargetSlots { requested: usize, available: usize },

    #[error("Duplicate target id: {0}")]
    DuplicateTarget(String),
}

/// Camera settings the framing and zoom math cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Invalid camera setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

/// Errors raised while loading roadmap content.
#[derive(Error, Debug)]
pub enum RoadmapError {
    #[error("Failed to read roadmap {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid roadmap JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),
}

/// Errors raised by navigation state persistence.
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Navigation storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Navigation storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Navigation storage lock poisoned")]
    Poisoned,
}

/// Application-level errors for the `stellar` binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Galaxy error: {0}")]
    Galaxy(#[from] GalaxyError),

    #[error("Roadmap error: {0}")]
    Roadmap(#[from] RoadmapError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
