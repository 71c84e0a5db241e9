//! Stellar - procedural galaxy and interactive roadmap explorer
//!
//! A particle galaxy whose target star opens onto a draggable node-graph
//! roadmap with a synchronized minimap.

pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod galaxy;
pub mod minimap;
pub mod navigation;
pub mod roadmap;
pub mod visualization;
