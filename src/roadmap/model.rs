//! Roadmap graph content: nodes, edges, and the built-in default roadmap.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RoadmapError;

/// Node role. Only affects color and scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Start,
    Pattern,
    #[default]
    Subpattern,
}

/// Position in authoring units (arbitrary, y up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthoringPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub position: AuthoringPosition,
    #[serde(default)]
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub animated: bool,
}

/// A complete roadmap document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoadmapData {
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

const BUILTIN_ROADMAP: &str = include_str!("../../assets/roadmap.json");

impl RoadmapData {
    /// Parse a roadmap document. Node ids must be unique; edges may name
    /// unknown nodes and are skipped when drawn.
    pub fn from_json(json: &str) -> Result<Self, RoadmapError> {
        let data: RoadmapData = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for node in &data.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(RoadmapError::DuplicateNode(node.id.clone()));
            }
        }
        let dangling = data
            .edges
            .iter()
            .filter(|e| !seen.contains(e.source.as_str()) || !seen.contains(e.target.as_str()))
            .count();
        if dangling > 0 {
            tracing::debug!("Roadmap has {} edges with unknown endpoints", dangling);
        }
        Ok(data)
    }

    pub fn load(path: &Path) -> Result<Self, RoadmapError> {
        let json = std::fs::read_to_string(path).map_err(|source| RoadmapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The roadmap shipped with the binary.
    pub fn builtin() -> Result<Self, RoadmapError> {
        Self::from_json(BUILTIN_ROADMAP)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roadmap_parses() {
        let data = RoadmapData::builtin().unwrap();
        assert_eq!(data.nodes.len(), 18);
        assert_eq!(data.edges.len(), 21);
        assert_eq!(data.node("start").unwrap().role, NodeRole::Start);
        assert_eq!(data.node("p2").unwrap().role, NodeRole::Pattern);
        assert_eq!(data.node("m3").unwrap().role, NodeRole::Subpattern);
        assert_eq!(data.edges.iter().filter(|e| e.animated).count(), 2);
    }

    #[test]
    fn test_builtin_edges_reference_known_nodes() {
        let data = RoadmapData::builtin().unwrap();
        for edge in &data.edges {
            assert!(data.node(&edge.source).is_some(), "{}", edge.id);
            assert!(data.node(&edge.target).is_some(), "{}", edge.id);
        }
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let json = r#"{"nodes": [
            {"id": "a", "label": "A", "position": {"x": 0, "y": 0}},
            {"id": "a", "label": "B", "position": {"x": 1, "y": 0}}
        ]}"#;
        assert!(matches!(
            RoadmapData::from_json(json),
            Err(RoadmapError::DuplicateNode(id)) if id == "a"
        ));
    }

    #[test]
    fn test_role_and_animated_default() {
        let json = r#"{
            "nodes": [{"id": "a", "label": "A", "position": {"x": 0, "y": 0}}],
            "edges": [{"id": "e", "source": "a", "target": "ghost"}]
        }"#;
        let data = RoadmapData::from_json(json).unwrap();
        assert_eq!(data.nodes[0].role, NodeRole::Subpattern);
        assert!(!data.edges[0].animated);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RoadmapData::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RoadmapError::Read { .. }));
    }
}
