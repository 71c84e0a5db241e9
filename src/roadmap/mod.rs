//! Roadmap graph content and its interactive layout.

pub mod drag;
pub mod layout;
pub mod model;

pub use drag::{pointer_on_plane, DragSession, DragTarget};
pub use layout::{
    edge_curve, edge_point, layout, LayoutEngine, NodePositionMap, PositionEntry, NODE_SCALE,
};
pub use model::{AuthoringPosition, GraphEdge, GraphNode, NodeRole, RoadmapData};
