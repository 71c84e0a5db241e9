//! ECS systems for the galaxy and roadmap scenes.
//!
//! Systems are functions that operate on components and resources each frame.

pub mod camera;
pub mod galaxy;
pub mod interaction;
pub mod minimap;
pub mod roadmap;
pub mod ui;

pub use camera::{galaxy_camera_system, roadmap_camera_system};
pub use galaxy::{
    animate_galaxy_system, begin_transition_system, camera_transition_system,
    cancel_transition_system, enter_roadmap_system, galaxy_controls_system,
    target_pointer_system,
};
pub use interaction::{drag_system, node_click_system};
pub use minimap::{
    draw_minimap_system, minimap_mode_system, minimap_orbit_system, minimap_viewport_system,
    MinimapGizmos,
};
pub use roadmap::{draw_edges_system, roadmap_keyboard_system, sync_nodes_system};
pub use ui::{
    cursor_style_system, update_edge_hotspots_system, update_info_panel_system,
    update_labels_system,
};
