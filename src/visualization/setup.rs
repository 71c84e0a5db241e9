//! Scene setup and material creation.

use bevy::prelude::*;
use bevy::render::camera::Viewport;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::RenderLayers;
use bevy::ui::{IsDefaultUiCamera, PositionType};

use crate::camera::CameraState;
use crate::galaxy::{ParticleField, ParticleSurface, TARGET_STAR};
use crate::roadmap::NodeRole;
use crate::visualization::components::{
    EdgeHotspot, GalaxyRoot, InfoPanelText, MainCamera, MinimapCamera, NodeLabel, RoadmapNode,
    TargetStar,
};
use crate::visualization::constants::{
    node_color, node_scale, BASE_NODE_RADIUS, COLOR_ACTIVE, COLOR_TARGET, COLOR_TARGET_HOVER,
    HOTSPOT_SIZE, MINIMAP_BACKGROUND, TARGET_STAR_RADIUS,
};
use crate::visualization::resources::{
    AppScene, CameraOrbit, CameraStateRes, CurrentSelection, DragState, GalaxyControls,
    GalaxySurfaceRes, LayoutRes, MinimapOrbit, MinimapState, NavigationRes, NodeMaterials,
    ParticleFieldRes, TargetMaterials, ViewSettings,
};
use crate::visualization::systems::minimap::{
    minimap_projection, minimap_transform, MinimapFrame, MinimapGizmos,
};

/// Render layer used only by the minimap camera and its gizmos.
pub const MINIMAP_LAYER: usize = 1;

/// Spawn the persistent main camera and lights.
pub fn setup_common(
    mut commands: Commands,
    settings: Res<ViewSettings>,
    mut gizmo_store: ResMut<GizmoConfigStore>,
) {
    let galaxy_position = Vec3::from_array(settings.camera.galaxy_position);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.camera.fov_radians(),
            ..default()
        }),
        Transform::from_translation(galaxy_position).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        IsDefaultUiCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    let (config, _) = gizmo_store.config_mut::<MinimapGizmos>();
    config.render_layers = RenderLayers::layer(MINIMAP_LAYER);
    config.line_width = 1.5;
}

/// Build the point-list mesh for a particle field.
///
/// Point primitives have a fixed pixel size, so particle size is folded into
/// vertex brightness.
pub fn particle_mesh(field: &ParticleField) -> Mesh {
    let positions: Vec<[f32; 3]> = field
        .positions()
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    let colors: Vec<[f32; 4]> = field
        .colors()
        .chunks_exact(3)
        .zip(field.sizes())
        .map(|(c, size)| {
            let brightness = 0.5 + size;
            let linear = Color::srgb(c[0], c[1], c[2]).to_linear();
            [
                linear.red * brightness,
                linear.green * brightness,
                linear.blue * brightness,
                1.0,
            ]
        })
        .collect();

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

/// Spawn the particle field and target star, and reset the camera to free orbit.
#[allow(clippy::too_many_arguments)]
pub fn setup_galaxy_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<ParticleFieldRes>,
    controls: Res<GalaxyControls>,
    settings: Res<ViewSettings>,
    mut orbit: ResMut<CameraOrbit>,
    mut camera_state: ResMut<CameraStateRes>,
    mut navigation: ResMut<NavigationRes>,
) {
    navigation.0.set_scene(AppScene::Galaxy.into());
    navigation.0.set_transitioning(false);

    let position = Vec3::from_array(settings.camera.galaxy_position);
    *orbit = CameraOrbit::from_position(position, Vec3::ZERO);
    let locked = camera_state.0.locked;
    camera_state.0 = CameraState::idle(position, Vec3::ZERO);
    camera_state.0.locked = locked;

    let mut surface = ParticleSurface::new(&field.0, TARGET_STAR);
    surface.set_auto_rotate(controls.auto_rotate);
    let target_local = field.0.target_position(TARGET_STAR);
    commands.insert_resource(GalaxySurfaceRes(surface));

    let points = meshes.add(particle_mesh(&field.0));
    let points_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let normal = materials.add(StandardMaterial {
        base_color: COLOR_TARGET,
        emissive: LinearRgba::new(2.0, 1.9, 1.6, 1.0),
        unlit: true,
        ..default()
    });
    let hover = materials.add(StandardMaterial {
        base_color: COLOR_TARGET_HOVER,
        emissive: LinearRgba::new(1.2, 1.7, 2.4, 1.0),
        unlit: true,
        ..default()
    });
    commands.insert_resource(TargetMaterials {
        normal: normal.clone(),
        hover,
    });
    let star_mesh = meshes.add(Sphere::new(TARGET_STAR_RADIUS).mesh().uv(16, 12));

    commands
        .spawn((
            Mesh3d(points),
            MeshMaterial3d(points_material),
            Transform::from_scale(Vec3::ZERO),
            GalaxyRoot,
            StateScoped(AppScene::Galaxy),
        ))
        .with_children(|parent| {
            if let Some(local) = target_local {
                parent.spawn((
                    Mesh3d(star_mesh),
                    MeshMaterial3d(normal),
                    Transform::from_translation(local),
                    TargetStar,
                ));
            }
        });

    commands.spawn((
        Text::new(concat!(
            "Drag with the right mouse button to look around.\n",
            "Click the bright star to enter the roadmap.\n",
            "[G] next galaxy  [D] dust lanes  [N] nucleus  [A] auto-rotate"
        )),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.85, 0.85, 0.9, 0.8)),
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            ..default()
        },
        StateScoped(AppScene::Galaxy),
    ));

    tracing::info!("Galaxy scene ready ({} particles)", field.0.len());
}

/// Create node materials for each role: (normal, active).
fn role_materials(
    materials: &mut Assets<StandardMaterial>,
    color: Color,
) -> (Handle<StandardMaterial>, Handle<StandardMaterial>) {
    let [r, g, b] = color.to_srgba().to_f32_array_no_alpha();
    let normal = materials.add(StandardMaterial {
        base_color: color,
        metallic: 0.3,
        perceptual_roughness: 0.5,
        reflectance: 0.3,
        emissive: LinearRgba::new(r * 0.4, g * 0.4, b * 0.4, 1.0),
        ..default()
    });
    let [ar, ag, ab] = COLOR_ACTIVE.to_srgba().to_f32_array_no_alpha();
    let active = materials.add(StandardMaterial {
        base_color: COLOR_ACTIVE,
        metallic: 0.5,
        perceptual_roughness: 0.3,
        reflectance: 0.5,
        emissive: LinearRgba::new(ar * 1.5, ag * 1.5, ab * 1.5, 1.0),
        ..default()
    });
    (normal, active)
}

/// Spawn roadmap nodes, labels, hotspots, info panel, and the minimap camera.
#[allow(clippy::too_many_arguments)]
pub fn setup_roadmap_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<LayoutRes>,
    settings: Res<ViewSettings>,
    mut orbit: ResMut<CameraOrbit>,
    mut camera_state: ResMut<CameraStateRes>,
    mut navigation: ResMut<NavigationRes>,
    mut selection: ResMut<CurrentSelection>,
    mut drag_state: ResMut<DragState>,
    minimap: Res<MinimapState>,
    minimap_orbit: Res<MinimapOrbit>,
) {
    navigation.0.set_scene(AppScene::Roadmap.into());
    navigation.0.set_transitioning(false);
    selection.active = None;
    *drag_state = DragState::default();

    let framing = layout.0.framing(&settings.camera);
    *orbit = CameraOrbit::from_position(framing.position, framing.target);
    let locked = camera_state.0.locked;
    camera_state.0 = CameraState::idle(framing.position, framing.target);
    camera_state.0.locked = locked;

    let node_materials = NodeMaterials {
        start: role_materials(&mut materials, node_color(NodeRole::Start)),
        pattern: role_materials(&mut materials, node_color(NodeRole::Pattern)),
        subpattern: role_materials(&mut materials, node_color(NodeRole::Subpattern)),
    };

    let node_mesh = meshes.add(Sphere::new(BASE_NODE_RADIUS).mesh().uv(24, 16));
    let text_style = TextFont {
        font_size: 11.0,
        ..default()
    };
    let text_color = TextColor(Color::srgba(0.9, 0.9, 0.95, 0.85));

    for node in layout.0.nodes() {
        let Some(position) = layout.0.positions().get(&node.id) else {
            continue;
        };
        let material = match node.role {
            NodeRole::Start => node_materials.start.0.clone(),
            NodeRole::Pattern => node_materials.pattern.0.clone(),
            NodeRole::Subpattern => node_materials.subpattern.0.clone(),
        };
        let scale = node_scale(node.role);

        commands.spawn((
            Mesh3d(node_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            RoadmapNode {
                id: node.id.clone(),
                role: node.role,
                radius: BASE_NODE_RADIUS * scale,
            },
            StateScoped(AppScene::Roadmap),
        ));

        commands.spawn((
            Text::new(&node.label),
            text_style.clone(),
            text_color,
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            NodeLabel {
                id: node.id.clone(),
            },
            StateScoped(AppScene::Roadmap),
        ));
    }
    commands.insert_resource(node_materials);

    for (edge, _, _) in layout.0.edge_endpoints() {
        commands.spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                width: Val::Px(HOTSPOT_SIZE),
                height: Val::Px(HOTSPOT_SIZE),
                ..default()
            },
            EdgeHotspot {
                edge_id: edge.id.clone(),
            },
            StateScoped(AppScene::Roadmap),
        ));
    }

    // Info panel on the left
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                width: Val::Px(280.0),
                min_height: Val::Px(100.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.9)),
            BorderRadius::all(Val::Px(8.0)),
            StateScoped(AppScene::Roadmap),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Stellar Roadmap"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                InfoPanelText,
            ));
        });

    // Minimap frame behind the minimap viewport
    commands.spawn((
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            left: Val::Px(minimap.rect.min.x - 2.0),
            top: Val::Px(minimap.rect.min.y - 2.0),
            width: Val::Px(minimap.canvas.width + 4.0),
            height: Val::Px(minimap.canvas.height + 4.0),
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.2)),
        BorderRadius::all(Val::Px(6.0)),
        MinimapFrame,
        StateScoped(AppScene::Roadmap),
    ));

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 1,
            viewport: Some(Viewport {
                physical_position: UVec2::ZERO,
                physical_size: UVec2::new(
                    minimap.canvas.width as u32,
                    minimap.canvas.height as u32,
                ),
                ..default()
            }),
            clear_color: ClearColorConfig::Custom(MINIMAP_BACKGROUND),
            ..default()
        },
        minimap_projection(minimap.mode, &minimap.canvas),
        minimap_transform(minimap.mode, &minimap_orbit),
        RenderLayers::layer(MINIMAP_LAYER),
        MinimapCamera,
        StateScoped(AppScene::Roadmap),
    ));

    tracing::info!(
        "Roadmap scene ready ({} nodes, camera distance {:.1})",
        layout.0.nodes().len(),
        framing.distance()
    );
}
