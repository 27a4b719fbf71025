//! Room model loading, monitor hit-testing and guide arrows

use bevy::asset::LoadState;
use bevy::gltf::GltfMeshName;
use bevy::prelude::*;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use roomfolio_core::asset::{AssetSources, BlobConfig, BuildMode, BLOB_CONFIG_FILE};
use roomfolio_core::interaction::{
    arrow_ring, is_monitor_mesh, nearest_hit_is_monitor, primitive_key, ArrowPose, ArrowSpot, HoverChange,
    HoverState, RayHit, ARROW_COUNT, ARROW_LIFT, ARROW_RADIUS, HIGHLIGHT_INTENSITY, HIGHLIGHT_RGB,
};
use roomfolio_core::Step;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::app::{in_step, CarouselState, RoomStatus};
use crate::scene::{MainCamera, TouchState};

pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomLoader>()
            .init_resource::<MonitorHover>()
            .add_systems(Update, (
                start_room_load.run_if(in_step(Step::Portfolio)),
                resolve_sources,
                poll_room_asset,
                tag_monitor_meshes,
                spawn_monitor_arrows,
            ).chain())
            .add_systems(Update, (
                animate_arrows,
                spin_loading_cube,
                handle_monitor_pointer.run_if(in_step(Step::Portfolio)),
                update_monitor_highlight.after(handle_monitor_pointer),
                update_canvas_cursor.after(handle_monitor_pointer),
            ));
    }
}

/// Where the room scene root sits in the world
const ROOM_OFFSET: Vec3 = Vec3::new(0.0, -5.0, 0.0);
/// Fill color of the loading and placeholder cubes (#667eea)
const CUBE_COLOR: Color = Color::srgb(0x66 as f32 / 255.0, 0x7e as f32 / 255.0, 0xea as f32 / 255.0);
/// Emissive is measured in nits and scaled by camera exposure
const EMISSIVE_SCALE: f32 = 2000.0;
/// Clicks that move further than this are drags, not clicks
const CLICK_SLOP: f32 = 5.0;

/// Marker for the spawned room scene
#[derive(Component)]
pub struct RoomScene;

/// Spinning cube shown while the model loads
#[derive(Component)]
pub struct LoadingCube;

/// Cube shown when every model source failed
#[derive(Component)]
pub struct PlaceholderCube;

/// A mesh primitive belonging to the monitor
#[derive(Component, Debug)]
pub struct MonitorMesh;

/// Three.js-style key of a glTF primitive, e.g. `plane006_2`
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveKey(pub String);

/// Floating guide arrow above the monitor
#[derive(Component, Debug, Clone, Copy)]
pub struct GuideArrow {
    spot: ArrowSpot,
}

/// Child mesh of a guide arrow; pointer rays pass through these
#[derive(Component)]
struct ArrowPart;

/// Result slot filled by the blob config fetch
type BlobSlot = Arc<Mutex<Option<Option<BlobConfig>>>>;

/// Room model loading state
#[derive(Resource, Default)]
pub struct RoomLoader {
    blob: BlobSlot,
    sources: Option<AssetSources>,
    handle: Option<Handle<Gltf>>,
    arrows_spawned: bool,
}

/// Monitor primitive under the pointer
#[derive(Resource, Default)]
pub struct MonitorHover {
    pub state: HoverState<Entity>,
}

/// Kick off loading once the visitor reaches the room
fn start_room_load(
    mut commands: Commands,
    mut status: ResMut<RoomStatus>,
    loader: Res<RoomLoader>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if *status != RoomStatus::Idle {
        return;
    }
    *status = RoomStatus::Resolving;

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: CUBE_COLOR.with_alpha(0.8),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::default(),
        LoadingCube,
    ));

    fetch_blob_config(loader.blob.clone());
}

/// Fetch the optional blob config; a missing or invalid file means "no blob"
fn fetch_blob_config(slot: BlobSlot) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let url = format!("/{}", BLOB_CONFIG_FILE);
            let blob = match gloo_net::http::Request::get(&url).send().await {
                Ok(response) if response.ok() => match response.text().await {
                    Ok(text) => match BlobConfig::from_json(&text) {
                        Ok(config) => Some(config),
                        Err(e) => {
                            tracing::warn!("Invalid {}: {}", BLOB_CONFIG_FILE, e);
                            None
                        }
                    },
                    Err(e) => {
                        tracing::warn!("Failed to read {}: {:?}", BLOB_CONFIG_FILE, e);
                        None
                    }
                },
                Ok(response) => {
                    tracing::info!("No {} (HTTP {})", BLOB_CONFIG_FILE, response.status());
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {:?}", BLOB_CONFIG_FILE, e);
                    None
                }
            };
            if let Ok(mut result) = slot.lock() {
                *result = Some(blob);
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let blob = BlobConfig::load(std::path::Path::new("web").join(BLOB_CONFIG_FILE).as_path()).ok();
        if let Ok(mut result) = slot.lock() {
            *result = Some(blob);
        }
    }
}

/// Build the source chain once the blob config lookup has settled
fn resolve_sources(
    mut loader: ResMut<RoomLoader>,
    mut status: ResMut<RoomStatus>,
    asset_server: Res<AssetServer>,
) {
    if *status != RoomStatus::Resolving {
        return;
    }
    let Some(blob) = loader.blob.try_lock().ok().and_then(|mut slot| slot.take()) else {
        return;
    };

    let sources = AssetSources::resolve(blob.as_ref(), BuildMode::current());
    tracing::info!(sources = ?sources.urls(), "Room model sources resolved");
    loader.sources = Some(sources);
    load_current_source(&mut loader, &mut status, &asset_server);
}

/// Start loading the source under the cursor of the chain
fn load_current_source(loader: &mut RoomLoader, status: &mut RoomStatus, asset_server: &AssetServer) {
    let Some(sources) = loader.sources.as_ref() else { return };

    match (sources.current(), sources.current_asset_path()) {
        (Some(url), Some(path)) => {
            tracing::info!("Loading room model from {}", url);
            *status = RoomStatus::Loading { source: url.to_string() };
            // Typed load: `api/glb` has no extension to pick a loader from
            loader.handle = Some(asset_server.load::<Gltf>(path));
        }
        _ => {
            let error = sources.exhausted_error();
            tracing::error!("Failed to load GLB model: {}", error);
            *status = RoomStatus::Failed { error: error.to_string() };
            loader.handle = None;
        }
    }
}

/// Check the pending GLB and spawn the room, fall back, or give up
fn poll_room_asset(
    mut commands: Commands,
    mut loader: ResMut<RoomLoader>,
    mut status: ResMut<RoomStatus>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    loading_cubes: Query<Entity, With<LoadingCube>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(handle) = loader.handle.clone() else { return };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            // GLTF is loaded, extract the default scene
            let scene = gltf_assets
                .get(&handle)
                .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()));

            loader.handle = None;
            match scene {
                Some(scene_handle) => {
                    commands.spawn((
                        SceneRoot(scene_handle),
                        Transform::from_translation(ROOM_OFFSET),
                        RoomScene,
                    ));
                    for cube in loading_cubes.iter() {
                        commands.entity(cube).despawn();
                    }
                    *status = RoomStatus::Ready;
                    tracing::info!("Room model loaded");
                }
                None => {
                    tracing::warn!("Room model has no scenes");
                    advance_source(&mut loader, &mut status, &asset_server);
                }
            }
        }
        Some(LoadState::Failed(e)) => {
            tracing::warn!("Room model source failed: {}", e);
            loader.handle = None;
            advance_source(&mut loader, &mut status, &asset_server);
        }
        _ => {
            // Still loading
            return;
        }
    }

    if matches!(*status, RoomStatus::Failed { .. }) {
        for cube in loading_cubes.iter() {
            commands.entity(cube).despawn();
        }
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(4.0, 4.0, 4.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: CUBE_COLOR,
                ..default()
            })),
            Transform::default(),
            PlaceholderCube,
        ));
    }
}

fn advance_source(loader: &mut RoomLoader, status: &mut RoomStatus, asset_server: &AssetServer) {
    if let Some(sources) = loader.sources.as_mut() {
        sources.advance();
    }
    load_current_source(loader, status, asset_server);
}

/// Key glTF primitives by mesh name and sibling index, tagging the monitor
fn tag_monitor_meshes(
    mut commands: Commands,
    primitives: Query<(Entity, &GltfMeshName, Option<&ChildOf>), (With<Mesh3d>, Without<PrimitiveKey>)>,
    children: Query<&Children>,
    mesh_names: Query<&GltfMeshName, With<Mesh3d>>,
) {
    for (entity, mesh_name, parent) in primitives.iter() {
        // Primitives of one mesh are spawned in order under their node
        let siblings: Vec<Entity> = parent
            .and_then(|parent| children.get(parent.parent()).ok())
            .map(|children| {
                let children: &[Entity] = children;
                children
                    .iter()
                    .copied()
                    .filter(|sibling| {
                        mesh_names
                            .get(*sibling)
                            .is_ok_and(|name| name.0 == mesh_name.0)
                    })
                    .collect()
            })
            .unwrap_or_default();
        let index = siblings.iter().position(|sibling| *sibling == entity).unwrap_or(0);
        let key = primitive_key(&mesh_name.0, index, siblings.len().max(1));

        let mut entity_commands = commands.entity(entity);
        if is_monitor_mesh(&key) {
            tracing::debug!(key = %key, "Monitor mesh found");
            entity_commands.insert(MonitorMesh);
        }
        entity_commands.insert(PrimitiveKey(key));
    }
}

/// Place the guide arrows around the first monitor mesh once it has a world position
fn spawn_monitor_arrows(
    mut commands: Commands,
    mut loader: ResMut<RoomLoader>,
    monitors: Query<&GlobalTransform, With<MonitorMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if loader.arrows_spawned {
        return;
    }
    let Some(monitor) = monitors.iter().next() else { return };
    loader.arrows_spawned = true;

    let center = monitor.translation();
    let gold = Color::srgb_u8(0xff, 0xd7, 0x00);
    let ember = Color::srgb_u8(0xff, 0x33, 0x00).to_linear();
    let head_material = materials.add(StandardMaterial {
        base_color: gold,
        emissive: ember * (0.6 * EMISSIVE_SCALE),
        ..default()
    });
    let shaft_material = materials.add(StandardMaterial {
        base_color: gold,
        emissive: ember * (0.4 * EMISSIVE_SCALE),
        ..default()
    });
    let head_mesh = meshes.add(Cone { radius: 0.2, height: 0.4 });
    let shaft_mesh = meshes.add(Cylinder::new(0.06, 0.5));

    for spot in arrow_ring(center.to_array(), ARROW_COUNT, ARROW_RADIUS, ARROW_LIFT) {
        commands
            .spawn((
                Transform::from_translation(Vec3::from_array(spot.position)),
                Visibility::default(),
                GuideArrow { spot },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(head_mesh.clone()),
                    MeshMaterial3d(head_material.clone()),
                    Transform::from_xyz(0.0, 0.25, 0.0),
                    ArrowPart,
                ));
                parent.spawn((
                    Mesh3d(shaft_mesh.clone()),
                    MeshMaterial3d(shaft_material.clone()),
                    Transform::from_xyz(0.0, -0.15, 0.0),
                    ArrowPart,
                ));
                parent.spawn((
                    PointLight {
                        color: Color::srgb_u8(0xff, 0x66, 0x00),
                        intensity: 20_000.0,
                        range: 2.0,
                        shadows_enabled: false,
                        ..default()
                    },
                    Transform::default(),
                ));
            });
    }
    tracing::info!(?center, "Guide arrows placed around the monitor");
}

/// Bob, wobble, pulse and spin the guide arrows
fn animate_arrows(time: Res<Time>, mut arrows: Query<(&GuideArrow, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (arrow, mut transform) in arrows.iter_mut() {
        let pose = ArrowPose::at(&arrow.spot, t);
        transform.translation = Vec3::from_array(pose.translation);
        // Flipped upside down so the head points at the monitor
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            std::f32::consts::PI,
            std::f32::consts::FRAC_PI_2 + pose.spin,
            pose.wobble,
        );
        transform.scale = Vec3::splat(pose.scale);
    }
}

fn spin_loading_cube(time: Res<Time>, mut cubes: Query<&mut Transform, With<LoadingCube>>) {
    for mut transform in cubes.iter_mut() {
        transform.rotate_y(time.delta_secs() * 0.8);
        transform.rotate_x(time.delta_secs() * 0.4);
    }
}

/// Cast the pointer ray into the room: hover the monitor, click opens the carousel
fn handle_monitor_pointer(
    mut ray_cast: MeshRayCast,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    windows: Query<&Window>,
    keys: Query<&PrimitiveKey>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    arrow_parts: Query<(), With<ArrowPart>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut touch_state: ResMut<TouchState>,
    mut press_position: Local<Option<Vec2>>,
    mut hover: ResMut<MonitorHover>,
    mut carousel: ResMut<CarouselState>,
    status: Res<RoomStatus>,
    mut contexts: bevy_egui::EguiContexts,
) {
    if *status != RoomStatus::Ready {
        return;
    }

    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);
    if egui_wants_pointer || carousel.open {
        set_hover(&mut hover, None);
        *press_position = None;
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Ok(window) = windows.single() else { return };

    let not_arrow = |entity: Entity| !arrow_parts.contains(entity);
    let settings = MeshRayCastSettings::default().with_filter(&not_arrow);
    let mut monitor_at = |position: Vec2| -> Option<Entity> {
        let ray = camera.viewport_to_world(camera_transform, position).ok()?;
        let hits: Vec<RayHit<Entity>> = ray_cast
            .cast_ray(ray, &settings)
            .iter()
            .map(|(entity, hit)| RayHit {
                entity: *entity,
                names: hit_names(*entity, &keys, &names, &parents),
                distance: hit.distance,
            })
            .collect();
        nearest_hit_is_monitor(&hits)
    };

    // Hover follows the mouse cursor
    let cursor = window.cursor_position();
    let hovered = cursor.and_then(&mut monitor_at);
    set_hover(&mut hover, hovered);

    // Mouse click: press and release without dragging
    let mut click_position: Option<Vec2> = None;
    if mouse_button.just_pressed(MouseButton::Left) {
        *press_position = cursor;
    }
    if mouse_button.just_released(MouseButton::Left) {
        if let (Some(start), Some(end)) = (press_position.take(), cursor) {
            if start.distance(end) <= CLICK_SLOP {
                click_position = Some(end);
            }
        }
    }

    // Touch tap
    for touch in touch_input.iter() {
        if touch_input.just_pressed(touch.id()) {
            touch_state.begin(touch.position());
        } else {
            touch_state.moved_to(touch.position());
        }
    }
    for touch in touch_input.iter_just_released() {
        touch_state.moved_to(touch.position());
        if let Some(tap) = touch_state.end() {
            click_position = Some(tap);
        }
    }

    if let Some(position) = click_position {
        if monitor_at(position).is_some() {
            tracing::info!("Monitor clicked, opening work history");
            carousel.open();
        }
    }
}

/// Primitive key, then the names of the entity and its ancestors
fn hit_names(
    entity: Entity,
    keys: &Query<&PrimitiveKey>,
    names: &Query<&Name>,
    parents: &Query<&ChildOf>,
) -> Vec<String> {
    let mut hit_names: Vec<String> = keys.get(entity).map(|key| key.0.clone()).into_iter().collect();
    let mut current = Some(entity);
    while let Some(e) = current {
        if let Ok(name) = names.get(e) {
            hit_names.push(name.to_string());
        }
        current = parents.get(e).ok().map(|child_of| child_of.parent());
    }
    hit_names
}

fn set_hover(hover: &mut ResMut<MonitorHover>, monitor: Option<Entity>) {
    // Read through Deref first so an unchanged hover leaves change detection alone
    if hover.state.hovered() == monitor {
        return;
    }
    match hover.state.pointer_moved(monitor) {
        HoverChange::Entered { entity, previous } => {
            tracing::debug!(?entity, ?previous, "Monitor hovered");
        }
        HoverChange::Left { previous } => {
            tracing::debug!(?previous, "Monitor hover ended");
        }
        HoverChange::Unchanged => {}
    }
}

/// Original emissive of a monitor primitive, restored when unhovered
#[derive(Debug, Clone, Copy, PartialEq)]
struct OriginalEmissive(LinearRgba);

/// Emissive a monitor primitive should show for the current hover
fn monitor_emissive(
    hovered: Option<Entity>,
    entity: Entity,
    original: OriginalEmissive,
    highlight: LinearRgba,
) -> LinearRgba {
    if hovered == Some(entity) {
        highlight
    } else {
        original.0
    }
}

fn highlight_color() -> LinearRgba {
    let [r, g, b] = HIGHLIGHT_RGB;
    Color::srgb(r, g, b).to_linear() * (HIGHLIGHT_INTENSITY * EMISSIVE_SCALE)
}

/// Glow the hovered monitor primitive
/// Each monitor mesh gets its own cloned material to avoid affecting other meshes
fn update_monitor_highlight(
    mut commands: Commands,
    hover: Res<MonitorHover>,
    monitors: Query<(Entity, Option<&MeshMaterial3d<StandardMaterial>>), With<MonitorMesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut monitor_materials: Local<HashMap<Entity, (Handle<StandardMaterial>, OriginalEmissive)>>,
) {
    if !hover.is_changed() {
        return;
    }
    let hovered = hover.state.hovered();
    let highlight = highlight_color();

    for (entity, material_handle) in monitors.iter() {
        if !monitor_materials.contains_key(&entity) {
            let Some(material_handle) = material_handle else { continue };
            // Material not loaded yet; try again on the next hover change
            let Some(shared) = materials.get(&material_handle.0).cloned() else { continue };

            let original = OriginalEmissive(shared.emissive);
            let handle = materials.add(shared);
            commands.entity(entity).insert(MeshMaterial3d(handle.clone()));
            monitor_materials.insert(entity, (handle, original));
        }

        let Some((own_handle, original)) = monitor_materials.get(&entity) else { continue };
        if let Some(material) = materials.get_mut(own_handle) {
            material.emissive = monitor_emissive(hovered, entity, *original, highlight);
        }
    }
}

/// Pointer cursor over the monitor
fn update_canvas_cursor(hover: Res<MonitorHover>) {
    if !hover.is_changed() {
        return;
    }
    let cursor = if hover.state.is_hovering() { "pointer" } else { "default" };

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("roomfolio-canvas"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(canvas) = canvas {
            if let Err(e) = canvas.style().set_property("cursor", cursor) {
                tracing::warn!("Failed to set cursor: {:?}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    tracing::trace!(cursor, "Cursor change ignored outside the browser");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_rest_pose_sits_on_ring() {
        let spots = arrow_ring([0.0, 1.0, 0.0], ARROW_COUNT, ARROW_RADIUS, ARROW_LIFT);
        let arrow = GuideArrow { spot: spots[0] };
        let pose = ArrowPose::at(&arrow.spot, 0.0);
        assert!((pose.translation[1] - (1.0 + ARROW_LIFT)).abs() < 1e-5);
        assert!((pose.translation[0] - ARROW_RADIUS).abs() < 1e-5);
    }

    /// Spawn a glTF-style node with `count` primitives of `mesh` as bevy_gltf does
    fn spawn_gltf_node(world: &mut World, mesh: &str, materials: &[&str]) -> Vec<Entity> {
        let node = world.spawn(Name::new(mesh.to_string())).id();
        materials
            .iter()
            .map(|material| {
                world
                    .spawn((
                        Mesh3d(Handle::default()),
                        GltfMeshName(mesh.to_string()),
                        Name::new(format!("{}.{}", mesh, material)),
                        ChildOf(node),
                    ))
                    .id()
            })
            .collect()
    }

    #[test]
    fn test_monitor_tagged_from_bevy_primitive_names() {
        let mut app = App::new();
        app.add_systems(Update, tag_monitor_meshes);

        let monitor = spawn_gltf_node(
            app.world_mut(),
            "Plane.006",
            &["Material.001", "Frame", "Screen"],
        );
        let desk = spawn_gltf_node(app.world_mut(), "Desk", &["Wood"]);
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<PrimitiveKey>(monitor[2]),
            Some(&PrimitiveKey("plane006_2".to_string()))
        );
        assert!(world.get::<MonitorMesh>(monitor[2]).is_some());
        assert!(world.get::<MonitorMesh>(monitor[0]).is_none());
        assert!(world.get::<MonitorMesh>(monitor[1]).is_none());

        assert_eq!(world.get::<PrimitiveKey>(desk[0]), Some(&PrimitiveKey("desk".to_string())));
        assert!(world.get::<MonitorMesh>(desk[0]).is_none());
    }

    #[test]
    fn test_monitor_emissive() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let original = OriginalEmissive(LinearRgba::rgb(0.1, 0.0, 0.0));
        let highlight = highlight_color();

        assert_eq!(monitor_emissive(Some(a), a, original, highlight), highlight);
        assert_eq!(monitor_emissive(Some(a), b, original, highlight), original.0);
        assert_eq!(monitor_emissive(None, a, original, highlight), original.0);
    }

    fn emissive_of(app: &App, entity: Entity) -> LinearRgba {
        let handle = &app.world().get::<MeshMaterial3d<StandardMaterial>>(entity).unwrap().0;
        app.world()
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .emissive
    }

    #[test]
    fn test_highlight_moves_and_restores() {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MonitorHover>()
            .add_systems(Update, update_monitor_highlight);

        let original = LinearRgba::rgb(0.1, 0.0, 0.0);
        let shared = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                emissive: original,
                ..default()
            });
        let first = app
            .world_mut()
            .spawn((MonitorMesh, MeshMaterial3d(shared.clone())))
            .id();
        let second = app
            .world_mut()
            .spawn((MonitorMesh, MeshMaterial3d(shared.clone())))
            .id();

        app.world_mut()
            .resource_mut::<MonitorHover>()
            .state
            .pointer_moved(Some(first));
        app.update();

        // Each primitive got its own material; the shared one is untouched
        assert_eq!(emissive_of(&app, first), highlight_color());
        assert_eq!(emissive_of(&app, second), original);
        let first_handle = app.world().get::<MeshMaterial3d<StandardMaterial>>(first).unwrap().0.clone();
        assert_ne!(first_handle, shared);
        let shared_emissive = app
            .world()
            .resource::<Assets<StandardMaterial>>()
            .get(&shared)
            .unwrap()
            .emissive;
        assert_eq!(shared_emissive, original);

        app.world_mut()
            .resource_mut::<MonitorHover>()
            .state
            .pointer_moved(Some(second));
        app.update();
        assert_eq!(emissive_of(&app, first), original);
        assert_eq!(emissive_of(&app, second), highlight_color());

        app.world_mut().resource_mut::<MonitorHover>().state.pointer_left();
        app.update();
        assert_eq!(emissive_of(&app, first), original);
        assert_eq!(emissive_of(&app, second), original);
    }
}
