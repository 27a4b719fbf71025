//! Camera, lights, sun and moon, orbit controls

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use roomfolio_core::theme::{approach, CELESTIAL_XZ, RISEN_Y};
use roomfolio_core::{Step, Theme};

use crate::app::{in_step, CameraSettings, CarouselState, ThemeState};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TouchState>()
            .add_systems(Startup, setup_scene)
            .add_systems(Update, (
                update_camera.run_if(in_step(Step::Portfolio)),
                apply_theme,
                animate_celestial_bodies,
            ));
    }
}

/// Ambient brightness per unit of theme ambient intensity
const AMBIENT_SCALE: f32 = 400.0;
/// Directional illuminance (lux) per unit of theme key light intensity
const KEY_LIGHT_LUX: f32 = 3000.0;
/// Point light lumens per unit of glow intensity; the bodies sit ~60 units away
const GLOW_LUMENS: f32 = 20_000_000.0;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the theme-driven directional light
#[derive(Component)]
pub struct KeyLight;

/// Marker for the extra fill light toggled by render quality
#[derive(Component)]
pub struct FillLight;

/// Sun or moon sphere
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialBody {
    Moon,
    Sun,
}

impl CelestialBody {
    fn target(self, theme: Theme) -> (f32, f32) {
        match self {
            CelestialBody::Moon => theme.moon_target(),
            CelestialBody::Sun => theme.sun_target(),
        }
    }
}

/// Glow light that follows whichever body is up
#[derive(Component)]
pub struct CelestialGlow;

/// Current eased height and opacity of a body
#[derive(Component, Debug, Clone, Copy)]
struct CelestialMotion {
    height: f32,
    opacity: f32,
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<CameraSettings>,
    theme: Res<ThemeState>,
) {
    let theme = theme.0;
    let orbit = &settings.orbit;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(orbit.position()))
            .looking_at(Vec3::from_array(orbit.target), Vec3::Y),
        MainCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: theme.ambient_intensity() * AMBIENT_SCALE,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: theme.key_light_intensity() * KEY_LIGHT_LUX,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        KeyLight,
    ));

    // Soft fill from the opposite side
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 60.0,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.95, 0.9),
            ..default()
        },
        Transform::from_xyz(-8.0, 6.0, -6.0),
        FillLight,
    ));

    let bodies = [
        (CelestialBody::Moon, 3.0, Color::srgb_u8(0xf0, 0xf0, 0xf0)),
        (CelestialBody::Sun, 4.0, Color::srgb_u8(0xff, 0xff, 0x00)),
    ];
    for (body, radius, color) in bodies {
        let (height, opacity) = body.target(theme);
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color.with_alpha(opacity),
                emissive: color.to_linear() * 2.0,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_xyz(CELESTIAL_XZ[0], height, CELESTIAL_XZ[1]),
            body,
            CelestialMotion { height, opacity },
        ));
    }

    let glow = theme.glow();
    commands.spawn((
        PointLight {
            color: Color::srgb(glow.rgb[0], glow.rgb[1], glow.rgb[2]),
            intensity: glow.intensity * GLOW_LUMENS,
            range: glow.range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(CELESTIAL_XZ[0], RISEN_Y, CELESTIAL_XZ[1]),
        CelestialGlow,
    ));
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    carousel: Res<CarouselState>,
    time: Res<Time>,
    mut contexts: bevy_egui::EguiContexts,
) {
    // Check if egui wants the mouse - if so, don't process camera controls
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);
    let controls_enabled = !egui_wants_pointer && !carousel.open;

    if controls_enabled {
        let motion = mouse_motion.delta;
        let sensitivity = settings.sensitivity;

        // Orbit with left mouse drag
        if mouse_button.pressed(MouseButton::Left) {
            settings.orbit.rotate(-motion.x, motion.y, sensitivity);
        }

        // Pan with right mouse drag
        if mouse_button.pressed(MouseButton::Right) {
            settings.orbit.pan(motion.x, motion.y);
        }

        // Zoom with scroll - smooth zoom using target_distance
        let lines = match mouse_scroll.unit {
            MouseScrollUnit::Line => mouse_scroll.delta.y,
            MouseScrollUnit::Pixel => mouse_scroll.delta.y / 100.0,
        };
        if lines != 0.0 {
            let zoom_factor = 1.0 - lines * settings.zoom_speed;
            settings.zoom_by(zoom_factor);
        }

        // Touch support for mobile
        if touch_input.iter().count() == 1 {
            for touch in touch_input.iter() {
                let delta = touch.delta();
                if delta != Vec2::ZERO {
                    settings.orbit.rotate(-delta.x, delta.y, sensitivity);
                }
            }
        }

        // Pinch to zoom
        if touch_input.iter().count() == 2 {
            let touches: Vec<_> = touch_input.iter().collect();
            if let (Some(t1), Some(t2)) = (touches.first(), touches.get(1)) {
                let curr_dist = t1.position().distance(t2.position());
                let prev_dist = (t1.position() - t1.delta())
                    .distance(t2.position() - t2.delta());
                settings.zoom_by(prev_dist / curr_dist.max(1.0));
            }
        }
    }

    // Smooth interpolation for zoom
    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    let distance = settings.orbit.distance;
    settings.orbit.distance = distance + (settings.target_distance - distance) * lerp_factor;

    if let Ok(mut transform) = camera_query.single_mut() {
        let target = Vec3::from_array(settings.orbit.target);
        transform.translation = Vec3::from_array(settings.orbit.position());
        transform.look_at(target, Vec3::Y);
    }
}

/// Push the theme into clear color and light levels when it changes
fn apply_theme(
    theme: Res<ThemeState>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
    mut key_lights: Query<&mut DirectionalLight, With<KeyLight>>,
    mut glow_lights: Query<&mut PointLight, With<CelestialGlow>>,
) {
    if !theme.is_changed() {
        return;
    }
    let theme = theme.0;

    let [r, g, b] = theme.background();
    clear_color.0 = Color::srgb(r, g, b);
    ambient.brightness = theme.ambient_intensity() * AMBIENT_SCALE;

    for mut light in key_lights.iter_mut() {
        light.illuminance = theme.key_light_intensity() * KEY_LIGHT_LUX;
    }

    let glow = theme.glow();
    for mut light in glow_lights.iter_mut() {
        light.color = Color::srgb(glow.rgb[0], glow.rgb[1], glow.rgb[2]);
        light.intensity = glow.intensity * GLOW_LUMENS;
        light.range = glow.range;
    }

    tracing::debug!(?theme, "Theme applied");
}

/// Ease the sun and moon toward their theme heights and opacities
fn animate_celestial_bodies(
    time: Res<Time>,
    theme: Res<ThemeState>,
    mut bodies: Query<(
        &CelestialBody,
        &mut CelestialMotion,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut glow: Query<&mut Transform, (With<CelestialGlow>, Without<CelestialBody>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dt = time.delta_secs();
    let mut risen: Option<Vec3> = None;

    for (body, mut motion, mut transform, material) in bodies.iter_mut() {
        let (target_height, target_opacity) = body.target(theme.0);
        motion.height = approach(motion.height, target_height, dt);
        motion.opacity = approach(motion.opacity, target_opacity, dt);

        transform.translation.y = motion.height;
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(motion.opacity);
        }

        if target_opacity > 0.0 {
            risen = Some(transform.translation);
        }
    }

    if let (Some(position), Ok(mut transform)) = (risen, glow.single_mut()) {
        transform.translation = position;
    }
}

/// Track touch state for tap detection
#[derive(Resource, Default)]
pub struct TouchState {
    /// Position where touch started
    pub start_position: Option<Vec2>,
    /// Whether this touch has moved significantly (is a drag, not a tap)
    pub is_dragging: bool,
}

impl TouchState {
    /// Movement beyond this many pixels turns a tap into a drag
    pub const DRAG_THRESHOLD: f32 = 10.0;

    pub fn begin(&mut self, position: Vec2) {
        self.start_position = Some(position);
        self.is_dragging = false;
    }

    pub fn moved_to(&mut self, position: Vec2) {
        if let Some(start) = self.start_position {
            if position.distance(start) > Self::DRAG_THRESHOLD {
                self.is_dragging = true;
            }
        }
    }

    /// Touch released; returns the tap position if it never became a drag
    pub fn end(&mut self) -> Option<Vec2> {
        let tap = if self.is_dragging { None } else { self.start_position };
        self.start_position = None;
        self.is_dragging = false;
        tap
    }
}
