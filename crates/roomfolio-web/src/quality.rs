//! Device detection and render quality settings

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use roomfolio_core::{DeviceProfile, QualityTier, RenderQuality};
use std::time::Duration;

use crate::scene::{FillLight, KeyLight, MainCamera};

pub struct QualityPlugin;

impl Plugin for QualityPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveQuality(detect_quality()))
            .add_systems(Update, apply_quality);
    }
}

/// Render settings picked for this device
#[derive(Debug, Clone, Copy, Resource)]
pub struct ActiveQuality(pub RenderQuality);

/// Read the device profile from the browser and resolve the quality tier
fn detect_quality() -> RenderQuality {
    let profile = browser_profile();
    let override_tier = query_param("quality").and_then(|value| match value.parse::<QualityTier>() {
        Ok(tier) => Some(tier),
        Err(e) => {
            tracing::warn!("Ignoring quality override: {}", e);
            None
        }
    });

    let quality = RenderQuality::resolve(&profile, override_tier);
    tracing::info!(
        tier = %quality.tier,
        cores = ?profile.logical_cores,
        memory_gb = ?profile.memory_gb,
        mobile = profile.is_mobile,
        "Render quality selected"
    );
    quality
}

#[cfg(target_arch = "wasm32")]
fn browser_profile() -> DeviceProfile {
    let Some(window) = web_sys::window() else {
        return DeviceProfile::default();
    };
    let navigator = window.navigator();

    let logical_cores = match navigator.hardware_concurrency() {
        cores if cores >= 1.0 => Some(cores as u32),
        _ => None,
    };
    // deviceMemory is Chromium-only and missing from web-sys
    let memory_gb = js_sys::Reflect::get(&navigator, &"deviceMemory".into())
        .ok()
        .and_then(|value| value.as_f64())
        .map(|gb| gb as f32);
    let user_agent = navigator.user_agent().unwrap_or_default();
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1920.0) as f32;

    DeviceProfile {
        logical_cores,
        memory_gb,
        pixel_ratio: window.device_pixel_ratio() as f32,
        is_mobile: roomfolio_core::quality::is_mobile_user_agent(&user_agent),
        viewport_width,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_profile() -> DeviceProfile {
    DeviceProfile::default()
}

/// Read a query parameter from the page URL
#[cfg(target_arch = "wasm32")]
pub fn query_param(name: &str) -> Option<String> {
    let href = web_sys::window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params().get(name)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query_param(_name: &str) -> Option<String> {
    None
}

/// Map a sample count onto the MSAA levels the renderer supports
fn msaa_for(samples: u32) -> Msaa {
    match samples {
        s if s >= 4 => Msaa::Sample4,
        // WebGPU only guarantees 1x and 4x
        2 if cfg!(feature = "webgl2") => Msaa::Sample2,
        2 => Msaa::Sample4,
        _ => Msaa::Off,
    }
}

/// Apply MSAA, shadows, fill lights and redraw policy
fn apply_quality(
    mut commands: Commands,
    quality: Res<ActiveQuality>,
    cameras: Query<Entity, Added<MainCamera>>,
    all_cameras: Query<Entity, With<MainCamera>>,
    mut key_lights: Query<&mut DirectionalLight, With<KeyLight>>,
    mut fill_lights: Query<&mut Visibility, With<FillLight>>,
    mut winit_settings: ResMut<WinitSettings>,
) {
    let new_camera = !cameras.is_empty();
    if !quality.is_changed() && !new_camera {
        return;
    }
    let quality = quality.0;

    for camera in all_cameras.iter() {
        commands.entity(camera).insert(msaa_for(quality.msaa_samples));
    }

    for mut light in key_lights.iter_mut() {
        light.shadows_enabled = quality.shadows;
    }

    for mut visibility in fill_lights.iter_mut() {
        *visibility = if quality.environment_lights {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if quality.low_power {
        // Reactive rendering with a low idle rate
        winit_settings.focused_mode = UpdateMode::reactive_low_power(Duration::from_millis(100));
        winit_settings.unfocused_mode = UpdateMode::reactive_low_power(Duration::from_millis(500));
    } else {
        *winit_settings = WinitSettings::default();
    }

    tracing::debug!(tier = %quality.tier, "Render quality applied");
}
