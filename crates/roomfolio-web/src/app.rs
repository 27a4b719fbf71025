//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::{DefaultPickingPlugins, prelude::MeshPickingPlugin};
use roomfolio_core::experience::{work_history, Carousel, WorkExperience};
use roomfolio_core::orbit::{clamp_distance, OrbitState};
use roomfolio_core::{Step, Theme};

use crate::quality::QualityPlugin;
use crate::room::RoomPlugin;
use crate::scene::ScenePlugin;
use crate::ui::UiPlugin;
use crate::wizard::WizardPlugin;

/// Which screen is showing
#[derive(Debug, Clone, Copy, Resource, Default, PartialEq, Eq)]
pub struct SiteStep(pub Step);

/// Run condition: the site is on `step`
pub fn in_step(step: Step) -> impl Fn(Res<SiteStep>) -> bool + Clone {
    move |current: Res<SiteStep>| current.0 == step
}

/// Active dark/light theme
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct ThemeState(pub Theme);

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub orbit: OrbitState,
    pub target_distance: f32, // For smooth zoom
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let orbit = OrbitState::home();
        Self {
            target_distance: orbit.distance,
            orbit,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            smooth_factor: 0.15,
        }
    }
}

impl CameraSettings {
    /// Return to the home view
    pub fn reset(&mut self) {
        self.orbit = OrbitState::home();
        self.target_distance = self.orbit.distance;
    }

    /// Zoom towards a new distance; the camera eases there over a few frames
    pub fn zoom_by(&mut self, factor: f32) {
        self.target_distance = clamp_distance(self.target_distance * factor);
    }
}

/// Work history carousel overlay
#[derive(Debug, Clone, Resource)]
pub struct CarouselState {
    pub open: bool,
    pub carousel: Carousel,
    pub experiences: Vec<WorkExperience>,
}

impl Default for CarouselState {
    fn default() -> Self {
        let experiences = work_history();
        Self {
            open: false,
            carousel: Carousel::new(experiences.len()),
            experiences,
        }
    }
}

impl CarouselState {
    /// Open on the first slide
    pub fn open(&mut self) {
        self.open = true;
        self.carousel = Carousel::new(self.experiences.len());
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn current(&self) -> Option<&WorkExperience> {
        self.carousel.current(&self.experiences)
    }
}

/// Room model loading progress, shown by the UI overlay
#[derive(Debug, Clone, Resource, Default, PartialEq)]
pub enum RoomStatus {
    /// Waiting for the portfolio step
    #[default]
    Idle,
    /// Looking up the optional blob config
    Resolving,
    /// A source is being loaded
    Loading { source: String },
    /// The room scene is spawned
    Ready,
    /// Every source failed; the placeholder cube is shown
    Failed { error: String },
}

impl RoomStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RoomStatus::Resolving | RoomStatus::Loading { .. })
    }
}

/// UI layout settings for responsive design
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    /// Current screen width
    pub screen_width: f32,
    /// Current screen height
    pub screen_height: f32,
    /// Whether we're on a small screen (mobile/tablet)
    pub is_mobile: bool,
    /// Scale factor for UI elements on mobile
    pub ui_scale: f32,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            is_mobile: false,
            ui_scale: 1.0,
        }
    }
}

impl UiLayout {
    /// Update layout based on screen dimensions
    pub fn update_for_screen(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;

        // Consider mobile if width < 800 or if it's a portrait orientation with width < 600
        self.is_mobile = width < 800.0 || (width < height && width < 600.0);

        // Scale up UI elements on mobile for better touch targets
        self.ui_scale = if self.is_mobile { 1.3 } else { 1.0 };
    }

    /// Width of the carousel window
    pub fn carousel_width(&self) -> f32 {
        if self.is_mobile {
            self.screen_width * 0.92
        } else {
            (self.screen_width * 0.6).clamp(420.0, 760.0)
        }
    }
}

/// Run the Bevy application
pub fn run() {
    let background = Theme::default().background();

    App::new()
        .insert_resource(ClearColor(Color::srgb(background[0], background[1], background[2])))
        // Continuous rendering; the quality plugin switches low-end devices to reactive mode
        .insert_resource(WinitSettings::default())
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "3D Portfolio".to_string(),
                    canvas: Some("#roomfolio-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Load assets from the site root (public/ and /api/glb)
                file_path: "".to_string(),
                // Don't look for .meta files - the server doesn't have them
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // bevy_picking from the crate must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .init_resource::<SiteStep>()
        .init_resource::<ThemeState>()
        .init_resource::<CameraSettings>()
        .init_resource::<CarouselState>()
        .init_resource::<RoomStatus>()
        .init_resource::<UiLayout>()
        .add_plugins(QualityPlugin)
        .add_plugins(WizardPlugin)
        .add_plugins(ScenePlugin)
        .add_plugins(RoomPlugin)
        .add_plugins(UiPlugin)
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomfolio_core::orbit::{MAX_DISTANCE, MIN_DISTANCE};

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut settings = CameraSettings::default();
        settings.zoom_by(100.0);
        assert_eq!(settings.target_distance, MAX_DISTANCE);
        settings.zoom_by(0.0001);
        assert_eq!(settings.target_distance, MIN_DISTANCE);

        settings.orbit.azimuth += 1.0;
        settings.reset();
        assert_eq!(settings.orbit, OrbitState::home());
    }

    #[test]
    fn test_carousel_reopens_on_first_slide() {
        let mut state = CarouselState::default();
        state.open();
        state.carousel.next();
        state.carousel.next();
        state.close();
        assert!(!state.open);

        state.open();
        assert_eq!(state.carousel.index(), 0);
        assert_eq!(state.current().map(|e| e.id), Some(1));
    }

    #[test]
    fn test_mobile_layout() {
        let mut layout = UiLayout::default();
        layout.update_for_screen(390.0, 844.0);
        assert!(layout.is_mobile);
        assert!(layout.carousel_width() < 390.0);

        layout.update_for_screen(1440.0, 900.0);
        assert!(!layout.is_mobile);
        assert_eq!(layout.carousel_width(), 760.0);
    }
}
