//! UI overlays using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use roomfolio_core::experience::WorkExperience;
use roomfolio_core::{LoadingDots, Step};

use crate::app::{in_step, CameraSettings, CarouselState, RoomStatus, ThemeState, UiLayout};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayDots>()
            // UI layout updates run in Update
            .add_systems(Update, (
                update_ui_layout,
                animate_overlay_dots,
                carousel_keyboard.run_if(in_step(Step::Portfolio)),
            ))
            // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, ui_system.run_if(in_step(Step::Portfolio)));
    }
}

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x4f, 0xac, 0xfe);
const TAG_FILL: egui::Color32 = egui::Color32::from_rgb(0x66, 0x7e, 0xea);

/// Cycling ellipsis on the room loading overlay
#[derive(Resource, Default)]
struct OverlayDots(LoadingDots);

/// Update UI layout based on window size
fn update_ui_layout(
    windows: Query<&Window>,
    mut ui_layout: ResMut<UiLayout>,
) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        // Only update if dimensions changed significantly
        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_for_screen(width, height);
        }
    }
}

fn animate_overlay_dots(time: Res<Time>, status: Res<RoomStatus>, mut dots: ResMut<OverlayDots>) {
    if status.is_loading() {
        dots.0.advance(time.delta());
    }
}

/// Escape closes the carousel, arrow keys flip slides
fn carousel_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut carousel: ResMut<CarouselState>,
) {
    if !carousel.open {
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        carousel.close();
    } else if keyboard.just_pressed(KeyCode::ArrowRight) {
        carousel.carousel.next();
    } else if keyboard.just_pressed(KeyCode::ArrowLeft) {
        carousel.carousel.prev();
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut camera_settings: ResMut<CameraSettings>,
    mut theme: ResMut<ThemeState>,
    mut carousel: ResMut<CarouselState>,
    status: Res<RoomStatus>,
    dots: Res<OverlayDots>,
    ui_layout: Res<UiLayout>,
) {
    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let scale = ui_layout.ui_scale;

    match &*status {
        RoomStatus::Resolving | RoomStatus::Loading { .. } => {
            loading_overlay(ctx, dots.0.text(), scale);
        }
        RoomStatus::Failed { .. } => {
            failure_label(ctx, scale);
        }
        RoomStatus::Idle | RoomStatus::Ready => {}
    }

    // Info panel, hidden while the carousel is open
    if !carousel.open {
        egui::Window::new("Interactive 3D Portfolio Room")
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
            .resizable(false)
            .collapsible(ui_layout.is_mobile)
            .default_width(280.0 * scale)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("🎯 Follow the orange arrows to find the monitor!")
                        .size(14.0 * scale)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new("Use mouse to rotate, scroll to zoom, and drag to pan")
                        .size(13.0 * scale),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(egui::RichText::new("📷 Reset View").size(14.0 * scale)).clicked() {
                        camera_settings.reset();
                    }
                    let label = theme.0.toggle_label();
                    if ui.button(egui::RichText::new(label).size(14.0 * scale)).clicked() {
                        theme.0 = theme.0.toggled();
                    }
                });
            });
    }

    if carousel.open {
        carousel_window(ctx, &mut carousel, &ui_layout);
    }
}

fn loading_overlay(ctx: &egui::Context, dots: &str, scale: f32) {
    egui::Area::new(egui::Id::new("room_loading"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(360.0 * scale);
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.heading(egui::RichText::new("Loading Portfolio").size(22.0 * scale));
                    ui.label(format!("Preparing 3D Experience{}", dots));
                    ui.add_space(8.0);
                    ui.label("💡 Tip: This detailed 3D portfolio room includes interactive elements");
                    ui.label("🎯 Look for the glowing monitor to explore my work experience");
                });
            });
        });
}

fn failure_label(ctx: &egui::Context, scale: f32) {
    egui::Area::new(egui::Id::new("room_placeholder"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 96.0 * scale))
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Portfolio Room")
                        .size(28.0 * scale)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new("(Loading 3D model...)")
                        .size(16.0 * scale)
                        .color(egui::Color32::WHITE),
                );
            });
        });
}

/// Work history slides; clicking the backdrop or pressing Escape closes it
fn carousel_window(ctx: &egui::Context, state: &mut CarouselState, layout: &UiLayout) {
    let scale = layout.ui_scale;
    let width = layout.carousel_width();
    let max_height = layout.screen_height * 0.85;

    let modal = egui::Modal::new(egui::Id::new("work_history")).show(ctx, |ui| {
        ui.set_width(width);

        let mut close = false;
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.button(egui::RichText::new("✕").size(18.0 * scale)).clicked() {
                close = true;
            }
        });

        if let Some(experience) = state.current() {
            egui::ScrollArea::vertical()
                .max_height(max_height - 120.0)
                .show(ui, |ui| experience_card(ui, experience, scale));
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(egui::RichText::new("← Previous").size(14.0 * scale)).clicked() {
                state.carousel.prev();
            }

            let mut selected = None;
            for index in 0..state.carousel.len() {
                let active = index == state.carousel.index();
                let dot = egui::RichText::new(if active { "●" } else { "○" })
                    .size(14.0 * scale)
                    .color(if active { ACCENT } else { egui::Color32::GRAY });
                if ui.add(egui::Button::new(dot).frame(false)).clicked() {
                    selected = Some(index);
                }
            }
            if let Some(index) = selected {
                state.carousel.select(index);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(egui::RichText::new("Next →").size(14.0 * scale)).clicked() {
                    state.carousel.next();
                }
            });
        });

        close
    });

    if modal.inner || modal.should_close() {
        state.close();
    }
}

fn experience_card(ui: &mut egui::Ui, experience: &WorkExperience, scale: f32) {
    ui.heading(egui::RichText::new(&experience.title).size(22.0 * scale).strong());
    ui.label(egui::RichText::new(&experience.company).size(17.0 * scale).color(ACCENT));
    ui.label(egui::RichText::new(&experience.location).italics());
    ui.label(egui::RichText::new(&experience.duration).weak());
    ui.add_space(10.0);

    ui.label(egui::RichText::new("Key Achievements:").size(15.0 * scale).strong());
    for achievement in &experience.achievements {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            ui.label(achievement);
        });
    }

    for link in experience.sorted_links() {
        ui.add_space(6.0);
        ui.label(egui::RichText::new(link.kind.heading()).size(15.0 * scale).strong());
        ui.hyperlink_to(&link.url, &link.url);
    }

    ui.add_space(10.0);
    ui.label(egui::RichText::new("Technologies & Skills:").size(15.0 * scale).strong());
    ui.horizontal_wrapped(|ui| {
        for tech in &experience.technologies {
            egui::Frame::new()
                .fill(TAG_FILL)
                .inner_margin(egui::Margin::symmetric(8, 3))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(tech).size(12.0 * scale).color(egui::Color32::WHITE));
                });
        }
    });
}
