//! Welcome and loading screens shown before the room

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use roomfolio_core::{LoadingSimulation, Step};

use crate::app::{in_step, SiteStep, UiLayout};

pub struct WizardPlugin;

impl Plugin for WizardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingScreen>()
            .add_systems(Update, advance_loading.run_if(in_step(Step::Loading)))
            .add_systems(EguiPrimaryContextPass, (
                welcome_screen.run_if(in_step(Step::Welcome)),
                loading_screen.run_if(in_step(Step::Loading)),
            ));
    }
}

/// Simulated progress for the loading screen
#[derive(Resource, Default)]
pub struct LoadingScreen {
    pub sim: LoadingSimulation,
}

const HERO_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x66, 0x7e, 0xea);
const HERO_ACCENT: egui::Color32 = egui::Color32::from_rgb(0x76, 0x4b, 0xa2);
const DOT_LIT: egui::Color32 = egui::Color32::WHITE;
const DOT_DIM: egui::Color32 = egui::Color32::from_rgba_premultiplied(80, 80, 80, 80); // == from_white_alpha(80), which is not const

fn advance_loading(
    time: Res<Time>,
    mut screen: ResMut<LoadingScreen>,
    mut step: ResMut<SiteStep>,
) {
    screen.sim.advance(time.delta());
    if screen.sim.take_finished() {
        step.0 = step.0.loading_complete();
        tracing::info!("Loading screen finished, entering portfolio");
    }
}

fn welcome_screen(
    mut contexts: EguiContexts,
    mut step: ResMut<SiteStep>,
    ui_layout: Res<UiLayout>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let scale = ui_layout.ui_scale;

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(HERO_BACKGROUND))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.label(
                    egui::RichText::new("Welcome to My 3D Portfolio")
                        .size(40.0 * scale)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(24.0);

                let button = egui::Button::new(
                    egui::RichText::new("Let's Explore My Working Space In 3D")
                        .size(18.0 * scale)
                        .color(egui::Color32::WHITE),
                )
                .fill(HERO_ACCENT)
                .min_size(egui::vec2(280.0 * scale, 48.0 * scale));

                if ui.add(button).clicked() {
                    step.0 = step.0.explore();
                    tracing::info!("Explore pressed, starting loading screen");
                }
            });
        });
}

fn loading_screen(
    mut contexts: EguiContexts,
    screen: Res<LoadingScreen>,
    ui_layout: Res<UiLayout>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let scale = ui_layout.ui_scale;
    let sim = &screen.sim;

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(HERO_BACKGROUND))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.label(
                    egui::RichText::new("3D Portfolio")
                        .size(36.0 * scale)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new("Loading my professional and life experiences...")
                        .size(16.0 * scale)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(24.0);

                let bar_width = (ui_layout.screen_width * 0.8).min(400.0);
                ui.add(
                    egui::ProgressBar::new(sim.fraction())
                        .desired_width(bar_width)
                        .fill(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new(format!("{}%", sim.progress()))
                        .size(18.0 * scale)
                        .color(egui::Color32::WHITE),
                );

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    // Three dots centered under the bar
                    let dot_size = 18.0 * scale;
                    ui.add_space((ui.available_width() - dot_size * 3.0 - 16.0) / 2.0);
                    for lit in sim.dots() {
                        let color = if lit { DOT_LIT } else { DOT_DIM };
                        ui.label(egui::RichText::new("●").size(dot_size).color(color));
                    }
                });

                if sim.is_complete() {
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new("Ready to explore!")
                            .size(20.0 * scale)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                }
            });
        });
}
