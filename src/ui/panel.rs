//! Menu panel shown while the menu is open.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{UiState, icons};
use crate::camera::{FlyCamera, MAX_SPEED, MIN_SPEED};
use crate::orrery::Orrery;
use crate::render::pipeline::MAX_BLUR_PASSES;
use crate::render::{FramePlan, PostProcessSettings};
use crate::selection::Selection;
use crate::types::{MAX_TIME_SCALE, SceneSettings, SimulationClock};

/// Colors for the menu.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 30, 230);
    pub const HEADING: Color32 = Color32::from_rgb(220, 220, 230);
    pub const MUTED: Color32 = Color32::from_rgb(140, 140, 150);
    pub const SELECTED: Color32 = Color32::from_rgb(85, 221, 136);
}

/// Key and action pairs listed in the menu.
pub const CONTROLS: &[(&str, &str)] = &[
    ("W / A / S / D", "move"),
    ("Space / Left Shift", "up / down"),
    ("Mouse", "look"),
    ("Scroll", "zoom"),
    ("Left click", "select and follow"),
    ("Right click", "deselect"),
    ("= / -", "time scale"),
    ("P", "pause"),
    ("Tab", "toggle menu"),
    ("Escape", "drop followed body / quit"),
];

/// FPS readout text.
pub fn fps_label(fps: Option<f64>) -> String {
    match fps {
        Some(fps) if fps.is_finite() => format!("{fps:.0} FPS"),
        _ => "-- FPS".to_string(),
    }
}

/// Name of the selected body, or a placeholder.
pub fn selection_label(selection: &Selection, orrery: &Orrery) -> String {
    selection
        .body()
        .and_then(|id| orrery.get(id))
        .map_or_else(|| "nothing selected".to_string(), |body| body.name.clone())
}

fn section_heading(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.add_space(6.0);
    ui.label(
        egui::RichText::new(format!("{icon} {title}"))
            .strong()
            .color(colors::HEADING),
    );
}

/// System that renders the menu panel.
pub fn menu_panel(
    mut contexts: EguiContexts,
    ui_state: Res<UiState>,
    mut clock: ResMut<SimulationClock>,
    mut fly: ResMut<FlyCamera>,
    mut scene: ResMut<SceneSettings>,
    mut post: ResMut<PostProcessSettings>,
    mut selection: ResMut<Selection>,
    orrery: Res<Orrery>,
    plan: Option<Res<FramePlan>>,
    diagnostics: Option<Res<DiagnosticsStore>>,
) {
    if !ui_state.menu_open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let fps = diagnostics
        .as_ref()
        .and_then(|d| d.get(&FrameTimeDiagnosticsPlugin::FPS))
        .and_then(|d| d.smoothed());

    // Edit copies so watchers only see a change when a value really moves
    let mut scene_edit = scene.clone();
    let mut post_edit = post.clone();

    egui::SidePanel::left("menu")
        .resizable(false)
        .default_width(280.0)
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(fps_label(fps)).monospace().color(colors::MUTED));

            section_heading(ui, icons::CLOCK, "Time");
            ui.add(egui::Slider::new(&mut clock.scale, 0.0..=MAX_TIME_SCALE).text("scale"));
            let (icon, label) = if clock.paused {
                (icons::PLAY, "Resume")
            } else {
                (icons::PAUSE, "Pause")
            };
            if ui.button(format!("{icon} {label}")).clicked() {
                clock.paused = !clock.paused;
            }
            ui.label(
                egui::RichText::new(format!("t = {:.1} s", clock.elapsed))
                    .monospace()
                    .color(colors::MUTED),
            );

            section_heading(ui, icons::CAMERA, "Camera");
            ui.add(egui::Slider::new(&mut fly.speed, MIN_SPEED..=MAX_SPEED).text("speed"));
            ui.label(
                egui::RichText::new(format!("fov {:.0}°", fly.zoom)).color(colors::MUTED),
            );

            section_heading(ui, icons::ORBIT, "Scene");
            ui.checkbox(&mut scene_edit.show_orbits, "Orbit lines");

            section_heading(ui, icons::BLOOM, "Bloom");
            ui.add(egui::Slider::new(&mut post_edit.bloom_strength, 0.0..=1.0).text("strength"));
            ui.add(
                egui::Slider::new(&mut post_edit.exposure, 0.1..=5.0)
                    .logarithmic(true)
                    .text("exposure"),
            );
            ui.add(egui::Slider::new(&mut post_edit.blur_passes, 1..=MAX_BLUR_PASSES).text("blur passes"));

            section_heading(ui, icons::TARGET, "Selection");
            let name = selection_label(&selection, &orrery);
            let icon = selection
                .body()
                .and_then(|id| orrery.get(id))
                .map_or(icons::TARGET, icons::body_icon);
            let color = if selection.body().is_some() {
                colors::SELECTED
            } else {
                colors::MUTED
            };
            ui.label(egui::RichText::new(format!("{icon} {name}")).color(color));

            ui.add_enabled_ui(selection.body().is_some(), |ui| {
                let mut following = selection.is_following();
                if ui.checkbox(&mut following, "Follow").changed() {
                    selection.set_following(following);
                }
                if ui.button(format!("{} Clear selection", icons::CLEAR)).clicked() {
                    selection.clear();
                    info!("Selection cleared");
                }
            });

            if let Some(plan) = &plan {
                section_heading(ui, icons::PASSES, "Frame passes");
                for (i, pass) in plan.passes().iter().enumerate() {
                    ui.label(
                        egui::RichText::new(format!("{}. {}", i + 1, pass.label()))
                            .monospace()
                            .color(colors::MUTED),
                    );
                }
            }

            section_heading(ui, icons::KEYBOARD, "Controls");
            egui::Grid::new("controls").num_columns(2).show(ui, |ui| {
                for (key, action) in CONTROLS {
                    ui.label(egui::RichText::new(*key).monospace());
                    ui.label(*action);
                    ui.end_row();
                }
            });
        });

    if scene_edit != *scene {
        *scene = scene_edit;
    }
    if post_edit != *post {
        *post = post_edit;
    }
}
