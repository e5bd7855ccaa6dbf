//! Crosshair and menu hint drawn while the menu is hidden.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::UiState;

const CROSSHAIR_HALF_LENGTH: f32 = 8.0;
const CROSSHAIR_GAP: f32 = 2.0;

/// Draw the crosshair at the view center, where picking aims.
pub fn crosshair_overlay(mut contexts: EguiContexts, ui_state: Res<UiState>) {
    if ui_state.menu_open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("crosshair"),
    ));
    let rect = ctx.screen_rect();
    let center = rect.center();
    let stroke = egui::Stroke::new(1.5, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200));

    for dir in [egui::vec2(1.0, 0.0), egui::vec2(0.0, 1.0)] {
        for sign in [-1.0, 1.0] {
            let from = center + dir * sign * CROSSHAIR_GAP;
            let to = center + dir * sign * CROSSHAIR_HALF_LENGTH;
            painter.line_segment([from, to], stroke);
        }
    }

    painter.text(
        rect.left_top() + egui::vec2(12.0, 12.0),
        egui::Align2::LEFT_TOP,
        "press TAB to show menu",
        egui::FontId::proportional(14.0),
        egui::Color32::from_rgb(160, 160, 170),
    );
}
