//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::orrery::{CelestialBody, OrbitKind};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
pub const CAMERA: &str = egui_phosphor::regular::VIDEO_CAMERA;
/// Orbit line toggle
pub const ORBIT: &str = egui_phosphor::regular::PATH;
/// Bloom and exposure section
pub const BLOOM: &str = egui_phosphor::regular::SPARKLE;
/// Frame plan section
pub const PASSES: &str = egui_phosphor::regular::STACK;
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
pub const CLEAR: &str = egui_phosphor::regular::X;
pub const KEYBOARD: &str = egui_phosphor::regular::KEYBOARD;

// Celestial body icons
pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const MOON: &str = egui_phosphor::regular::MOON;

/// Icon for a body by how it moves.
pub fn body_icon(body: &CelestialBody) -> &'static str {
    match body.kind {
        OrbitKind::Star => SUN,
        OrbitKind::Planet(_) => PLANET,
        OrbitKind::Satellite { .. } => MOON,
    }
}
