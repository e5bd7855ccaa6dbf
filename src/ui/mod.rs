//! UI module providing the egui menu and the in-view overlay.

pub mod icons;
mod overlay;
mod panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use panel::{CONTROLS, fps_label, selection_label};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (panel::menu_panel, overlay::crosshair_overlay)
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Global UI state.
#[derive(Resource, Default, Clone, Debug)]
pub struct UiState {
    /// Whether the menu panel is shown. While it is open the cursor is free
    /// and camera input is suspended.
    pub menu_open: bool,
}
