//! Orrery - animated solar system viewer
//!
//! A desktop application showing the sun, planets and moon on circular
//! orbits with a free-fly camera, body picking and HDR bloom.

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery_viz::camera::CameraPlugin;
use orrery_viz::input::InputPlugin;
use orrery_viz::orrery::{OrreryPlugin, solar_system};
use orrery_viz::render::RenderPlugin;
use orrery_viz::time::TimePlugin;
use orrery_viz::types::FrameSet;
use orrery_viz::ui::UiPlugin;

const WINDOW_TITLE: &str = "Orrery";

fn main() -> AppExit {
    let orrery = match solar_system() {
        Ok(orrery) => orrery,
        Err(err) => {
            eprintln!("failed to build the solar system: {err}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.to_string(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((EguiPlugin::default(), FrameTimeDiagnosticsPlugin::default()))
        // Insert resources before plugins that depend on them
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(orrery)
        .configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Simulate,
                FrameSet::Camera,
                FrameSet::Sync,
            )
                .chain(),
        )
        .add_plugins((
            OrreryPlugin,
            TimePlugin,
            InputPlugin,
            CameraPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run()
}
