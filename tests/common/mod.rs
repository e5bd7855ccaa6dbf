//! Common test utilities for integration tests.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery_viz::orrery::{BodyId, Orrery, solar_system};
use orrery_viz::time::TimePlugin as OrreryTimePlugin;
use orrery_viz::types::FrameSet;

/// Fixed real-time step fed to every frame.
pub const FRAME_STEP: Duration = Duration::from_millis(50);

/// Headless app with the solar system and the orrery clock.
///
/// Time advances by [`FRAME_STEP`] per update so runs are reproducible.
pub fn headless_orrery_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_STEP))
        .insert_resource(solar_system().expect("literal system is valid"))
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
        .add_plugins(OrreryTimePlugin);
    app
}

/// Id of the body called `name`.
pub fn body_id(orrery: &Orrery, name: &str) -> BodyId {
    orrery
        .iter()
        .find(|(_, body)| body.name == name)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no body named {name}"))
}

/// Position on a circle of `radius` at `angle` radians around `center`.
pub fn on_circle(center: Vec3, radius: f32, angle: f32) -> Vec3 {
    center + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}
