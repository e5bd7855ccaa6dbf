//! Headless Bevy integration tests.
//!
//! These tests drive the orrery clock through real app updates without a GPU.

mod common;

use approx::assert_relative_eq;
use orrery_viz::orrery::Orrery;
use orrery_viz::types::{DEFAULT_TIME_SCALE, SimulationClock};

use common::{body_id, headless_orrery_app, on_circle};

#[test]
fn test_clock_initializes_with_default_scale() {
    let mut app = headless_orrery_app();
    app.update();

    let clock = app.world().resource::<SimulationClock>();
    assert_eq!(clock.scale, DEFAULT_TIME_SCALE);
    assert!(!clock.paused);
}

#[test]
fn test_planet_follows_elapsed_scaled_time() {
    let mut app = headless_orrery_app();
    for _ in 0..20 {
        app.update();
    }

    let elapsed = app.world().resource::<SimulationClock>().elapsed as f32;
    assert!(elapsed > 0.0, "clock should have advanced");

    let orrery = app.world().resource::<Orrery>();
    let earth = orrery.get(body_id(orrery, "earth")).unwrap();
    let orbit = earth.kind.orbit().unwrap();

    let expected = on_circle(bevy::prelude::Vec3::ZERO, 100.0, 1.3 * elapsed);
    assert_relative_eq!(earth.position.x, expected.x, epsilon = 1e-2);
    assert_relative_eq!(earth.position.z, expected.z, epsilon = 1e-2);
    assert!(orbit.angle >= 0.0 && orbit.angle < std::f32::consts::TAU);
}

#[test]
fn test_paused_clock_freezes_bodies() {
    let mut app = headless_orrery_app();
    app.update();
    app.world_mut().resource_mut::<SimulationClock>().paused = true;

    let before: Vec<_> = app
        .world()
        .resource::<Orrery>()
        .bodies()
        .iter()
        .map(|b| (b.position, b.rotation_angle))
        .collect();
    let elapsed_before = app.world().resource::<SimulationClock>().elapsed;

    for _ in 0..10 {
        app.update();
    }

    let after: Vec<_> = app
        .world()
        .resource::<Orrery>()
        .bodies()
        .iter()
        .map(|b| (b.position, b.rotation_angle))
        .collect();
    assert_eq!(before, after);
    assert_eq!(app.world().resource::<SimulationClock>().elapsed, elapsed_before);
}

#[test]
fn test_zero_scale_freezes_bodies() {
    let mut app = headless_orrery_app();
    app.world_mut().resource_mut::<SimulationClock>().scale = 0.0;
    let start = app.world().resource::<Orrery>().bodies()[1].position;

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(app.world().resource::<Orrery>().bodies()[1].position, start);
}

#[test]
fn test_moon_tracks_earth_every_frame() {
    let mut app = headless_orrery_app();
    for _ in 0..30 {
        app.update();
        let orrery = app.world().resource::<Orrery>();
        let earth = orrery.get(body_id(orrery, "earth")).unwrap().position;
        let moon = orrery.get(body_id(orrery, "moon")).unwrap().position;
        assert_relative_eq!(earth.distance(moon), 15.0, epsilon = 1e-3);
        assert_relative_eq!(moon.y, 0.0);
    }
}

#[test]
fn test_sun_stays_at_origin_while_spinning() {
    let mut app = headless_orrery_app();
    for _ in 0..10 {
        app.update();
    }

    let orrery = app.world().resource::<Orrery>();
    let sun = &orrery.bodies()[0];
    assert_eq!(sun.position, bevy::prelude::Vec3::ZERO);
    assert!(sun.rotation_angle > 0.0);
}

#[test]
fn test_frame_plan_tracks_settings() {
    use orrery_viz::render::pipeline::{PipelinePlugin, RenderPass};
    use orrery_viz::render::{FramePlan, PostProcessSettings};
    use orrery_viz::types::SceneSettings;

    let mut app = headless_orrery_app();
    app.init_resource::<SceneSettings>().add_plugins(PipelinePlugin);
    app.update();

    let plan = app.world().resource::<FramePlan>().clone();
    assert_eq!(plan.blur_steps().count(), 4);
    assert!(matches!(
        plan.passes()[0],
        RenderPass::Scene {
            orbit_lines: true,
            rings_blended: true,
            ..
        }
    ));

    app.world_mut().resource_mut::<SceneSettings>().show_orbits = false;
    app.world_mut().resource_mut::<PostProcessSettings>().blur_passes = 6;
    app.update();

    let plan = app.world().resource::<FramePlan>();
    assert_eq!(plan.blur_steps().count(), 6);
    assert!(matches!(
        plan.passes()[0],
        RenderPass::Scene {
            orbit_lines: false,
            ..
        }
    ));
}
