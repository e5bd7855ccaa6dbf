//! Property-based tests for body kinematics using proptest.

use bevy::prelude::*;
use proptest::prelude::*;

use crate::orrery::{BodyId, CelestialBody, CircularOrbit, Orrery};

fn two_level_system(planet_radius: f32, planet_speed: f32, moon_radius: f32, moon_speed: f32) -> Orrery {
    let mut builder = Orrery::builder();
    builder.add(CelestialBody::star("sun", 12.0, Vec3::ONE, 0.5));
    let planet = builder.add(CelestialBody::planet(
        "planet",
        5.0,
        Vec3::ONE,
        1.0,
        CircularOrbit::new(planet_radius, planet_speed),
    ));
    builder.add(CelestialBody::satellite(
        "moon",
        planet,
        1.0,
        Vec3::ONE,
        3.0,
        CircularOrbit::new(moon_radius, moon_speed),
    ));
    builder.build().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every orbiting body stays on its circle, for any step sequence.
    #[test]
    fn prop_bodies_stay_on_their_circles(
        planet_radius in 10.0f32..500.0,
        planet_speed in -3.0f32..3.0,
        moon_radius in 1.0f32..30.0,
        moon_speed in -10.0f32..10.0,
        steps in prop::collection::vec(0.0f32..0.5, 1..200),
    ) {
        let mut orrery = two_level_system(planet_radius, planet_speed, moon_radius, moon_speed);

        for dt in steps {
            orrery.update(dt);

            for (id, body) in orrery.iter() {
                let Some(center) = orrery.orbit_center(id) else {
                    continue;
                };
                let radius = body.kind.orbit().unwrap().radius;
                let distance = body.position.distance(center);
                prop_assert!(
                    (distance - radius).abs() <= radius * 1e-4 + 1e-3,
                    "{} drifted: distance {} vs radius {}", body.name, distance, radius
                );
                prop_assert!((body.position.y - center.y).abs() < 1e-3);
            }
        }
    }

    /// Spin accumulates monotonically for positive rotation speed.
    #[test]
    fn prop_rotation_angle_non_decreasing(
        steps in prop::collection::vec(0.0f32..1.0, 1..300),
    ) {
        let mut orrery = two_level_system(100.0, 1.0, 15.0, 5.0);
        let mut previous: Vec<f32> = orrery.bodies().iter().map(|b| b.rotation_angle).collect();

        for dt in steps {
            orrery.update(dt);
            for (body, prev) in orrery.bodies().iter().zip(previous.iter_mut()) {
                prop_assert!(body.rotation_angle >= *prev);
                *prev = body.rotation_angle;
            }
        }
    }

    /// The star never leaves the origin.
    #[test]
    fn prop_star_never_translates(
        steps in prop::collection::vec(0.0f32..2.0, 1..100),
    ) {
        let mut orrery = two_level_system(100.0, 1.0, 15.0, 5.0);
        for dt in steps {
            orrery.update(dt);
            prop_assert_eq!(orrery.get(BodyId(0)).unwrap().position, Vec3::ZERO);
        }
    }
}
