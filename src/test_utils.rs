//! Test utilities: small orreries and a headless Bevy app.

use bevy::prelude::*;

use crate::orrery::{BodyId, CelestialBody, CircularOrbit, Orrery};

/// Fixtures for creating test orreries.
pub mod fixtures {
    use super::*;

    /// Sun at the origin and one planet on a circle of `radius` at
    /// `angular_speed` rad/s. Returns the planet's id.
    pub fn sun_and_planet(radius: f32, angular_speed: f32) -> (Orrery, BodyId) {
        let mut builder = Orrery::builder();
        builder.add(CelestialBody::star("sun", 12.0, Vec3::new(1.0, 1.0, 0.0), 0.5));
        let planet = builder.add(CelestialBody::planet(
            "planet",
            5.0,
            Vec3::new(0.2, 0.4, 0.8),
            1.0,
            CircularOrbit::new(radius, angular_speed),
        ));
        (builder.build().expect("valid fixture"), planet)
    }

    /// Sun, an earth-like planet at radius 100 and a moon at radius 15
    /// around it. Returns `(orrery, planet, moon)`.
    pub fn planet_with_moon() -> (Orrery, BodyId, BodyId) {
        let mut builder = Orrery::builder();
        builder.add(CelestialBody::star("sun", 12.0, Vec3::new(1.0, 1.0, 0.0), 0.5));
        let planet = builder.add(CelestialBody::planet(
            "earth",
            5.5,
            Vec3::new(0.2, 0.4, 0.8),
            1.2,
            CircularOrbit::new(100.0, 1.3),
        ));
        let moon = builder.add(CelestialBody::satellite(
            "moon",
            planet,
            1.5,
            Vec3::new(0.7, 0.7, 0.7),
            15.0,
            CircularOrbit::new(15.0, 5.0),
        ));
        (builder.build().expect("valid fixture"), planet, moon)
    }

    /// Bodies at fixed points (zero angular speed) along the -Z axis, for
    /// picking tests. Each entry is `(distance, display_radius)`.
    pub fn bodies_on_negative_z(entries: &[(f32, f32)]) -> Orrery {
        let mut builder = Orrery::builder();
        for (i, &(distance, display_radius)) in entries.iter().enumerate() {
            let mut orbit = CircularOrbit::new(distance, 0.0);
            // Phase 3π/2 puts the body on -Z
            orbit.angle = 1.5 * std::f32::consts::PI;
            builder.add(CelestialBody::planet(
                &format!("body{i}"),
                display_radius,
                Vec3::ONE,
                0.0,
                orbit,
            ));
        }
        builder.build().expect("valid fixture")
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bodies_on_negative_z_are_placed_on_axis() {
        let orrery = fixtures::bodies_on_negative_z(&[(50.0, 2.0), (120.0, 4.0)]);
        let first = orrery.get(BodyId(0)).unwrap().position;
        assert_relative_eq!(first.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(first.z, -50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_moon_fixture_starts_beside_planet() {
        let (orrery, planet, moon) = fixtures::planet_with_moon();
        let offset = orrery.get(moon).unwrap().position - orrery.get(planet).unwrap().position;
        assert_relative_eq!(offset.x, 15.0, epsilon = 1e-4);
    }
}
