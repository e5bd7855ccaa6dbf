//! Literal solar system used by the app.
//!
//! Distances and display radii are in scene units on a miniature scale chosen
//! for visibility, not physical proportion. Masses and radii are SI values.

use bevy::prelude::*;

use super::{CelestialBody, CircularOrbit, Orrery, OrreryError, RingSpec};

/// Saturn's ring, relative to its display radius.
pub const SATURN_RING_INNER: f32 = 1.2;
pub const SATURN_RING_OUTER: f32 = 2.2;

/// Build the sun, eight planets and the moon.
pub fn solar_system() -> Result<Orrery, OrreryError> {
    let mut builder = Orrery::builder();

    builder.add(
        CelestialBody::star("sun", 12.0, Vec3::new(1.0, 1.0, 0.0), 0.5)
            .with_physical(1.989e30, 6.96e8)
            .with_texture("textures/sun.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "mercury",
            3.0,
            Vec3::new(0.7, 0.7, 0.7),
            1.0,
            CircularOrbit::new(40.0, 2.0),
        )
        .with_physical(3.285e23, 2.4397e6)
        .with_texture("textures/mercury.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "venus",
            5.0,
            Vec3::new(1.0, 0.8, 0.6),
            0.8,
            CircularOrbit::new(70.0, 1.6),
        )
        .with_physical(4.867e24, 6.0518e6)
        .with_texture("textures/venus.jpg"),
    );

    let earth = builder.add(
        CelestialBody::planet(
            "earth",
            5.5,
            Vec3::new(0.2, 0.4, 0.8),
            1.2,
            CircularOrbit::new(100.0, 1.3),
        )
        .with_physical(5.972e24, 6.371e6)
        .with_texture("textures/earth.jpg")
        .with_night_texture("textures/earth_night.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "mars",
            4.0,
            Vec3::new(0.9, 0.3, 0.1),
            1.1,
            CircularOrbit::new(135.0, 1.0),
        )
        .with_physical(6.39e23, 3.3895e6)
        .with_texture("textures/mars.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "jupiter",
            9.0,
            Vec3::new(0.8, 0.7, 0.6),
            1.5,
            CircularOrbit::new(200.0, 0.7),
        )
        .with_physical(1.898e27, 6.9911e7)
        .with_texture("textures/jupiter.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "saturn",
            8.0,
            Vec3::new(0.9, 0.8, 0.6),
            1.3,
            CircularOrbit::new(280.0, 0.5),
        )
        .with_physical(5.683e26, 5.8232e7)
        .with_texture("textures/saturn.jpg")
        .with_ring(RingSpec {
            inner: SATURN_RING_INNER,
            outer: SATURN_RING_OUTER,
            texture: Some("textures/saturn_ring.png"),
        }),
    );

    builder.add(
        CelestialBody::planet(
            "uranus",
            6.0,
            Vec3::new(0.5, 0.8, 0.9),
            0.9,
            CircularOrbit::new(360.0, 0.4),
        )
        .with_physical(8.681e25, 2.5362e7)
        .with_texture("textures/uranus.jpg"),
    );

    builder.add(
        CelestialBody::planet(
            "neptune",
            6.0,
            Vec3::new(0.3, 0.4, 0.9),
            0.8,
            CircularOrbit::new(440.0, 0.3),
        )
        .with_physical(1.024e26, 2.4622e7)
        .with_texture("textures/neptune.jpg"),
    );

    builder.add(
        CelestialBody::satellite(
            "moon",
            earth,
            1.5,
            Vec3::new(0.7, 0.7, 0.7),
            15.0,
            CircularOrbit::new(15.0, 5.0),
        )
        .with_physical(7.342e22, 1.7371e6)
        .with_texture("textures/moon.jpg"),
    );

    builder.build()
}
