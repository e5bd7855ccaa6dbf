//! Body kinematics for the stylized solar system.
//!
//! Every body follows a closed-form circular path at a fixed angular speed.
//! There is no gravity: mass and true radius are descriptive only. The
//! [`Orrery`] resource owns all bodies and advances them once per frame.

pub mod data;
#[cfg(test)]
mod proptest_orrery;

use std::f32::consts::TAU;

use bevy::prelude::*;

pub use data::solar_system;

/// Index of a body inside the [`Orrery`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Errors raised while assembling an orrery.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OrreryError {
    #[error("satellite {satellite} references unknown parent {parent:?}")]
    UnknownParent { satellite: String, parent: BodyId },

    #[error("satellite {satellite} must be added after its parent {parent}")]
    ParentNotEarlier { satellite: String, parent: String },
}

/// A circular path: fixed radius, fixed angular speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularOrbit {
    /// Distance from the orbit center.
    pub radius: f32,
    /// Radians per scaled second.
    pub angular_speed: f32,
    /// Current phase in radians, kept in `[0, TAU)`.
    pub angle: f32,
}

impl CircularOrbit {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self {
            radius,
            angular_speed,
            angle: 0.0,
        }
    }

    /// Advance the phase, reducing it modulo a full turn.
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(TAU);
    }

    /// Offset from the orbit center at the current phase.
    pub fn offset(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(self.radius * cos, 0.0, self.radius * sin)
    }
}

/// How a body moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitKind {
    /// Fixed at its position; only spins.
    Star,
    /// Circles the origin.
    Planet(CircularOrbit),
    /// Circles another body's current position.
    Satellite { parent: BodyId, orbit: CircularOrbit },
}

impl OrbitKind {
    pub fn orbit(&self) -> Option<&CircularOrbit> {
        match self {
            OrbitKind::Star => None,
            OrbitKind::Planet(orbit) | OrbitKind::Satellite { orbit, .. } => Some(orbit),
        }
    }

    pub fn parent(&self) -> Option<BodyId> {
        match self {
            OrbitKind::Satellite { parent, .. } => Some(*parent),
            _ => None,
        }
    }
}

/// Ring annulus around a body, radii in multiples of the display radius.
#[derive(Clone, Debug, PartialEq)]
pub struct RingSpec {
    pub inner: f32,
    pub outer: f32,
    /// Asset path of the ring texture.
    pub texture: Option<&'static str>,
}

/// A body in the orrery.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    /// Mass in kilograms (descriptive).
    pub mass: f64,
    /// True radius in meters (descriptive).
    pub radius: f64,
    /// Sphere radius in scene units, used for rendering and picking.
    pub display_radius: f32,
    /// Linear RGB shading color, used when no texture is available.
    pub color: Vec3,
    /// Asset path of the surface texture.
    pub texture: Option<&'static str>,
    /// Asset path of the emissive texture shown on the side facing away
    /// from the star.
    pub night_texture: Option<&'static str>,
    pub ring: Option<RingSpec>,
    /// World position in scene units.
    pub position: Vec3,
    /// Spin about the local Y axis in radians, accumulated without reduction.
    pub rotation_angle: f32,
    /// Radians per scaled second.
    pub rotation_speed: f32,
    pub kind: OrbitKind,
}

impl CelestialBody {
    fn new(name: &str, display_radius: f32, color: Vec3, rotation_speed: f32, kind: OrbitKind) -> Self {
        Self {
            name: name.to_string(),
            mass: 0.0,
            radius: 0.0,
            display_radius,
            color,
            texture: None,
            night_texture: None,
            ring: None,
            position: Vec3::ZERO,
            rotation_angle: 0.0,
            rotation_speed,
            kind,
        }
    }

    /// A body fixed at the origin.
    pub fn star(name: &str, display_radius: f32, color: Vec3, rotation_speed: f32) -> Self {
        Self::new(name, display_radius, color, rotation_speed, OrbitKind::Star)
    }

    /// A body circling the origin.
    pub fn planet(
        name: &str,
        display_radius: f32,
        color: Vec3,
        rotation_speed: f32,
        orbit: CircularOrbit,
    ) -> Self {
        Self::new(name, display_radius, color, rotation_speed, OrbitKind::Planet(orbit))
    }

    /// A body circling `parent`.
    pub fn satellite(
        name: &str,
        parent: BodyId,
        display_radius: f32,
        color: Vec3,
        rotation_speed: f32,
        orbit: CircularOrbit,
    ) -> Self {
        Self::new(
            name,
            display_radius,
            color,
            rotation_speed,
            OrbitKind::Satellite { parent, orbit },
        )
    }

    pub fn with_physical(mut self, mass: f64, radius: f64) -> Self {
        self.mass = mass;
        self.radius = radius;
        self
    }

    pub fn with_texture(mut self, path: &'static str) -> Self {
        self.texture = Some(path);
        self
    }

    pub fn with_night_texture(mut self, path: &'static str) -> Self {
        self.night_texture = Some(path);
        self
    }

    pub fn with_ring(mut self, ring: RingSpec) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn is_star(&self) -> bool {
        matches!(self.kind, OrbitKind::Star)
    }

    /// Advance spin and orbital phase by `dt`, placing the body relative to
    /// `center` (ignored for stars).
    pub fn advance(&mut self, dt: f32, center: Vec3) {
        self.rotation_angle += self.rotation_speed * dt;

        match &mut self.kind {
            OrbitKind::Star => {}
            OrbitKind::Planet(orbit) | OrbitKind::Satellite { orbit, .. } => {
                orbit.advance(dt);
                self.position = center + orbit.offset();
            }
        }
    }
}

/// Collects bodies and validates parent references.
#[derive(Default)]
pub struct OrreryBuilder {
    bodies: Vec<CelestialBody>,
}

impl OrreryBuilder {
    /// Append a body and return its id.
    pub fn add(&mut self, body: CelestialBody) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    /// Validate the hierarchy and place every body at its initial phase.
    pub fn build(self) -> Result<Orrery, OrreryError> {
        for (index, body) in self.bodies.iter().enumerate() {
            let Some(parent) = body.kind.parent() else {
                continue;
            };
            let Some(parent_body) = self.bodies.get(parent.0) else {
                return Err(OrreryError::UnknownParent {
                    satellite: body.name.clone(),
                    parent,
                });
            };
            if parent.0 >= index {
                return Err(OrreryError::ParentNotEarlier {
                    satellite: body.name.clone(),
                    parent: parent_body.name.clone(),
                });
            }
        }

        let mut orrery = Orrery {
            bodies: self.bodies,
        };
        orrery.update(0.0);
        Ok(orrery)
    }
}

/// Simulation context holding every body.
///
/// Parents always precede their satellites, so a single in-order pass gives
/// each satellite its parent's position for the current frame.
#[derive(Resource, Clone, Debug)]
pub struct Orrery {
    bodies: Vec<CelestialBody>,
}

impl Orrery {
    pub fn builder() -> OrreryBuilder {
        OrreryBuilder::default()
    }

    /// Advance every body by `dt` scaled seconds.
    pub fn update(&mut self, dt: f32) {
        for index in 0..self.bodies.len() {
            let center = match self.bodies[index].kind {
                OrbitKind::Satellite { parent, .. } => self.bodies[parent.0].position,
                _ => Vec3::ZERO,
            };
            self.bodies[index].advance(dt, center);
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate bodies with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Center of a body's orbit: the origin for planets, the parent's
    /// position for satellites, `None` for stars.
    pub fn orbit_center(&self, id: BodyId) -> Option<Vec3> {
        let body = self.get(id)?;
        match body.kind {
            OrbitKind::Star => None,
            OrbitKind::Planet(_) => Some(Vec3::ZERO),
            OrbitKind::Satellite { parent, .. } => self.get(parent).map(|p| p.position),
        }
    }

    /// Position of the first star, used as the light source.
    pub fn light_position(&self) -> Vec3 {
        self.bodies
            .iter()
            .find(|b| b.is_star())
            .map_or(Vec3::ZERO, |b| b.position)
    }
}

/// Plugin logging the loaded bodies at startup.
pub struct OrreryPlugin;

impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, log_bodies);
    }
}

/// Print the loaded bodies once.
fn log_bodies(orrery: Res<Orrery>) {
    info!("Loaded {} celestial bodies", orrery.len());
    for body in orrery.bodies() {
        debug!("  - {} (display radius {})", body.name, body.display_radius);
    }
}
