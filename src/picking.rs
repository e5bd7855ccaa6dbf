//! Ray picking of celestial bodies.
//!
//! A screen point is unprojected through the inverse projection and inverse
//! view matrices into a world-space ray from the camera. Each body is tested
//! as a sphere of its display radius and the nearest hit in front of the
//! camera wins.

use bevy::prelude::*;

use crate::camera::FlyCamera;
use crate::orrery::{BodyId, Orrery};

/// Picking always happens at the view center, where the crosshair is drawn.
pub const PICK_POINT_NDC: Vec2 = Vec2::ZERO;

/// A world-space ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Nearest body hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    /// Distance along the ray to the entry point.
    pub distance: f32,
}

/// Ray through `ndc` (normalized device coordinates, y up) for `camera`
/// rendered at `aspect` (width / height).
pub fn screen_ray(camera: &FlyCamera, ndc: Vec2, aspect: f32) -> PickRay {
    let clip = Vec4::new(ndc.x, ndc.y, -1.0, 1.0);

    let eye = camera.projection_matrix(aspect).inverse() * clip;
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

    let world = camera.view_matrix().inverse() * eye;

    PickRay {
        origin: camera.position,
        direction: world.truncate().normalize(),
    }
}

/// Distance along `ray` to the first intersection with a sphere, if any lies
/// in front of the origin.
///
/// A tangent ray (zero discriminant) does not count as a hit. When the origin
/// is inside the sphere the exit point is returned.
pub fn ray_sphere(ray: &PickRay, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant <= 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / (2.0 * a);
    let far = (-b + sqrt_d) / (2.0 * a);

    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Nearest body hit by `ray`.
pub fn pick_nearest(ray: &PickRay, orrery: &Orrery) -> Option<PickHit> {
    orrery
        .iter()
        .filter_map(|(id, body)| {
            ray_sphere(ray, body.position, body.display_radius).map(|distance| PickHit {
                body: id,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Pick at the view center.
pub fn pick_at_center(camera: &FlyCamera, aspect: f32, orrery: &Orrery) -> Option<PickHit> {
    let ray = screen_ray(camera, PICK_POINT_NDC, aspect);
    pick_nearest(&ray, orrery)
}
