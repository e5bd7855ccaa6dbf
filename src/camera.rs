//! Fly camera for viewing the solar system.
//!
//! [`FlyCamera`] holds the position, yaw/pitch and zoom and derives its basis
//! from the angles. Free-fly input moves and turns it; in follow mode it is
//! pulled toward a fixed offset from the selected body and aimed at it.

use bevy::prelude::*;

use crate::orrery::Orrery;
use crate::selection::{CameraMode, Selection};
use crate::types::FrameSet;

#[cfg(test)]
mod proptest_camera;

/// Starting camera position.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 150.0, 400.0);

/// Starting yaw in degrees (looking down -Z).
pub const INITIAL_YAW: f32 = -90.0;

/// Starting pitch in degrees, tilted toward the ecliptic.
pub const INITIAL_PITCH: f32 = -20.0;

/// Pitch limit in degrees.
pub const PITCH_LIMIT: f32 = 89.0;

/// Default vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Narrowest field of view in degrees.
pub const MIN_ZOOM: f32 = 1.0;

/// Widest field of view in degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// Default movement speed in scene units per second.
pub const DEFAULT_SPEED: f32 = 60.0;

/// Range of the speed slider.
pub const MIN_SPEED: f32 = 5.0;
pub const MAX_SPEED: f32 = 400.0;

/// Degrees of rotation per pixel of pointer motion.
pub const MOUSE_SENSITIVITY: f32 = 0.1;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10000.0;

/// Camera placement relative to a followed body: behind and above.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 30.0, 80.0);

/// Exponential blend rate toward the follow position, per second.
pub const FOLLOW_BLEND_RATE: f32 = 5.0;

/// Below this distance the camera does not re-aim at the target.
const MIN_AIM_DISTANCE: f32 = 0.01;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Discrete movement intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Fly camera state.
#[derive(Resource, Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Degrees, 0 = +X, -90 = -Z.
    yaw: f32,
    /// Degrees, clamped to `±PITCH_LIMIT`.
    pitch: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// Scene units per second.
    pub speed: f32,
    /// Degrees per pixel.
    pub sensitivity: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(INITIAL_POSITION, INITIAL_YAW, INITIAL_PITCH)
    }
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: DEFAULT_ZOOM,
            speed: DEFAULT_SPEED,
            sensitivity: MOUSE_SENSITIVITY,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_basis();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Set both angles and re-derive the basis.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Move along the basis by `speed * dt`.
    pub fn process_movement(&mut self, movement: Movement, dt: f32) {
        let step = self.speed * dt;
        self.position += match movement {
            Movement::Forward => self.front * step,
            Movement::Backward => -self.front * step,
            Movement::Left => -self.right * step,
            Movement::Right => self.right * step,
            Movement::Up => Vec3::Y * step,
            Movement::Down => Vec3::NEG_Y * step,
        };
    }

    /// Turn by a pointer delta in pixels. Positive `dy` looks up.
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        let yaw = self.yaw + dx * self.sensitivity;
        let pitch = self.pitch + dy * self.sensitivity;
        // Non-finite deltas would poison the basis permanently
        if yaw.is_finite() && pitch.is_finite() {
            self.set_angles(yaw, pitch);
        } else if pitch.is_infinite() {
            self.set_angles(self.yaw, pitch.signum() * PITCH_LIMIT);
        }
    }

    /// Zoom by scroll lines; positive narrows the field of view.
    pub fn process_scroll(&mut self, lines: f32) {
        if lines.is_finite() {
            self.zoom = (self.zoom - lines).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Pull toward the follow position for `target` and aim at it.
    ///
    /// The blend factor is `min(1, FOLLOW_BLEND_RATE * dt)`, so a long frame
    /// lands exactly on the follow position instead of overshooting.
    pub fn follow(&mut self, target: Vec3, dt: f32) {
        let desired = follow_position(target);
        let blend = (FOLLOW_BLEND_RATE * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(desired, blend);
        self.look_at(target);
    }

    /// Aim exactly at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length() <= MIN_AIM_DISTANCE {
            return;
        }
        let dir = to_target.normalize();
        let yaw = dir.z.atan2(dir.x).to_degrees();
        let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.set_angles(yaw, pitch);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Render transform matching this camera.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_to(self.front, self.up)
    }
}

/// Camera position used while following a body at `target`.
pub fn follow_position(target: Vec3) -> Vec3 {
    target + FOLLOW_OFFSET
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlyCamera>()
            .init_resource::<Selection>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (follow_selected.in_set(FrameSet::Camera), apply_camera.in_set(FrameSet::Sync)),
            );
    }
}

/// Spawn the main camera with a perspective projection.
///
/// Bloom and exposure components are attached by the render pipeline plugin.
fn setup_camera(mut commands: Commands, fly: Res<FlyCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: fly.zoom.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        fly.transform(),
        AmbientLight {
            color: Color::WHITE,
            brightness: 40.0,
            ..default()
        },
        MainCamera,
    ));
}

/// Track the selected body while follow mode is on.
fn follow_selected(
    selection: Res<Selection>,
    orrery: Res<Orrery>,
    time: Res<Time>,
    mut fly: ResMut<FlyCamera>,
) {
    if selection.camera_mode() != CameraMode::Following {
        return;
    }
    let Some(target) = selection.body().and_then(|id| orrery.get(id)) else {
        return;
    };
    fly.follow(target.position, time.delta_secs());
}

/// Copy the fly camera onto the render camera.
fn apply_camera(
    fly: Res<FlyCamera>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    *transform = fly.transform();

    if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = fly.zoom.to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_basis_is_orthonormal() {
        let camera = FlyCamera::default();
        assert_relative_eq!(camera.front().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.up().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().dot(camera.right()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().dot(camera.up()), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_minus_ninety_looks_down_negative_z() {
        let camera = FlyCamera::new(Vec3::ZERO, -90.0, 0.0);
        assert_relative_eq!(camera.front().z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_movement_scales_with_speed_and_dt() {
        let mut camera = FlyCamera::new(Vec3::ZERO, -90.0, 0.0);
        camera.speed = 10.0;
        camera.process_movement(Movement::Forward, 0.5);
        assert_relative_eq!(camera.position.z, -5.0, epsilon = 1e-5);

        camera.process_movement(Movement::Right, 0.1);
        assert_relative_eq!(camera.position.x, 1.0, epsilon = 1e-5);

        camera.process_movement(Movement::Down, 1.0);
        assert_relative_eq!(camera.position.y, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut camera = FlyCamera::default();
        camera.process_look(0.0, 1.0e6);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.process_look(0.0, -1.0e6);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_look_ignores_nan() {
        let mut camera = FlyCamera::default();
        let before = (camera.yaw(), camera.pitch());
        camera.process_look(f32::NAN, f32::NAN);
        assert_eq!((camera.yaw(), camera.pitch()), before);
        assert!(camera.front().is_finite());
    }

    #[test]
    fn test_scroll_clamps_zoom() {
        let mut camera = FlyCamera::default();
        camera.process_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
        camera.process_scroll(-100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_follow_large_dt_lands_on_offset() {
        let mut camera = FlyCamera::default();
        let target = Vec3::new(100.0, 0.0, 0.0);
        camera.follow(target, 10.0);
        assert_relative_eq!(camera.position.x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(camera.position.y, 30.0, epsilon = 1e-4);
        assert_relative_eq!(camera.position.z, 80.0, epsilon = 1e-4);
    }

    #[test]
    fn test_follow_small_dt_blends_partially() {
        let mut camera = FlyCamera::new(Vec3::ZERO, -90.0, 0.0);
        let target = Vec3::new(100.0, 0.0, 0.0);
        camera.follow(target, 0.1);
        // Blend factor 0.5 toward (100, 30, 80)
        assert_relative_eq!(camera.position.x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(camera.position.y, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_follow_aims_at_target() {
        let mut camera = FlyCamera::default();
        let target = Vec3::new(-40.0, 0.0, 25.0);
        camera.follow(target, 0.05);
        let expected = (target - camera.position).normalize();
        assert_relative_eq!(camera.front().dot(expected), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_skips_coincident_target() {
        let mut camera = FlyCamera::new(Vec3::ONE, 10.0, 5.0);
        camera.look_at(Vec3::ONE);
        assert_eq!(camera.yaw(), 10.0);
        assert_eq!(camera.pitch(), 5.0);
    }

    #[test]
    fn test_transform_faces_front() {
        let camera = FlyCamera::default();
        let transform = camera.transform();
        let forward: Vec3 = transform.forward().into();
        assert_relative_eq!(forward.dot(camera.front()), 1.0, epsilon = 1e-5);
    }
}
