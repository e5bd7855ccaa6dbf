//! Celestial body rendering and spawning.
//!
//! Every body shares one unit sphere mesh and owns its material, so the
//! selection glow can be changed per body. The star is unlit with an HDR
//! color that feeds the bloom; the other bodies are lit by a point light
//! that sits on the star. Bodies with a night texture get a
//! [`NightSideMaterial`] instead of a plain `StandardMaterial`.

use bevy::prelude::*;

use crate::camera::FAR_PLANE;
use crate::geometry::{self, SPHERE_RINGS, SPHERE_SECTORS};
use crate::orrery::{BodyId, CelestialBody, Orrery};
use crate::render::night_lights::{NightLights, NightSideMaterial};
use crate::render::rings::spawn_ring;
use crate::render::textures::{
    ring_fallback_image, PendingTexture, PendingTextures, RingFallbackImage, TextureFallback,
};
use crate::selection::Selection;
use crate::types::FrameSet;

/// HDR multiplier on the star's color; values above 1 bloom.
pub const STAR_INTENSITY: f32 = 4.0;

/// Peak emissive strength of the selection glow.
pub const SELECTION_GLOW_STRENGTH: f32 = 1.5;

/// Angular frequency of the selection pulse, radians per second.
pub const SELECTION_PULSE_RATE: f32 = 3.0;

/// Luminous power of the star's point light in lumens.
const STAR_LIGHT_INTENSITY: f32 = 2.0e8;

/// Links a render entity to its body in the [`Orrery`].
#[derive(Component, Clone, Copy, Debug)]
pub struct BodyVisual {
    pub id: BodyId,
}

/// Marker for the point light placed on the star.
#[derive(Component)]
pub struct StarLight;

/// A material a body sphere can carry.
pub trait BodyMaterial: Material {
    /// The standard material holding color, texture and emission.
    fn base_mut(&mut self) -> &mut StandardMaterial;

    /// Turn off the night-side layer, if there is one.
    fn clear_night_lights(&mut self) {}
}

impl BodyMaterial for StandardMaterial {
    fn base_mut(&mut self) -> &mut StandardMaterial {
        self
    }
}

/// Plugin spawning body meshes and keeping them in sync with the orrery.
pub struct BodyRenderPlugin;

impl Plugin for BodyRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_bodies, spawn_star_light))
            .add_systems(
                Update,
                (
                    sync_body_transforms,
                    sync_star_light,
                    pulse_selected_body::<StandardMaterial>,
                    pulse_selected_body::<NightSideMaterial>,
                )
                    .in_set(FrameSet::Sync),
            );
    }
}

/// Selection glow factor at time `t` seconds, oscillating in `[0, 1]`.
pub fn selection_glow(t: f32) -> f32 {
    0.5 + 0.5 * (SELECTION_PULSE_RATE * t).sin()
}

/// Render transform for a body: translated to its position, spun about Y
/// and scaled from the unit sphere to its display radius.
pub fn body_transform(body: &CelestialBody) -> Transform {
    Transform::from_translation(body.position)
        .with_rotation(Quat::from_rotation_y(body.rotation_angle))
        .with_scale(Vec3::splat(body.display_radius))
}

fn linear_color(color: Vec3) -> LinearRgba {
    LinearRgba::rgb(color.x, color.y, color.z)
}

/// Material for a body before any texture is resolved.
fn body_material(body: &CelestialBody, texture: Option<Handle<Image>>) -> StandardMaterial {
    if body.is_star() {
        StandardMaterial {
            base_color: Color::LinearRgba(linear_color(body.color) * STAR_INTENSITY),
            base_color_texture: texture,
            unlit: true,
            ..default()
        }
    } else {
        StandardMaterial {
            base_color: Color::LinearRgba(linear_color(body.color)),
            base_color_texture: texture,
            perceptual_roughness: 0.9,
            reflectance: 0.1,
            ..default()
        }
    }
}

/// Night-side material for `body` over its day material.
fn night_side_material(
    body: &CelestialBody,
    day_texture: Option<Handle<Image>>,
    night_texture: Handle<Image>,
    light_position: Vec3,
) -> NightSideMaterial {
    NightSideMaterial {
        base: body_material(body, day_texture),
        extension: NightLights::new(night_texture, light_position),
    }
}

/// Spawn one sphere per body, with ring children where defined.
fn spawn_bodies(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut night_materials: ResMut<Assets<NightSideMaterial>>,
    mut images: ResMut<Assets<Image>>,
    orrery: Res<Orrery>,
) {
    let sphere = meshes.add(geometry::sphere(SPHERE_RINGS, SPHERE_SECTORS).into_mesh());
    let ring_fallback = images.add(ring_fallback_image());
    commands.insert_resource(RingFallbackImage(ring_fallback.clone()));

    let mut textured = 0;
    for (id, body) in orrery.iter() {
        let mut pending = Vec::new();
        let day_texture = body.texture.map(|path| {
            let handle = asset_server.load::<Image>(path);
            pending.push(PendingTexture {
                path,
                handle: handle.clone(),
                fallback: TextureFallback::FlatColor,
            });
            handle
        });
        if day_texture.is_some() {
            textured += 1;
        }

        let mut entity = commands.spawn((
            Mesh3d(sphere.clone()),
            body_transform(body),
            BodyVisual { id },
            Name::new(body.name.clone()),
        ));

        match body.night_texture {
            Some(path) => {
                let night_texture = asset_server.load::<Image>(path);
                pending.push(PendingTexture {
                    path,
                    handle: night_texture.clone(),
                    fallback: TextureFallback::NoNightLights,
                });
                let material = night_side_material(
                    body,
                    day_texture,
                    night_texture,
                    orrery.light_position(),
                );
                entity.insert(MeshMaterial3d(night_materials.add(material)));
                debug!("{} shows night lights from {}", body.name, path);
            }
            None => {
                entity.insert(MeshMaterial3d(materials.add(body_material(body, day_texture))));
            }
        }

        if !pending.is_empty() {
            entity.insert(PendingTextures(pending));
        }
        let parent = entity.id();

        if let Some(ring) = &body.ring {
            spawn_ring(
                &mut commands,
                parent,
                ring,
                &asset_server,
                &mut meshes,
                &mut materials,
                &ring_fallback,
            );
        }
    }

    info!(
        "Spawned {} celestial bodies ({} textured)",
        orrery.len(),
        textured
    );
}

/// Spawn the point light that illuminates the planets.
fn spawn_star_light(mut commands: Commands, orrery: Res<Orrery>) {
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: STAR_LIGHT_INTENSITY,
            range: FAR_PLANE,
            radius: 1.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(orrery.light_position()),
        StarLight,
    ));
}

/// Copy positions and spin from the orrery onto the body entities.
fn sync_body_transforms(orrery: Res<Orrery>, mut bodies: Query<(&BodyVisual, &mut Transform)>) {
    for (visual, mut transform) in bodies.iter_mut() {
        let Some(body) = orrery.get(visual.id) else {
            continue;
        };
        *transform = body_transform(body);
    }
}

fn sync_star_light(orrery: Res<Orrery>, mut lights: Query<&mut Transform, With<StarLight>>) {
    for mut transform in lights.iter_mut() {
        transform.translation = orrery.light_position();
    }
}

/// Pulse the selected body's emissive glow and clear it from the body that
/// was selected before. Runs once per body material type.
fn pulse_selected_body<M: BodyMaterial>(
    selection: Res<Selection>,
    orrery: Res<Orrery>,
    time: Res<Time>,
    bodies: Query<(&BodyVisual, &MeshMaterial3d<M>)>,
    mut materials: ResMut<Assets<M>>,
    mut glowing: Local<Option<BodyId>>,
) {
    let selected = selection.body();

    if *glowing != selected {
        if let Some(previous) = *glowing {
            for (visual, material) in bodies.iter() {
                if visual.id != previous {
                    continue;
                }
                if let Some(material) = materials.get_mut(&material.0) {
                    material.base_mut().emissive = LinearRgba::BLACK;
                }
            }
        }
        *glowing = selected;
    }

    let Some(id) = selected else {
        return;
    };
    let Some(body) = orrery.get(id) else {
        return;
    };
    if body.is_star() {
        return;
    }

    let glow = selection_glow(time.elapsed_secs()) * SELECTION_GLOW_STRENGTH;
    for (visual, material) in bodies.iter() {
        if visual.id != id {
            continue;
        }
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_mut().emissive = linear_color(body.color) * glow;
        }
    }
}
