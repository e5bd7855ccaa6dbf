//! Planetary rings.
//!
//! A ring is a child of its body, so it inherits the body's position, spin
//! and display-radius scale; the annulus is built in multiples of that
//! radius. It renders double-sided with alpha blending.

use bevy::prelude::*;

use crate::geometry::{self, RING_SEGMENTS};
use crate::orrery::RingSpec;
use crate::render::textures::{PendingTexture, PendingTextures, TextureFallback};

/// Marker for ring entities.
#[derive(Component)]
pub struct PlanetRing;

/// Alpha-blended, double-sided ring material.
pub fn ring_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 1.0,
        reflectance: 0.0,
        ..default()
    }
}

/// Spawn the ring described by `shape` as a child of `parent`.
///
/// Without a texture path the procedural bands are used directly.
pub fn spawn_ring(
    commands: &mut Commands,
    parent: Entity,
    shape: &RingSpec,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    fallback: &Handle<Image>,
) {
    let mesh = meshes.add(geometry::ring(shape.inner, shape.outer, RING_SEGMENTS).into_mesh());

    let texture = shape
        .texture
        .map(|path| (path, asset_server.load::<Image>(path)));
    let image = texture
        .as_ref()
        .map_or_else(|| fallback.clone(), |(_, handle)| handle.clone());

    let mut entity = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(materials.add(ring_material(image))),
        Transform::IDENTITY,
        PlanetRing,
        ChildOf(parent),
    ));

    if let Some((path, handle)) = texture {
        entity.insert(PendingTextures::single(PendingTexture {
            path,
            handle,
            fallback: TextureFallback::RingBands,
        }));
    }

    debug!(
        "Spawned ring {:.1}..{:.1} ({})",
        shape.inner,
        shape.outer,
        shape.texture.unwrap_or("procedural")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_material_blends_both_sides() {
        let material = ring_material(Handle::default());
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
        assert!(material.base_color_texture.is_some());
    }
}
