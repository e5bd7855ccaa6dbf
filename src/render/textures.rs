//! Texture loading with visual fallbacks.
//!
//! Body and ring textures load asynchronously. Until they resolve the
//! owning entity carries [`PendingTextures`]; if one fails the material is
//! patched with its fallback and the failure is logged.

use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::render::bodies::BodyMaterial;

/// Texture failures that are recovered from by substituting a fallback.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TextureError {
    #[error("texture '{path}' failed to load: {reason}")]
    LoadFailed { path: String, reason: String },
}

/// What to show when a texture cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFallback {
    /// Drop the texture and shade with the material's base color.
    FlatColor,
    /// Replace with the procedural ring bands.
    RingBands,
    /// Drop the night-side layer and keep the day shading.
    NoNightLights,
}

/// A texture still being loaded for a material.
#[derive(Clone, Debug)]
pub struct PendingTexture {
    pub path: &'static str,
    pub handle: Handle<Image>,
    pub fallback: TextureFallback,
}

/// Textures of this entity's material that have not resolved yet.
#[derive(Component, Clone, Debug, Default)]
pub struct PendingTextures(pub Vec<PendingTexture>);

impl PendingTextures {
    pub fn single(texture: PendingTexture) -> Self {
        Self(vec![texture])
    }
}

/// Procedural ring texture used when a ring image is missing.
#[derive(Resource, Clone, Debug)]
pub struct RingFallbackImage(pub Handle<Image>);

/// Width of the procedural ring texture; `u` runs inner to outer edge.
pub const RING_FALLBACK_WIDTH: u32 = 256;

const RING_FALLBACK_HEIGHT: u32 = 4;

/// RGBA8 color of the procedural ring at radial coordinate `u` in `[0, 1]`.
///
/// Alternating pale bands with a faint gap near the middle; the alpha fades
/// to zero at both edges.
pub fn ring_band(u: f32) -> [u8; 4] {
    let u = u.clamp(0.0, 1.0);
    let bands = 0.6 + 0.4 * (u * 38.0).sin().abs();
    let gap = if (0.55..0.6).contains(&u) { 0.15 } else { 1.0 };
    let edge = (u * 10.0).min((1.0 - u) * 10.0).min(1.0);
    let alpha = (bands * gap * edge * 0.85).clamp(0.0, 1.0);

    let tone = 0.75 + 0.2 * bands;
    [
        (tone * 230.0) as u8,
        (tone * 210.0) as u8,
        (tone * 170.0) as u8,
        (alpha * 255.0) as u8,
    ]
}

/// Build the procedural ring image.
pub fn ring_fallback_image() -> Image {
    let mut data = Vec::with_capacity((RING_FALLBACK_WIDTH * RING_FALLBACK_HEIGHT * 4) as usize);
    for _ in 0..RING_FALLBACK_HEIGHT {
        for x in 0..RING_FALLBACK_WIDTH {
            let u = x as f32 / (RING_FALLBACK_WIDTH - 1) as f32;
            data.extend_from_slice(&ring_band(u));
        }
    }

    Image::new(
        Extent3d {
            width: RING_FALLBACK_WIDTH,
            height: RING_FALLBACK_HEIGHT,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Patch `material` after one of its textures failed to load.
pub fn apply_fallback<M: BodyMaterial>(
    material: &mut M,
    fallback: TextureFallback,
    ring_bands: Option<&Handle<Image>>,
) {
    match fallback {
        TextureFallback::FlatColor => material.base_mut().base_color_texture = None,
        TextureFallback::RingBands => material.base_mut().base_color_texture = ring_bands.cloned(),
        TextureFallback::NoNightLights => material.clear_night_lights(),
    }
}

fn fallback_note(fallback: TextureFallback) -> &'static str {
    match fallback {
        TextureFallback::FlatColor => "using flat color",
        TextureFallback::RingBands => "using procedural ring",
        TextureFallback::NoNightLights => "night side stays dark",
    }
}

/// Poll pending textures; patch materials whose texture failed.
pub fn resolve_pending_textures<M: BodyMaterial>(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    ring_fallback: Option<Res<RingFallbackImage>>,
    mut pending: Query<(Entity, &mut PendingTextures, &MeshMaterial3d<M>)>,
    mut materials: ResMut<Assets<M>>,
) {
    for (entity, mut textures, material) in pending.iter_mut() {
        textures.0.retain(|texture| match asset_server.load_state(texture.handle.id()) {
            LoadState::Loaded => {
                debug!("Loaded texture {}", texture.path);
                false
            }
            LoadState::Failed(err) => {
                let error = TextureError::LoadFailed {
                    path: texture.path.to_string(),
                    reason: err.to_string(),
                };
                warn!("{error}; {}", fallback_note(texture.fallback));
                if let Some(material) = materials.get_mut(&material.0) {
                    apply_fallback(
                        material,
                        texture.fallback,
                        ring_fallback.as_ref().map(|image| &image.0),
                    );
                }
                false
            }
            LoadState::NotLoaded | LoadState::Loading => true,
        });

        if textures.0.is_empty() {
            commands.entity(entity).remove::<PendingTextures>();
        }
    }
}
