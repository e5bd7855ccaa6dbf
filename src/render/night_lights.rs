//! City lights on the side of a body facing away from the star.
//!
//! Bodies with a night texture render with a `StandardMaterial` extended by
//! [`NightLights`]: the fragment shader adds the night texture to the
//! emission, weighted by how far the surface has turned from the light.

use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use crate::orrery::Orrery;
use crate::render::bodies::BodyMaterial;
use crate::types::FrameSet;

const SHADER_ASSET_PATH: &str = "shaders/night_lights.wgsl";

/// Linear multiplier on the night texture.
pub const NIGHT_LIGHTS_STRENGTH: f32 = 1.5;

/// Width of the day/night blend in units of `dot(normal, to_light)`.
pub const TERMINATOR_WIDTH: f32 = 0.2;

/// Uniform block read by the night-lights shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, ShaderType, Reflect)]
pub struct NightLightsParams {
    /// World position of the star.
    pub light_position: Vec3,
    /// Multiplier on the night texture; zero disables the layer.
    pub strength: f32,
}

/// Night-side emissive layer on top of a `StandardMaterial`.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone, Default)]
pub struct NightLights {
    #[uniform(100)]
    pub params: NightLightsParams,
    #[texture(101)]
    #[sampler(102)]
    pub texture: Option<Handle<Image>>,
}

impl NightLights {
    pub fn new(texture: Handle<Image>, light_position: Vec3) -> Self {
        Self {
            params: NightLightsParams {
                light_position,
                strength: NIGHT_LIGHTS_STRENGTH,
            },
            texture: Some(texture),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.texture.is_some() && self.params.strength > 0.0
    }

    /// Drop the texture and zero the strength, leaving plain day shading.
    pub fn disable(&mut self) {
        self.texture = None;
        self.params.strength = 0.0;
    }
}

impl MaterialExtension for NightLights {
    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }
}

/// Body material with a night-lights layer.
pub type NightSideMaterial = ExtendedMaterial<StandardMaterial, NightLights>;

impl BodyMaterial for NightSideMaterial {
    fn base_mut(&mut self) -> &mut StandardMaterial {
        &mut self.base
    }

    fn clear_night_lights(&mut self) {
        self.extension.disable();
    }
}

/// Share of the night texture at a surface point with the given normal.
///
/// One facing away from the light, zero facing it, with a smooth blend of
/// [`TERMINATOR_WIDTH`] across the terminator. The shader computes the same
/// weight per fragment.
pub fn night_weight(normal: Vec3, to_light: Vec3) -> f32 {
    let facing = normal.normalize_or_zero().dot(to_light.normalize_or_zero());
    let half = TERMINATOR_WIDTH * 0.5;
    let t = ((facing + half) / TERMINATOR_WIDTH).clamp(0.0, 1.0);
    1.0 - t * t * (3.0 - 2.0 * t)
}

/// Plugin registering the night-side material.
pub struct NightLightsPlugin;

impl Plugin for NightLightsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<NightSideMaterial>::default())
            .add_systems(Update, sync_night_light_position.in_set(FrameSet::Sync));
    }
}

/// Keep the light position in the uniform on the star.
fn sync_night_light_position(
    orrery: Res<Orrery>,
    bodies: Query<&MeshMaterial3d<NightSideMaterial>>,
    mut materials: ResMut<Assets<NightSideMaterial>>,
) {
    let light = orrery.light_position();
    for handle in bodies.iter() {
        let stale = materials
            .get(&handle.0)
            .is_some_and(|m| m.extension.params.light_position != light);
        if !stale {
            continue;
        }
        if let Some(material) = materials.get_mut(&handle.0) {
            material.extension.params.light_position = light;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_night_weight_by_side() {
        let to_light = Vec3::X;
        assert_relative_eq!(night_weight(Vec3::X, to_light), 0.0);
        assert_relative_eq!(night_weight(-Vec3::X, to_light), 1.0);
        assert_relative_eq!(night_weight(Vec3::Y, to_light), 0.5);
    }

    #[test]
    fn test_night_weight_blends_across_terminator() {
        let to_light = Vec3::Z;
        let mut previous = night_weight(Vec3::new(0.0, 1.0, -0.2), to_light);
        for i in 1..=8 {
            let z = -0.2 + 0.05 * i as f32;
            let weight = night_weight(Vec3::new(0.0, 1.0, z), to_light);
            assert!(weight <= previous + 1e-6);
            previous = weight;
        }
        assert!(previous < 0.5);
    }

    #[test]
    fn test_night_weight_ignores_normal_length() {
        let to_light = Vec3::new(1.0, 0.0, 1.0);
        let normal = Vec3::new(-0.3, 0.2, 0.1);
        assert_relative_eq!(
            night_weight(normal, to_light),
            night_weight(normal * 40.0, to_light * 0.01),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_disable_clears_layer() {
        let mut lights = NightLights::new(Handle::default(), Vec3::ZERO);
        assert!(lights.is_enabled());

        lights.disable();
        assert!(!lights.is_enabled());
        assert!(lights.texture.is_none());
        assert_eq!(lights.params.strength, 0.0);
    }
}
