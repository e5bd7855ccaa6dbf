//! Rendering systems for the orrery.
//!
//! Spawns the starfield, orbit lines, body spheres and rings, keeps their
//! transforms in sync with the simulation and configures the HDR bloom
//! pipeline on the main camera. Earth's night side shows city lights.

mod background;
pub mod bodies;
pub mod night_lights;
mod orbits;
pub mod pipeline;
pub mod rings;
pub mod textures;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::BodyRenderPlugin;
use self::night_lights::{NightLightsPlugin, NightSideMaterial};
use self::orbits::OrbitPathPlugin;
use self::pipeline::PipelinePlugin;
use self::textures::resolve_pending_textures;
use crate::types::SceneSettings;

pub use self::bodies::BodyVisual;
pub use self::orbits::OrbitLine;
pub use self::pipeline::{FramePlan, PostProcessSettings};
pub use self::textures::TextureError;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .add_plugins((
                BackgroundPlugin,
                OrbitPathPlugin,
                BodyRenderPlugin,
                NightLightsPlugin,
                PipelinePlugin,
            ))
            .add_systems(
                Update,
                (
                    resolve_pending_textures::<StandardMaterial>,
                    resolve_pending_textures::<NightSideMaterial>,
                ),
            );
    }
}
