//! HDR bloom pipeline: pass order and camera configuration.
//!
//! A frame renders in a fixed order:
//! 1. scene into an HDR target (color plus a bright copy),
//! 2. bright-pass extraction,
//! 3. ping-pong separable blur over the bright copy,
//! 4. composite of scene and blurred bloom with exposure tonemapping,
//! 5. UI on top, never blurred or tonemapped.
//!
//! [`FramePlan`] spells out that sequence for the current settings. The
//! passes themselves are executed by Bevy's HDR camera, `Bloom` and
//! tonemapping nodes; egui draws after them. Bloom runs one downsample and
//! one upsample per blur iteration after its bright-pass prefilter, and
//! exposure is a color grading offset applied in the tonemapping pass, so it
//! scales lit and unlit geometry and the bloom alike.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode, BloomPrefilter};
use bevy::prelude::*;
use bevy::render::view::{ColorGrading, ColorGradingGlobal};

use crate::camera::MainCamera;
use crate::orrery::Orrery;
use crate::types::SceneSettings;

/// Default bloom blend factor.
pub const DEFAULT_BLOOM_STRENGTH: f32 = 0.3;

/// Default linear exposure.
pub const DEFAULT_EXPOSURE: f32 = 1.0;

/// Default number of blur iterations.
pub const DEFAULT_BLUR_PASSES: u32 = 4;

/// Upper bound on blur iterations.
pub const MAX_BLUR_PASSES: u32 = 8;

/// HDR luminance above which pixels feed the bloom.
pub const BRIGHT_THRESHOLD: f32 = 1.0;

/// Composite parameters, editable from the menu.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PostProcessSettings {
    /// Linear weight of the blurred bloom added to the scene.
    pub bloom_strength: f32,
    /// Linear exposure applied before tonemapping.
    pub exposure: f32,
    /// Ping-pong blur iterations.
    pub blur_passes: u32,
}

impl Default for PostProcessSettings {
    fn default() -> Self {
        Self {
            bloom_strength: DEFAULT_BLOOM_STRENGTH,
            exposure: DEFAULT_EXPOSURE,
            blur_passes: DEFAULT_BLUR_PASSES,
        }
    }
}

impl PostProcessSettings {
    /// Blur iterations clamped to the supported range.
    pub fn effective_blur_passes(&self) -> u32 {
        self.blur_passes.clamp(1, MAX_BLUR_PASSES)
    }

    /// Bloom texture size. Bevy allocates `log2(size) - 1` mip levels and
    /// blurs between each adjacent pair, so this yields exactly one
    /// downsample/upsample pair per blur iteration.
    pub fn mip_dimension(&self) -> u32 {
        1 << (self.effective_blur_passes() + 2)
    }

    /// Bevy bloom configured for additive compositing of bright areas.
    pub fn bloom(&self) -> Bloom {
        Bloom {
            intensity: self.bloom_strength.max(0.0),
            composite_mode: BloomCompositeMode::Additive,
            prefilter: BloomPrefilter {
                threshold: BRIGHT_THRESHOLD,
                threshold_softness: 0.2,
            },
            max_mip_dimension: self.mip_dimension(),
            ..Bloom::NATURAL
        }
    }

    /// Exposure offset in stops for the linear exposure factor. Doubling the
    /// exposure adds one stop.
    pub fn exposure_stops(&self) -> f32 {
        self.exposure.max(1e-3).log2()
    }

    /// Color grading that applies the exposure to the whole HDR image just
    /// before tonemapping.
    pub fn color_grading(&self) -> ColorGrading {
        ColorGrading {
            global: ColorGradingGlobal {
                exposure: self.exposure_stops(),
                ..default()
            },
            ..default()
        }
    }
}

/// Orientation of a one-dimensional blur pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurDirection {
    Horizontal,
    Vertical,
}

/// Buffer a blur pass reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurSource {
    /// Secondary output of the scene pass.
    Bright,
    /// One of the two ping-pong buffers.
    PingPong(usize),
}

/// One blur iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlurStep {
    pub iteration: u32,
    pub direction: BlurDirection,
    pub source: BlurSource,
    /// Ping-pong buffer written by this step.
    pub target: usize,
}

/// Ping-pong blur iterations: horizontal first, alternating direction and
/// buffers; the first reads the bright output, every later one reads the
/// previous step's target.
pub fn blur_schedule(passes: u32) -> Vec<BlurStep> {
    let mut steps = Vec::with_capacity(passes as usize);
    let mut horizontal = true;
    let mut source = BlurSource::Bright;

    for iteration in 0..passes {
        let target = usize::from(horizontal);
        steps.push(BlurStep {
            iteration,
            direction: if horizontal {
                BlurDirection::Horizontal
            } else {
                BlurDirection::Vertical
            },
            source,
            target,
        });
        source = BlurSource::PingPong(target);
        horizontal = !horizontal;
    }

    steps
}

/// A single render pass.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderPass {
    /// Opaque scene into the HDR target, with alpha blending only for rings.
    Scene {
        starfield: bool,
        orbit_lines: bool,
        bodies: bool,
        rings_blended: bool,
    },
    BrightExtract {
        threshold: f32,
    },
    Blur(BlurStep),
    /// Scene plus weighted bloom, exposure tonemapped, to the default target.
    Composite {
        bloom_source: BlurSource,
        bloom_strength: f32,
        exposure: f32,
    },
    Ui,
}

impl RenderPass {
    /// Short label for the menu.
    pub fn label(&self) -> String {
        match self {
            RenderPass::Scene { .. } => "scene".to_string(),
            RenderPass::BrightExtract { .. } => "bright".to_string(),
            RenderPass::Blur(step) => match step.direction {
                BlurDirection::Horizontal => format!("blur{} h", step.iteration),
                BlurDirection::Vertical => format!("blur{} v", step.iteration),
            },
            RenderPass::Composite { .. } => "composite".to_string(),
            RenderPass::Ui => "ui".to_string(),
        }
    }
}

/// Ordered passes of one frame.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct FramePlan {
    passes: Vec<RenderPass>,
}

impl FramePlan {
    pub fn new(post: &PostProcessSettings, scene: &SceneSettings, has_rings: bool) -> Self {
        let blur = blur_schedule(post.effective_blur_passes());
        let bloom_source = blur
            .last()
            .map_or(BlurSource::Bright, |step| BlurSource::PingPong(step.target));

        let mut passes = Vec::with_capacity(blur.len() + 4);
        passes.push(RenderPass::Scene {
            starfield: true,
            orbit_lines: scene.show_orbits,
            bodies: true,
            rings_blended: has_rings,
        });
        passes.push(RenderPass::BrightExtract {
            threshold: BRIGHT_THRESHOLD,
        });
        passes.extend(blur.into_iter().map(RenderPass::Blur));
        passes.push(RenderPass::Composite {
            bloom_source,
            bloom_strength: post.bloom_strength,
            exposure: post.exposure,
        });
        passes.push(RenderPass::Ui);

        Self { passes }
    }

    pub fn passes(&self) -> &[RenderPass] {
        &self.passes
    }

    pub fn blur_steps(&self) -> impl Iterator<Item = &BlurStep> {
        self.passes.iter().filter_map(|pass| match pass {
            RenderPass::Blur(step) => Some(step),
            _ => None,
        })
    }

    /// One-line description, e.g. `scene > bright > blur0 h > ... > ui`.
    pub fn summary(&self) -> String {
        self.passes
            .iter()
            .map(RenderPass::label)
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Plugin keeping the frame plan and camera post-processing in sync with
/// the settings.
pub struct PipelinePlugin;

impl Plugin for PipelinePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PostProcessSettings>()
            .add_systems(PostStartup, log_frame_plan)
            .add_systems(Update, (rebuild_frame_plan, apply_post_process).chain());
    }
}

fn orrery_has_rings(orrery: &Orrery) -> bool {
    orrery.bodies().iter().any(|b| b.ring.is_some())
}

/// Rebuild the plan when any input to it changes.
fn rebuild_frame_plan(
    mut commands: Commands,
    post: Res<PostProcessSettings>,
    scene: Res<SceneSettings>,
    orrery: Res<Orrery>,
    plan: Option<Res<FramePlan>>,
) {
    if plan.is_some() && !post.is_changed() && !scene.is_changed() {
        return;
    }
    commands.insert_resource(FramePlan::new(&post, &scene, orrery_has_rings(&orrery)));
}

fn log_frame_plan(post: Res<PostProcessSettings>, scene: Res<SceneSettings>, orrery: Res<Orrery>) {
    let plan = FramePlan::new(&post, &scene, orrery_has_rings(&orrery));
    info!("Frame plan: {}", plan.summary());
}

/// Attach or refresh bloom, exposure grading and tonemapping on the main
/// camera.
fn apply_post_process(
    mut commands: Commands,
    post: Res<PostProcessSettings>,
    cameras: Query<(Entity, Has<Bloom>), With<MainCamera>>,
) {
    for (entity, has_bloom) in cameras.iter() {
        if has_bloom && !post.is_changed() {
            continue;
        }
        commands.entity(entity).insert((
            post.bloom(),
            post.color_grading(),
            Tonemapping::TonyMcMapface,
        ));
        debug!(
            "Post-process: bloom {:.2}, exposure {:.2}, {} blur passes",
            post.bloom_strength,
            post.exposure,
            post.effective_blur_passes()
        );
    }
}
