//! Shared simulation types: frame ordering, the simulation clock and
//! scene-level toggles.

use bevy::prelude::*;

/// Per-frame ordering of the update systems.
///
/// Bodies are advanced before the camera so that follow mode tracks the
/// target's position for the frame being rendered.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Keyboard, pointer and selection handling.
    Input,
    /// Orrery advancement.
    Simulate,
    /// Free-fly and follow camera updates.
    Camera,
    /// Copy simulation state onto render transforms and materials.
    Sync,
}

/// Default animation speed multiplier.
pub const DEFAULT_TIME_SCALE: f32 = 0.5;

/// Upper bound of the time scale slider.
pub const MAX_TIME_SCALE: f32 = 5.0;

/// Step used by the `=` and `-` shortcuts.
pub const TIME_SCALE_STEP: f32 = 0.25;

/// Scaled animation clock.
///
/// Body motion uses `real dt * scale`; camera motion always uses real dt.
#[derive(Resource, Clone, Debug)]
pub struct SimulationClock {
    /// Animation speed multiplier in `[0, MAX_TIME_SCALE]`.
    pub scale: f32,
    /// Whether body motion is frozen.
    pub paused: bool,
    /// Total scaled seconds simulated so far.
    pub elapsed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            scale: DEFAULT_TIME_SCALE,
            paused: false,
            elapsed: 0.0,
        }
    }
}

impl SimulationClock {
    /// Scaled step for a real frame delta, zero while paused.
    pub fn scaled_delta(&self, real_dt: f32) -> f32 {
        if self.paused {
            0.0
        } else {
            real_dt * self.scale
        }
    }

    /// Nudge the time scale by `step`, keeping it inside the slider range.
    pub fn adjust_scale(&mut self, step: f32) {
        self.scale = (self.scale + step).clamp(0.0, MAX_TIME_SCALE);
    }
}

/// Scene visibility toggles exposed in the menu.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SceneSettings {
    /// Draw orbit polylines.
    pub show_orbits: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self { show_orbits: true }
    }
}
