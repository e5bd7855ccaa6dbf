//! Orrery advancement driven by the scaled simulation clock.

use bevy::prelude::*;

use crate::orrery::Orrery;
use crate::types::{FrameSet, SimulationClock};

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, advance_orrery.in_set(FrameSet::Simulate));
    }
}

/// Advance every body by the frame's real delta times the clock scale.
pub fn advance_orrery(mut clock: ResMut<SimulationClock>, mut orrery: ResMut<Orrery>, time: Res<Time>) {
    let dt = clock.scaled_delta(time.delta_secs());
    if dt == 0.0 {
        return;
    }

    orrery.update(dt);
    clock.elapsed += f64::from(dt);
}
