//! Orbit path rendering.
//!
//! Each orbiting body gets one unlit line-strip circle built once at
//! startup. Planet orbits stay centred on the origin; satellite orbits are
//! moved every frame to follow their parent.

use bevy::prelude::*;

use crate::geometry::{self, ORBIT_SEGMENTS};
use crate::orrery::{BodyId, Orrery};
use crate::types::{FrameSet, SceneSettings};

/// Brightness of an orbit line relative to its body's color.
pub const ORBIT_LINE_DIM: f32 = 0.35;

/// A drawn orbit path.
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitLine {
    /// Body travelling along this path.
    pub body: BodyId,
}

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_orbit_lines).add_systems(
            Update,
            (recenter_orbit_lines, apply_orbit_visibility).in_set(FrameSet::Sync),
        );
    }
}

/// Visibility for the orbit toggle.
pub fn orbit_visibility(settings: &SceneSettings) -> Visibility {
    if settings.show_orbits {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn spawn_orbit_lines(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orrery: Res<Orrery>,
    settings: Res<SceneSettings>,
) {
    let mut count = 0;
    for (id, body) in orrery.iter() {
        let Some(orbit) = body.kind.orbit() else {
            continue;
        };
        let Some(center) = orrery.orbit_center(id) else {
            continue;
        };

        let mesh = meshes.add(geometry::polyline_mesh(geometry::orbit_polyline(
            orbit.radius,
            ORBIT_SEGMENTS,
        )));
        let color = body.color * ORBIT_LINE_DIM;
        let material = materials.add(StandardMaterial {
            base_color: Color::linear_rgb(color.x, color.y, color.z),
            unlit: true,
            ..default()
        });

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(center),
            orbit_visibility(&settings),
            OrbitLine { body: id },
        ));
        count += 1;
    }

    info!("Spawned {count} orbit lines");
}

/// Keep satellite orbits centred on their parents.
fn recenter_orbit_lines(orrery: Res<Orrery>, mut lines: Query<(&OrbitLine, &mut Transform)>) {
    for (line, mut transform) in lines.iter_mut() {
        if let Some(center) = orrery.orbit_center(line.body) {
            transform.translation = center;
        }
    }
}

fn apply_orbit_visibility(
    settings: Res<SceneSettings>,
    mut lines: Query<&mut Visibility, With<OrbitLine>>,
) {
    if !settings.is_changed() {
        return;
    }
    let visibility = orbit_visibility(&settings);
    for mut v in lines.iter_mut() {
        *v = visibility;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_follows_toggle() {
        assert_eq!(orbit_visibility(&SceneSettings::default()), Visibility::Inherited);
        assert_eq!(
            orbit_visibility(&SceneSettings { show_orbits: false }),
            Visibility::Hidden
        );
    }
}
