//! Background starfield.

use bevy::prelude::*;

use crate::geometry;

/// Number of background stars.
pub const STAR_COUNT: usize = 500;

/// Seed for the starfield, so the sky is the same on every run.
pub const STARFIELD_SEED: u64 = 42;

/// Half-size of the cube the stars are scattered in.
pub const STARFIELD_EXTENT: f32 = 2000.0;

/// Marker for the starfield entity.
#[derive(Component)]
pub struct Starfield;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_starfield);
    }
}

/// Spawn the starfield as a single point-list mesh with per-star grey
/// levels carried in vertex colors.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let stars = geometry::starfield(STAR_COUNT, STARFIELD_SEED, STARFIELD_EXTENT);
    let mesh = meshes.add(geometry::starfield_mesh(&stars));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    commands.spawn((Mesh3d(mesh), MeshMaterial3d(material), Transform::IDENTITY, Starfield));

    info!("Spawned {} background stars", stars.len());
}
