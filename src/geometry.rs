//! Static geometry generators.
//!
//! Produces plain vertex/index data for the sphere, ring, orbit polyline and
//! starfield, and converts it into Bevy meshes. The generators are pure so the
//! counts and shapes can be checked without a GPU.

use std::f32::consts::{PI, TAU};

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Latitude rings used for body spheres.
pub const SPHERE_RINGS: u32 = 30;

/// Longitude sectors used for body spheres.
pub const SPHERE_SECTORS: u32 = 30;

/// Segments of a planetary ring annulus.
pub const RING_SEGMENTS: u32 = 128;

/// Segments of an orbit polyline.
pub const ORBIT_SEGMENTS: u32 = 200;

/// Indexed triangle geometry with per-vertex normals and texture coordinates.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Convert into a triangle-list Bevy mesh.
    pub fn into_mesh(self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Unit sphere tessellated into `rings` latitude bands and `sectors`
/// longitude slices.
///
/// Ring 0 is the south pole. `u` runs against the longitude so equirectangular
/// textures are not mirrored; `v` is 0 at the north pole (top of the image).
pub fn sphere(rings: u32, sectors: u32) -> MeshData {
    let rings = rings.max(2);
    let sectors = sectors.max(2);
    let ring_step = 1.0 / (rings - 1) as f32;
    let sector_step = 1.0 / (sectors - 1) as f32;

    let vertex_count = (rings * sectors) as usize;
    let mut data = MeshData {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        uvs: Vec::with_capacity(vertex_count),
        indices: Vec::with_capacity(((rings - 1) * (sectors - 1) * 6) as usize),
    };

    for r in 0..rings {
        let polar = PI * r as f32 * ring_step;
        for s in 0..sectors {
            let azimuth = TAU * s as f32 * sector_step;
            let y = (-PI / 2.0 + polar).sin();
            let x = azimuth.cos() * polar.sin();
            let z = azimuth.sin() * polar.sin();

            data.positions.push([x, y, z]);
            data.normals.push([x, y, z]);
            data.uvs
                .push([1.0 - s as f32 * sector_step, 1.0 - r as f32 * ring_step]);
        }
    }

    // Counter-clockwise when seen from outside.
    for r in 0..rings - 1 {
        for s in 0..sectors - 1 {
            let here = r * sectors + s;
            let east = r * sectors + s + 1;
            let north = (r + 1) * sectors + s;
            let north_east = (r + 1) * sectors + s + 1;

            data.indices.extend_from_slice(&[here, north_east, east]);
            data.indices.extend_from_slice(&[here, north, north_east]);
        }
    }

    data
}

/// Flat annulus in the XZ plane facing +Y.
///
/// Produces `(segments + 1) * 2` vertices (inner/outer pairs, the seam
/// duplicated so texture coordinates wrap cleanly) and `segments * 6`
/// indices. `u` is 0 on the inner edge and 1 on the outer edge.
pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let vertex_count = ((segments + 1) * 2) as usize;
    let mut data = MeshData {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        uvs: Vec::with_capacity(vertex_count),
        indices: Vec::with_capacity((segments * 6) as usize),
    };

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let (sin, cos) = (TAU * t).sin_cos();

        data.positions
            .push([inner_radius * cos, 0.0, inner_radius * sin]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.uvs.push([0.0, t]);

        data.positions
            .push([outer_radius * cos, 0.0, outer_radius * sin]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.uvs.push([1.0, t]);
    }

    for i in 0..segments {
        let inner = i * 2;
        let outer = i * 2 + 1;
        let inner_next = (i + 1) * 2;
        let outer_next = (i + 1) * 2 + 1;

        data.indices.extend_from_slice(&[inner, inner_next, outer]);
        data.indices
            .extend_from_slice(&[inner_next, outer_next, outer]);
    }

    data
}

/// Closed circle of `segments + 1` points in the XZ plane; the last point
/// repeats the first.
pub fn orbit_polyline(radius: f32, segments: u32) -> Vec<[f32; 3]> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            [radius * angle.cos(), 0.0, radius * angle.sin()]
        })
        .collect()
}

/// Line-strip mesh through `points`.
pub fn polyline_mesh(points: Vec<[f32; 3]>) -> Mesh {
    let normals = vec![[0.0, 1.0, 0.0]; points.len()];
    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, points)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

/// One background star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPoint {
    pub position: [f32; 3],
    /// Grey level in `[0.4, 1.0)`.
    pub brightness: f32,
}

/// Deterministic starfield: `count` points uniform in a cube of half-size
/// `extent`, the same set for the same `seed`.
pub fn starfield(count: usize, seed: u64, extent: f32) -> Vec<StarPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| StarPoint {
            position: [
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            ],
            brightness: rng.gen_range(0.4..1.0),
        })
        .collect()
}

/// Point-list mesh with a grey vertex color per star.
pub fn starfield_mesh(stars: &[StarPoint]) -> Mesh {
    let positions: Vec<[f32; 3]> = stars.iter().map(|s| s.position).collect();
    let colors: Vec<[f32; 4]> = stars
        .iter()
        .map(|s| [s.brightness, s.brightness, s.brightness, 1.0])
        .collect();
    let normals = vec![[0.0, 1.0, 0.0]; stars.len()];

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}
