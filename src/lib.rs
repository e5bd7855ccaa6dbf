//! Orrery - animated solar system viewer
//!
//! A library crate providing the simulation, camera, picking and rendering
//! components for testing and integration purposes.

pub mod camera;
pub mod geometry;
pub mod input;
pub mod orrery;
pub mod picking;
pub mod render;
pub mod selection;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
