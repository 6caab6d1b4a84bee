//! Glint Core - scene description and mesh data for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `Mesh` (positions + triangle indices) and an OFF reader
//! - **Scene files**: a line-oriented scene format parsed into a
//!   renderer-agnostic `SceneDescription`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::scene_file::parse_scene_file;
//!
//! let description = parse_scene_file("scenes/simple.scene")?;
//! println!("{} objects, {} lights",
//!     description.objects.len(),
//!     description.lights.len());
//! ```

pub mod mesh;
pub mod off;
pub mod scene_file;

// Re-export commonly used types
pub use mesh::Mesh;
pub use off::{parse_off, read_off, OffError};
pub use scene_file::{
    parse_scene, parse_scene_file, CameraSpec, LightSpec, MaterialSpec, ObjectSpec,
    ReflectionSpec, SceneDescription, SceneFileError,
};
