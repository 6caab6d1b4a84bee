//! Glint Renderer - CPU ray tracing.
//!
//! A single-shot offline ray tracer: analytic ray/primitive intersection,
//! Blinn-Phong shading with hard shadows from point lights, and
//! depth-bounded mirror reflection.

mod ray;
mod hittable;
mod material;
mod light;
mod sphere;
mod aa_box;
mod triangle;
mod camera;
mod scene;
mod shading;
mod renderer;
mod bucket;
mod image_buffer;
pub mod demo;

pub use ray::Ray;
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{Color, Material};
pub use light::Light;
pub use sphere::Sphere;
pub use aa_box::AaBox;
pub use triangle::Triangle;
pub use camera::Camera;
pub use scene::{RenderDefaults, Scene, SceneError};
pub use shading::{illuminate, reflect, SHADOW_EPSILON};
pub use renderer::{
    backdrop, color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_with_camera,
    trace, RenderConfig, T_MIN,
};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use image_buffer::{ImageBuffer, ImageError, PpmFormat};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Vec3};

/// Re-export scene description types from glint_core
pub use glint_core::{CameraSpec, Mesh};
