//! Triangle mesh data for Glint.
//!
//! A mesh is the hand-off format between file readers (see [`crate::off`])
//! and the renderer, which turns every index triple into a triangle
//! primitive.

use glint_math::Vec3;

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle, 0-based)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Return a copy with every vertex scaled uniformly, then translated.
    ///
    /// `p' = p * scale + offset`
    pub fn transformed(&self, scale: f32, offset: Vec3) -> Mesh {
        Mesh {
            positions: self.positions.iter().map(|p| *p * scale + offset).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Extract triangle vertices as a flat array of [v0, v1, v2] triplets.
    ///
    /// Triangles referencing a vertex outside the position list are skipped.
    pub fn extract_triangle_vertices(&self) -> Vec<[Vec3; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks(3) {
            if chunk.len() < 3 {
                continue;
            }

            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            // Bounds check
            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            triangles.push([self.positions[i0], self.positions[i1], self.positions[i2]]);
        }

        triangles
    }
}
