//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! Each coordinate channel is stored contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! A garment's vertex array is index-aligned 1:1 with its particle slice in
//! the cloth engine, so vertex `i` always corresponds to particle `start + i`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tryon_types::{TryOnError, TryOnResult};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Tangent frames are not read by the base shading model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// X components of vertex normals.
    pub normal_x: Vec<f32>,
    /// Y components of vertex normals.
    pub normal_y: Vec<f32>,
    /// Z components of vertex normals.
    pub normal_z: Vec<f32>,

    /// U texture coordinates.
    pub uv_u: Vec<f32>,
    /// V texture coordinates.
    pub uv_v: Vec<f32>,

    /// Per-vertex tangent (packed xyz).
    pub tangents: Vec<[f32; 3]>,
    /// Per-vertex bitangent (packed xyz).
    pub bitangents: Vec<[f32; 3]>,

    /// Triangle indices, stored flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the normal of vertex `i`.
    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Returns the texture coordinate of vertex `i`.
    #[inline]
    pub fn uv(&self, i: usize) -> Vec2 {
        Vec2::new(self.uv_u[i], self.uv_v[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Overwrites every vertex position from a simulated particle slice.
    ///
    /// The slice must be in vertex order and have exactly one
    /// entry per vertex. On mismatch the mesh is left untouched.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> TryOnResult<()> {
        if positions.len() != self.vertex_count() {
            return Err(TryOnError::InvalidMesh(format!(
                "Position count ({}) != vertex count ({})",
                positions.len(),
                self.vertex_count()
            )));
        }
        for (i, &p) in positions.iter().enumerate() {
            self.set_position(i, p);
        }
        Ok(())
    }

    /// Collects all vertex positions in vertex order.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position(i)).collect()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            tangents: Vec::with_capacity(vertex_capacity),
            bitangents: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Appends a vertex with the given position, normal and UV.
    /// Tangent frame starts zeroed; see [`crate::normals::compute_tangents`].
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) {
        self.pos_x.push(position.x);
        self.pos_y.push(position.y);
        self.pos_z.push(position.z);
        self.normal_x.push(normal.x);
        self.normal_y.push(normal.y);
        self.normal_z.push(normal.z);
        self.uv_u.push(uv.x);
        self.uv_v.push(uv.y);
        self.tangents.push([0.0; 3]);
        self.bitangents.push([0.0; 3]);
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Bounding box of all vertex positions, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..self.vertex_count() {
            let p = self.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        Some(Aabb { min, max })
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All per-vertex arrays have the same length
    /// - Triangle indices are within bounds
    /// - No triangle repeats a vertex index
    pub fn validate(&self) -> TryOnResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(TryOnError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(TryOnError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != n || self.uv_v.len() != n {
            return Err(TryOnError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }
        if self.tangents.len() != n || self.bitangents.len() != n {
            return Err(TryOnError::InvalidMesh(
                "Tangent arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(TryOnError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(TryOnError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(TryOnError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved position and UV data, the layout
    /// garment authoring hands over.
    ///
    /// `positions` is `[x0, y0, z0, x1, ...]`; `uvs` is `[u0, v0, u1, ...]`
    /// or empty (UVs default to zero). Normals are computed from the faces.
    pub fn from_interleaved(positions: &[f32], indices: &[u32], uvs: &[f32]) -> TryOnResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(TryOnError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);
        let has_uvs = uvs.len() == n * 2;

        for i in 0..n {
            let p = Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);
            let uv = if has_uvs {
                Vec2::new(uvs[i * 2], uvs[i * 2 + 1])
            } else {
                Vec2::ZERO
            };
            mesh.push_vertex(p, Vec3::ZERO, uv);
        }
        mesh.indices = indices.to_vec();

        mesh.validate()?;
        crate::normals::compute_vertex_normals(&mut mesh);
        Ok(mesh)
    }
}
