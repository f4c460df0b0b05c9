//! # tryon-mesh
//!
//! Garment mesh representation with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — positions, normals, UVs and tangent frames in
//!   contiguous per-channel buffers, plus the triangle index list.
//! - [`Topology`] — vertex-to-triangle fans and the deduplicated edge list
//!   that the cloth solver turns into stretch constraints.
//! - Procedural templates (quad, grid, T-shirt) for tests and demos.

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use mesh::{Aabb, TriangleMesh};
pub use topology::Topology;
