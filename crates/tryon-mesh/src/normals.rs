//! Vertex normal and tangent-frame computation.
//!
//! Normals are recomputed after every simulation step, when the mesh is
//! re-synced from particle positions. Face normals are accumulated at each
//! vertex (weighted by triangle area, since the cross product is left
//! unnormalized) and then normalized.

use glam::Vec3;

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Vertices that belong to no triangle, or only to degenerate ones,
/// keep a zero normal.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();
    let mut accum = vec![Vec3::ZERO; n];

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|i| i as usize);
        let pa = mesh.position(a);
        let e1 = mesh.position(b) - pa;
        let e2 = mesh.position(c) - pa;

        // Magnitude = 2 × triangle area
        let face = e1.cross(e2);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    for (i, nrm) in accum.into_iter().enumerate() {
        let len = nrm.length();
        let nrm = if len > 1e-4 { nrm / len } else { Vec3::ZERO };
        mesh.normal_x[i] = nrm.x;
        mesh.normal_y[i] = nrm.y;
        mesh.normal_z[i] = nrm.z;
    }
}

/// Compute per-vertex tangents and bitangents from positions and UVs.
///
/// Per-face tangents follow Lengyel's method and are accumulated per vertex,
/// then Gram–Schmidt orthogonalized against the vertex normal. The bitangent
/// is `normal × tangent`. Call after [`compute_vertex_normals`].
pub fn compute_tangents(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();
    let mut accum = vec![Vec3::ZERO; n];

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|i| i as usize);
        let e1 = mesh.position(b) - mesh.position(a);
        let e2 = mesh.position(c) - mesh.position(a);
        let d1 = mesh.uv(b) - mesh.uv(a);
        let d2 = mesh.uv(c) - mesh.uv(a);

        // Offset keeps UV-degenerate faces finite
        let f = 1.0 / (d1.x * d2.y - d2.x * d1.y + 1e-4);
        let tangent = (e1 * d2.y - e2 * d1.y) * f;

        accum[a] += tangent;
        accum[b] += tangent;
        accum[c] += tangent;
    }

    for (i, tan) in accum.into_iter().enumerate() {
        let nrm = mesh.normal(i);
        let tan = tan.normalize_or_zero();
        let tan = tan - nrm * nrm.dot(tan);
        let bitan = nrm.cross(tan);
        mesh.tangents[i] = tan.to_array();
        mesh.bitangents[i] = bitan.to_array();
    }
}
