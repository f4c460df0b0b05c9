//! Mesh topology queries.
//!
//! Builds adjacency data from the triangle index buffer. The edge list is
//! what the cloth solver turns into stretch constraints, so its order is
//! fixed: edges appear in the order they are first met while walking the
//! triangles `(a, b), (b, c), (c, a)`.

use std::collections::HashMap;

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `[v_min, v_max]`, in first-occurrence order.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the adjacent triangles (one for boundary edges).
    pub edge_triangles: Vec<Vec<u32>>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let tri_count = mesh.triangle_count();

        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut edge_index: HashMap<(u32, u32), usize> = HashMap::new();
        let mut edges: Vec<[u32; 2]> = Vec::new();
        let mut edge_triangles: Vec<Vec<u32>> = Vec::new();

        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            for v in [a, b, c] {
                vertex_triangles[v as usize].push(t as u32);
            }

            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                let slot = *edge_index.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    edge_triangles.push(Vec::new());
                    edges.len() - 1
                });
                edge_triangles[slot].push(t as u32);
            }
        }

        Self {
            vertex_triangles,
            edges,
            edge_triangles,
        }
    }

    /// Returns the number of unique edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}
