//! Procedural mesh generators for tests, demos and garment templates.
//!
//! All generators lie in the XY plane at Z=0 with +Y up, produce
//! counter-clockwise triangles (face normal +Z) and UVs with V growing
//! downward from the top edge.

use glam::{Vec2, Vec3};

use crate::mesh::TriangleMesh;
use crate::normals::{compute_tangents, compute_vertex_normals};

/// A single quad of the given size centered at the origin: 4 vertices, 2 triangles.
///
/// Vertex order is bottom-left, bottom-right, top-right, top-left.
pub fn quad(width: f32, height: f32) -> TriangleMesh {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let mut mesh = TriangleMesh::with_capacity(4, 2);

    mesh.push_vertex(Vec3::new(-hw, -hh, 0.0), Vec3::Z, Vec2::new(0.0, 1.0));
    mesh.push_vertex(Vec3::new(hw, -hh, 0.0), Vec3::Z, Vec2::new(1.0, 1.0));
    mesh.push_vertex(Vec3::new(hw, hh, 0.0), Vec3::Z, Vec2::new(1.0, 0.0));
    mesh.push_vertex(Vec3::new(-hw, hh, 0.0), Vec3::Z, Vec2::new(0.0, 0.0));

    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 2, 3);

    compute_tangents(&mut mesh);
    mesh
}

/// Generates a flat rectangular quad grid.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
///
/// # Example
/// ```
/// use tryon_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);
/// assert_eq!(mesh.triangle_count(), 8);
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_y = rows + 1;

    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            let p = Vec3::new(-half_w + u * width, half_h - v * height, 0.0);
            mesh.push_vertex(p, Vec3::Z, Vec2::new(u, v));
        }
    }

    push_grid_triangles(&mut mesh, cols, rows);
    compute_tangents(&mut mesh);
    mesh
}

/// A coarse T-shirt front panel: a 15×20 vertex grid, 0.8 m wide and 1.5 m
/// tall (Y from 1.0 down to -0.5), with the shoulder rows flared outward
/// into short sleeves.
pub fn tshirt_template() -> TriangleMesh {
    const ROWS: usize = 20;
    const COLS: usize = 15;

    let mut mesh = TriangleMesh::with_capacity(ROWS * COLS, (ROWS - 1) * (COLS - 1) * 2);

    for r in 0..ROWS {
        let v = r as f32 / (ROWS - 1) as f32;
        let y = 1.0 - v * 1.5;
        for c in 0..COLS {
            let t = c as f32 / (COLS - 1) as f32;
            let mut x = (t - 0.5) * 0.8;

            if (2..=5).contains(&r) {
                let flare = 0.3 * (1.0 - (r as f32 - 3.5).abs() / 2.0);
                if t < 0.3 {
                    x -= flare;
                }
                if t > 0.7 {
                    x += flare;
                }
            }

            mesh.push_vertex(Vec3::new(x, y, 0.0), Vec3::Z, Vec2::new(t, v));
        }
    }

    for r in 0..ROWS - 1 {
        for c in 0..COLS - 1 {
            let i = (r * COLS + c) as u32;
            let cols = COLS as u32;
            mesh.push_triangle(i, i + cols + 1, i + 1);
            mesh.push_triangle(i, i + cols, i + cols + 1);
        }
    }

    compute_vertex_normals(&mut mesh);
    compute_tangents(&mut mesh);
    mesh
}

/// Two triangles per grid cell, counter-clockwise seen from +Z.
fn push_grid_triangles(mesh: &mut TriangleMesh, cols: usize, rows: usize) {
    let verts_x = (cols + 1) as u32;
    for j in 0..rows as u32 {
        for i in 0..cols as u32 {
            let top_left = j * verts_x + i;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x;
            let bot_right = bot_left + 1;

            mesh.push_triangle(top_left, bot_left, top_right);
            mesh.push_triangle(top_right, bot_left, bot_right);
        }
    }
}
