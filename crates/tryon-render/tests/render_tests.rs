//! Integration tests for tryon-render.

use glam::{Vec2, Vec3};
use tryon_material::Texture;
use tryon_mesh::generators::quad;
use tryon_mesh::TriangleMesh;
use tryon_render::raster::rasterize_triangle;
use tryon_render::{
    estimate_environment_light, EnvironmentLight, FrameBuffer, Image, Projection, RasterVertex,
    RenderConfig, RenderItem, RenderStrategy, Shading, SoftwareRasterizer,
};
use tryon_types::constants::FAR_DEPTH;
use tryon_types::TryOnError;

const BLACK: [u8; 4] = [0, 0, 0, 255];

fn facing_light_config() -> RenderConfig {
    RenderConfig {
        light_direction: [0.0, 0.0, 1.0],
        ..Default::default()
    }
}

fn shifted(mut mesh: TriangleMesh, offset: Vec3) -> TriangleMesh {
    let moved: Vec<Vec3> = mesh.positions().iter().map(|p| *p + offset).collect();
    mesh.set_positions(&moved).unwrap();
    mesh
}

// ─── Projection Tests ─────────────────────────────────────────

#[test]
fn origin_projects_to_screen_center() {
    let proj = Projection::new(&RenderConfig::default(), 640, 480);
    let s = proj.project(Vec3::ZERO);
    assert!((s.x - 320.0).abs() < 1e-4);
    assert!((s.y - 240.0).abs() < 1e-4);
    assert!((s.z - 2.0).abs() < 1e-6);
}

#[test]
fn projection_flips_y_and_applies_aspect() {
    let proj = Projection::new(&RenderConfig::default(), 200, 100);
    let up = proj.project(Vec3::new(0.0, 0.5, 0.0));
    assert!(up.y < 50.0);
    // x = 1 at depth 2: ndc = 0.5 / aspect(2) = 0.25 -> (1.25) * 100.
    let right = proj.project(Vec3::new(1.0, 0.0, 0.0));
    assert!((right.x - 125.0).abs() < 1e-4);
}

#[test]
fn projection_clamps_behind_camera() {
    let cfg = RenderConfig::default();
    let proj = Projection::new(&cfg, 64, 64);
    let s = proj.project(Vec3::new(0.3, 0.3, -10.0));
    assert_eq!(s.z, cfg.near_clip);
    assert!(s.x.is_finite() && s.y.is_finite());
}

#[test]
fn projected_depth_preserves_ordering() {
    let proj = Projection::new(&RenderConfig::default(), 64, 64);
    let zs = [-1.9, -1.0, -0.25, 0.0, 0.4, 1.0, 3.0, 10.0];
    for &za in &zs {
        for &zb in &zs {
            let da = proj.project(Vec3::new(0.2, -0.1, za)).z;
            let db = proj.project(Vec3::new(-0.3, 0.4, zb)).z;
            assert_eq!(za < zb, da < db, "z {za} vs {zb}");
        }
    }
}

// ─── Shading Tests ────────────────────────────────────────────

fn shading() -> Shading {
    Shading {
        light_direction: Vec3::new(0.0, 0.0, 1.0),
        intensity: 1.0,
        ambient: 0.3,
        alpha_cutoff: 0.01,
    }
}

#[test]
fn light_term_is_floored_at_ambient() {
    let s = shading();
    assert_eq!(s.light_term(Vec3::X), 0.3);
    assert_eq!(s.light_term(Vec3::Z), 1.0);
    assert_eq!(s.light_term(-Vec3::Z), 1.0);
}

#[test]
fn composite_blends_by_alpha() {
    let s = shading();
    let out = s.composite([200, 0, 0, 128], Vec3::Z, [0, 0, 200, 255]).unwrap();
    assert_eq!(out[0], 100);
    assert_eq!(out[2], 100);
    assert_eq!(out[3], 255);
    assert!(s.composite([255, 255, 255, 0], Vec3::Z, BLACK).is_none());
}

// ─── Rasterizer Tests ─────────────────────────────────────────

#[test]
fn covering_triangle_yields_pure_albedo() {
    let mut fb = FrameBuffer::new(10, 10);
    fb.begin_frame(&Image::filled(10, 10, BLACK));
    let albedo = [200, 120, 40, 255];
    let tex = Texture::solid(albedo);
    let v = |x: f32, y: f32| RasterVertex {
        screen: Vec3::new(x, y, 1.0),
        uv: Vec2::ZERO,
        normal: Vec3::new(0.0, 0.0, -1.0),
    };
    let tri = [v(-1.0, -1.0), v(30.0, -1.0), v(-1.0, 30.0)];

    assert_eq!(rasterize_triangle(&mut fb, &tri, &tex, &shading()), Some(100));
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(fb.pixel(x, y), albedo);
            assert!((fb.depth_at(x, y) - 1.0).abs() < 1e-5);
        }
    }
}

#[test]
fn degenerate_triangle_is_skipped() {
    let mut fb = FrameBuffer::new(8, 8);
    fb.begin_frame(&Image::filled(8, 8, BLACK));
    let v = |x: f32| RasterVertex {
        screen: Vec3::new(x, x, 1.0),
        uv: Vec2::ZERO,
        normal: Vec3::Z,
    };
    let tri = [v(0.0), v(3.0), v(7.0)];
    assert_eq!(rasterize_triangle(&mut fb, &tri, &Texture::solid([255; 4]), &shading()), None);
    assert_eq!(fb.to_image(), Image::filled(8, 8, BLACK));
}

#[test]
fn render_full_cover_quad_outputs_albedo() {
    let mut r = SoftwareRasterizer::new(facing_light_config()).unwrap();
    let mesh = quad(6.0, 6.0);
    let albedo = [200, 100, 50, 255];
    let tex = Texture::solid(albedo);
    let out = r
        .render(&Image::filled(10, 10, BLACK), &[RenderItem { mesh: &mesh, texture: &tex }])
        .unwrap();
    assert_eq!(out.width, 10);
    assert_eq!(out, Image::filled(10, 10, albedo));
    assert_eq!(r.last_stats().triangles, 2);
    // Pixels on the shared diagonal may be written by both triangles.
    assert!(r.last_stats().fragments >= 100);
}

#[test]
fn transparent_texels_leave_background() {
    let mut r = SoftwareRasterizer::new(RenderConfig::default()).unwrap();
    let mesh = quad(6.0, 6.0);
    let tex = Texture::solid([255, 255, 255, 0]);
    let bg = Image::filled(12, 12, [10, 20, 30, 255]);
    let out = r.render(&bg, &[RenderItem { mesh: &mesh, texture: &tex }]).unwrap();
    assert_eq!(out, bg);
    assert_eq!(r.framebuffer().depth_at(6, 6), FAR_DEPTH);
}

#[test]
fn nearer_garment_wins_regardless_of_order() {
    let mut r = SoftwareRasterizer::new(facing_light_config()).unwrap();
    let near = shifted(quad(1.0, 1.0), Vec3::new(0.0, 0.0, -0.5));
    let far = shifted(quad(6.0, 6.0), Vec3::new(0.0, 0.0, 0.5));
    let red = Texture::solid([255, 0, 0, 255]);
    let blue = Texture::solid([0, 0, 255, 255]);
    let bg = Image::filled(32, 32, BLACK);

    let a = r
        .render(
            &bg,
            &[
                RenderItem { mesh: &near, texture: &red },
                RenderItem { mesh: &far, texture: &blue },
            ],
        )
        .unwrap();
    let b = r
        .render(
            &bg,
            &[
                RenderItem { mesh: &far, texture: &blue },
                RenderItem { mesh: &near, texture: &red },
            ],
        )
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(a.pixel(1, 1), Some([0, 0, 255, 255]));
}

#[test]
fn rendering_is_idempotent() {
    let mut r = SoftwareRasterizer::new(RenderConfig::default()).unwrap();
    let mesh = tryon_mesh::generators::tshirt_template();
    let tex = Texture::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 200]).unwrap();
    let bg = Image::filled(64, 48, [30, 30, 30, 255]);
    let items = [RenderItem { mesh: &mesh, texture: &tex }];
    let first = r.render(&bg, &items).unwrap();
    let second = r.render(&bg, &items).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, bg);
}

#[test]
fn render_without_dimensions_is_not_initialized() {
    let mut r = SoftwareRasterizer::new(RenderConfig::default()).unwrap();
    let err = r.render(&Image::default(), &[]).unwrap_err();
    assert!(matches!(err, TryOnError::NotInitialized(_)));
}

#[test]
fn render_rejects_short_background() {
    let mut r = SoftwareRasterizer::new(RenderConfig::default()).unwrap();
    let bg = Image {
        width: 4,
        height: 4,
        pixels: vec![0; 10],
    };
    assert!(matches!(r.render(&bg, &[]), Err(TryOnError::DimensionMismatch { .. })));
}

#[test]
fn framebuffer_follows_background_size() {
    let mut r = SoftwareRasterizer::new(RenderConfig::default()).unwrap();
    r.render(&Image::filled(10, 10, BLACK), &[]).unwrap();
    let out = r.render(&Image::filled(20, 5, BLACK), &[]).unwrap();
    assert_eq!((out.width, out.height), (20, 5));
    assert_eq!(r.framebuffer().width(), 20);
    assert_eq!(r.name(), "software");
}

#[test]
fn image_from_rgba_checks_length() {
    assert!(Image::from_rgba(2, 2, vec![0; 16]).is_ok());
    assert!(Image::from_rgba(2, 2, vec![0; 12]).is_err());
}

// ─── Lighting Tests ───────────────────────────────────────────

#[test]
fn empty_frame_gets_default_light() {
    assert_eq!(estimate_environment_light(&Image::default()), EnvironmentLight::default());
}

#[test]
fn bright_sky_steepens_light() {
    let w = 40;
    let h = 40;
    let mut pixels = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        let v = if y < h / 2 { 255 } else { 0 };
        for _ in 0..w {
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let sky = Image::from_rgba(w as u32, h as u32, pixels).unwrap();
    let flat = Image::filled(w as u32, h as u32, [128, 128, 128, 255]);

    let lit = estimate_environment_light(&sky);
    let neutral = estimate_environment_light(&flat);
    assert!(lit.direction.y < neutral.direction.y);
    assert!((neutral.direction - Vec3::new(0.0, -0.7, -0.3).normalize()).length() < 1e-5);
    assert!((lit.direction.length() - 1.0).abs() < 1e-5);
    assert!((lit.ambient - 0.3).abs() < 1e-3);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn render_config_validation_and_toml() {
    assert!(RenderConfig::default().validate().is_ok());
    let bad = RenderConfig {
        light_direction: [0.0; 3],
        ..Default::default()
    };
    assert!(SoftwareRasterizer::new(bad).is_err());

    let cfg: RenderConfig = toml::from_str("ambient = 0.5\nestimate_lighting = true\n").unwrap();
    assert_eq!(cfg.ambient, 0.5);
    assert!(cfg.estimate_lighting);
    assert_eq!(cfg.camera_offset, 2.0);
}
