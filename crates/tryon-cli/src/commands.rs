//! CLI command implementations.

use glam::Vec3;
use tryon_body::LandmarkFrame;
use tryon_material::{MaterialKind, Texture};
use tryon_mesh::generators::tshirt_template;
use tryon_render::Image;
use tryon_session::{GarmentAsset, LandmarkProvider, SessionConfig, TryOnSession};
use tryon_telemetry::TracingSink;
use tryon_types::TryOnResult;

/// Reference pose swaying side to side, `0.1 · sin(t)` along X.
pub struct SwayingLandmarks {
    base: LandmarkFrame,
    time: f32,
    dt: f32,
}

impl SwayingLandmarks {
    pub fn new(dt: f32) -> Self {
        Self {
            base: LandmarkFrame::reference_pose(),
            time: 0.0,
            dt,
        }
    }
}

impl LandmarkProvider for SwayingLandmarks {
    fn detect(&mut self, _frame: &Image) -> TryOnResult<Option<LandmarkFrame>> {
        let offset = Vec3::new(0.1 * self.time.sin(), 0.0, 0.0);
        self.time += self.dt;
        Ok(Some(self.base.translated(offset)))
    }

    fn name(&self) -> &str {
        "swaying"
    }
}

/// Vertical sky-to-floor gradient standing in for a camera frame.
pub fn gradient_background(width: u32, height: u32) -> Image {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        let t = y as f32 / height.saturating_sub(1).max(1) as f32;
        let r = (180.0 - 120.0 * t) as u8;
        let g = (200.0 - 130.0 * t) as u8;
        let b = (230.0 - 150.0 * t) as u8;
        for _ in 0..width {
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    Image {
        width,
        height,
        pixels,
    }
}

fn garment_colour(material: MaterialKind) -> [u8; 4] {
    match material {
        MaterialKind::Cotton => [230, 230, 225, 255],
        MaterialKind::Silk => [200, 40, 90, 255],
        MaterialKind::Denim => [40, 70, 140, 255],
        MaterialKind::Leather => [70, 45, 30, 255],
        MaterialKind::Velvet => [110, 20, 60, 255],
        MaterialKind::Wool => [150, 130, 100, 255],
        MaterialKind::Polyester => [60, 160, 90, 255],
        MaterialKind::Custom => [200, 200, 200, 255],
    }
}

/// Run a session over synthetic input.
pub fn run(
    config_path: Option<&str>,
    frames: u32,
    width: u32,
    height: u32,
    material_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("tryon session");
    println!("═════════════");
    println!();

    let config = match config_path {
        Some(path) => {
            println!("Config:    {path}");
            SessionConfig::from_toml_file(path)?
        }
        None => SessionConfig::default(),
    };
    let material = MaterialKind::from_name(material_name).ok_or_else(|| {
        let available: Vec<&str> = MaterialKind::ALL.iter().map(|m| m.name()).collect();
        format!(
            "Unknown material: '{material_name}'. Available: {}",
            available.join(", ")
        )
    })?;

    let provider = SwayingLandmarks::new(config.dt());
    let mut session = TryOnSession::new(config, Box::new(provider))?;
    session.events_mut().add_sink(Box::new(TracingSink::new()));

    let garment = GarmentAsset::new(
        tshirt_template(),
        material,
        Texture::solid(garment_colour(material)),
    );
    let id = session.load_garment(garment);
    session.start();
    session.try_on(&id)?;

    println!("Garment:   {id} ({material})");
    println!("Renderer:  {}", session.renderer_name());
    println!("Frame:     {width}x{height}, {frames} frames");
    println!();

    let background = gradient_background(width, height);
    let mut last = None;
    for _ in 0..frames {
        last = Some(session.process_frame(&background)?);
    }

    let counters = session.counters();
    let residual = match session.garment_handle(&id) {
        Some(handle) => session.engine().constraint_residual(handle)?.max,
        None => 0.0,
    };
    println!("  Frames:        {}", counters.frames);
    println!("  Avg latency:   {:.3}ms", counters.average_latency_ms);
    println!("  FPS:           {:.1}", counters.fps);
    println!("  Contacts:      {}", session.last_step_stats().contacts);
    println!("  Max stretch:   {residual:.5}");
    println!();

    if let (Some(path), Some(frame)) = (output_path, last) {
        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, frame.pixels)
            .ok_or("composited frame has the wrong buffer size")?;
        buffer.save(path)?;
        println!("Last frame written to: {path}");
    }

    session.stop();
    Ok(())
}

/// Validate a config or mesh file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("tryon validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match SessionConfig::from_toml_file(path) {
            Ok(config) => println!(
                "✅ Config is valid ({} fps, {} garments, {} iterations).",
                config.target_fps, config.max_garments, config.cloth.iterations
            ),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: tryon_mesh::TriangleMesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh).");
    }

    Ok(())
}

/// Print the default config.
pub fn default_config() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", SessionConfig::default().to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryon_body::Landmark;

    #[test]
    fn sway_is_centered_at_start() {
        let mut p = SwayingLandmarks::new(0.5);
        let bg = gradient_background(4, 4);
        let first = p.detect(&bg).unwrap().unwrap();
        let second = p.detect(&bg).unwrap().unwrap();
        let base = LandmarkFrame::reference_pose();
        assert_eq!(first.position(Landmark::Nose), base.position(Landmark::Nose));
        let dx = second.position(Landmark::Nose).x - base.position(Landmark::Nose).x;
        assert!((dx - 0.1 * 0.5f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn gradient_darkens_downwards() {
        let img = gradient_background(3, 10);
        assert_eq!(img.pixels.len(), 3 * 10 * 4);
        let top = img.pixel(0, 0).unwrap();
        let bottom = img.pixel(2, 9).unwrap();
        assert!(top[0] > bottom[0]);
        assert_eq!(bottom[3], 255);
    }

    #[test]
    fn every_material_has_an_opaque_colour() {
        for m in MaterialKind::ALL {
            assert_eq!(garment_colour(m)[3], 255);
        }
    }
}
