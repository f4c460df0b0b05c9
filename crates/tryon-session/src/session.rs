//! The try-on session: lifecycle, worn garments and the per-frame pipeline.

use std::time::Instant;

use glam::Vec3;
use tracing::{debug, info, trace};
use tryon_body::BodyProxyBuilder;
use tryon_material::Texture;
use tryon_mesh::normals::compute_vertex_normals;
use tryon_mesh::TriangleMesh;
use tryon_render::{Image, RenderItem, RenderStrategy, SoftwareRasterizer};
use tryon_solver::{ClothEngine, StepStats};
use tryon_telemetry::{EventBus, EventKind, PerformanceCounters, PerformanceSnapshot};
use tryon_types::{GarmentHandle, TryOnError, TryOnResult};

use crate::config::SessionConfig;
use crate::provider::LandmarkProvider;
use crate::registry::{GarmentAsset, GarmentRegistry};

/// A garment being simulated and drawn. `mesh` is the render copy whose
/// positions follow the garment's particles.
struct WornGarment {
    id: String,
    handle: GarmentHandle,
    mesh: TriangleMesh,
    texture: Texture,
}

/// One user's try-on session.
///
/// Frames are processed strictly one after another; nothing here is
/// shared with other sessions.
///
/// # Usage
///
/// ```text
/// let mut session = TryOnSession::new(config, Box::new(provider))?;
/// let id = session.load_garment(asset);
/// session.start();
/// session.try_on(&id)?;
/// loop {
///     let composited = session.process_frame(&camera_frame)?;
/// }
/// ```
pub struct TryOnSession {
    config: SessionConfig,
    provider: Box<dyn LandmarkProvider>,
    renderer: Box<dyn RenderStrategy>,
    proxy: BodyProxyBuilder,
    engine: ClothEngine,
    registry: GarmentRegistry,
    /// Oldest first.
    worn: Vec<WornGarment>,
    running: bool,
    frame_index: u64,
    last_background: Option<Image>,
    last_step: StepStats,
    counters: PerformanceCounters,
    events: EventBus,
}

impl TryOnSession {
    /// Creates a stopped session drawing with the software rasterizer.
    pub fn new(config: SessionConfig, provider: Box<dyn LandmarkProvider>) -> TryOnResult<Self> {
        config.validate()?;
        let renderer = SoftwareRasterizer::new(config.render.clone())?;
        Self::with_renderer(config, provider, Box::new(renderer))
    }

    /// Creates a stopped session drawing with `renderer`.
    pub fn with_renderer(
        config: SessionConfig,
        provider: Box<dyn LandmarkProvider>,
        renderer: Box<dyn RenderStrategy>,
    ) -> TryOnResult<Self> {
        config.validate()?;
        let engine = ClothEngine::new(config.cloth.clone())?;
        let proxy = BodyProxyBuilder::new(config.body.clone());
        info!(
            provider = provider.name(),
            renderer = renderer.name(),
            target_fps = config.target_fps,
            "Try-on session created"
        );
        Ok(Self {
            config,
            provider,
            renderer,
            proxy,
            engine,
            registry: GarmentRegistry::new(),
            worn: Vec::new(),
            running: false,
            frame_index: 0,
            last_background: None,
            last_step: StepStats::default(),
            counters: PerformanceCounters::new(),
            events: EventBus::new(),
        })
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames processed since the last start.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn engine(&self) -> &ClothEngine {
        &self.engine
    }

    pub fn registry(&self) -> &GarmentRegistry {
        &self.registry
    }

    /// The event bus, for attaching sinks.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn counters(&self) -> PerformanceSnapshot {
        self.counters.snapshot()
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.last_step
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    /// Ids of the garments being worn, oldest first.
    pub fn worn_garments(&self) -> Vec<&str> {
        self.worn.iter().map(|w| w.id.as_str()).collect()
    }

    pub fn garment_handle(&self, id: &str) -> Option<GarmentHandle> {
        self.worn.iter().find(|w| w.id == id).map(|w| w.handle)
    }

    /// The deformed render mesh of a worn garment.
    pub fn garment_mesh(&self, id: &str) -> Option<&TriangleMesh> {
        self.worn.iter().find(|w| w.id == id).map(|w| &w.mesh)
    }

    // ─── Lifecycle ────────────────────────────────────────────

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.frame_index = 0;
        self.events.set_frame(0);
        self.counters.reset();
        self.emit(EventKind::SessionStarted);
        self.events.flush();
        info!("Try-on session started");
    }

    /// Stops the session and discards all simulation state. Loaded
    /// garments stay in the registry.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.engine.reset();
        self.proxy.reset();
        self.worn.clear();
        self.last_background = None;
        self.last_step = StepStats::default();
        self.running = false;
        self.emit(EventKind::SessionStopped);
        self.events.finalize();
        info!(frames = self.frame_index, "Try-on session stopped");
    }

    fn ensure_running(&self) -> TryOnResult<()> {
        if self.running {
            Ok(())
        } else {
            Err(TryOnError::SessionNotStarted)
        }
    }

    fn emit(&mut self, kind: EventKind) {
        self.events.emit(kind);
    }

    // ─── Garments ─────────────────────────────────────────────

    /// Registers a garment asset and returns its id.
    pub fn load_garment(&mut self, asset: GarmentAsset) -> String {
        let material = asset.material;
        let id = self.registry.insert(asset);
        debug!(%id, %material, "Garment loaded");
        id
    }

    /// Takes a garment off if worn and drops it from the registry.
    pub fn unload_garment(&mut self, id: &str) -> TryOnResult<()> {
        if !self.registry.contains(id) {
            return Err(TryOnError::UnknownGarment(id.to_string()));
        }
        if self.garment_handle(id).is_some() {
            self.remove_garment(id)?;
        }
        self.registry.remove(id);
        Ok(())
    }

    /// Starts simulating and drawing a loaded garment.
    ///
    /// Trying on a garment that is already worn returns its handle. When
    /// the garment limit is exceeded the oldest worn garment is evicted.
    /// A garment without a mesh fails with [`TryOnError::NoMesh`] and
    /// leaves the session untouched.
    pub fn try_on(&mut self, id: &str) -> TryOnResult<GarmentHandle> {
        self.ensure_running()?;
        if let Some(handle) = self.garment_handle(id) {
            return Ok(handle);
        }
        let asset = self
            .registry
            .get(id)
            .ok_or_else(|| TryOnError::UnknownGarment(id.to_string()))?;
        let Some(mesh) = asset.mesh.as_ref() else {
            return Err(TryOnError::NoMesh);
        };

        let handle = self.engine.add_garment(Some(mesh), asset.material)?;
        let material = asset.material.name().to_string();
        self.worn.push(WornGarment {
            id: id.to_string(),
            handle,
            mesh: mesh.clone(),
            texture: asset.texture.clone(),
        });
        self.emit(EventKind::GarmentAdded {
            id: id.to_string(),
            handle,
            material,
        });
        info!(%id, %handle, "Garment tried on");

        while self.worn.len() > self.config.max_garments {
            let oldest = self.worn.remove(0);
            self.engine.remove_garment(oldest.handle)?;
            info!(id = %oldest.id, handle = %oldest.handle, "Garment evicted to stay within limit");
            self.emit(EventKind::GarmentEvicted {
                id: oldest.id,
                handle: oldest.handle,
            });
        }
        Ok(handle)
    }

    /// Takes a worn garment off. Its particle range is tombstoned.
    pub fn remove_garment(&mut self, id: &str) -> TryOnResult<()> {
        let pos = self
            .worn
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| TryOnError::UnknownGarment(id.to_string()))?;
        self.engine.remove_garment(self.worn[pos].handle)?;
        let removed = self.worn.remove(pos);
        info!(%id, handle = %removed.handle, "Garment removed");
        self.emit(EventKind::GarmentRemoved {
            id: removed.id,
            handle: removed.handle,
        });
        Ok(())
    }

    /// Takes every garment off and reclaims all particle slots. The
    /// current collision body is kept. Returns how many were removed.
    pub fn remove_all_garments(&mut self) -> usize {
        let removed = std::mem::take(&mut self.worn);
        let primitives = self.engine.primitives().to_vec();
        self.engine.reset();
        self.engine.update_collision_body(&primitives);
        for garment in &removed {
            self.emit(EventKind::GarmentRemoved {
                id: garment.id.clone(),
                handle: garment.handle,
            });
        }
        if !removed.is_empty() {
            info!(count = removed.len(), "All garments removed");
        }
        removed.len()
    }

    /// Adds an acceleration applied to every garment during the next frame.
    pub fn apply_external_force(&mut self, acceleration: Vec3) {
        self.engine.apply_external_force(acceleration);
    }

    // ─── Frames ───────────────────────────────────────────────

    /// Runs the full pipeline for one camera frame and returns the
    /// composited image.
    ///
    /// Malformed frames are rejected before any state changes.
    pub fn process_frame(&mut self, background: &Image) -> TryOnResult<Image> {
        self.ensure_running()?;
        check_background(background)?;
        let started = Instant::now();

        match self.provider.detect(background)? {
            Some(landmarks) => {
                let primitives = self.proxy.build(&landmarks);
                self.engine.update_collision_body(&primitives);
                self.emit(EventKind::PoseUpdated {
                    confidence: landmarks.confidence,
                    primitives: primitives.len(),
                });
            }
            None => trace!(frame = self.frame_index, "No body detected, keeping previous proxy"),
        }

        let stats = self.engine.step(self.config.dt())?;
        self.last_step = stats;

        for garment in &mut self.worn {
            let positions = self.engine.particle_positions(garment.handle)?;
            garment.mesh.set_positions(&positions)?;
            compute_vertex_normals(&mut garment.mesh);
        }

        let items: Vec<RenderItem<'_>> = self
            .worn
            .iter()
            .map(|w| RenderItem {
                mesh: &w.mesh,
                texture: &w.texture,
            })
            .collect();
        let output = self.renderer.render(background, &items)?;
        self.last_background = Some(background.clone());

        let latency = started.elapsed();
        self.counters.record_frame(latency, Instant::now());
        self.emit(EventKind::FrameProcessed {
            latency_ms: latency.as_secs_f64() * 1000.0,
            fps: self.counters.fps(),
            garments: self.worn.len(),
            contacts: stats.contacts,
        });
        self.frame_index += 1;
        self.events.set_frame(self.frame_index);
        self.events.flush();
        Ok(output)
    }

    /// Re-renders the current garments over the last processed frame.
    pub fn capture_snapshot(&mut self) -> TryOnResult<Image> {
        self.ensure_running()?;
        let background = self
            .last_background
            .as_ref()
            .ok_or_else(|| TryOnError::NotInitialized("no frame processed yet".into()))?;
        let items: Vec<RenderItem<'_>> = self
            .worn
            .iter()
            .map(|w| RenderItem {
                mesh: &w.mesh,
                texture: &w.texture,
            })
            .collect();
        self.renderer.render(background, &items)
    }
}

fn check_background(background: &Image) -> TryOnResult<()> {
    if background.is_empty() {
        return Err(TryOnError::NotInitialized(
            "camera frame has no pixels".into(),
        ));
    }
    let expected = background.width as usize * background.height as usize * 4;
    if background.pixels.len() != expected {
        return Err(TryOnError::DimensionMismatch {
            width: background.width,
            height: background.height,
            expected,
            actual: background.pixels.len(),
        });
    }
    Ok(())
}
