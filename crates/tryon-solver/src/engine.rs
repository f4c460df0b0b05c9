//! The cloth engine: particle arena, garment ranges and the per-frame step.

use glam::Vec3;
use tracing::{debug, trace};
use tryon_body::{CollisionPrimitive, Landmark, LANDMARK_COUNT};
use tryon_material::MaterialKind;
use tryon_mesh::{Topology, TriangleMesh};
use tryon_types::{GarmentHandle, TryOnError, TryOnResult};

use crate::config::{AnchorHeuristic, ClothConfig};
use crate::constraint::DistanceConstraint;
use crate::state::ParticleState;

/// A garment's slice of the particle and constraint arrays.
///
/// Slices never overlap. Removed garments keep their slice (tombstoned)
/// so indices held by other garments' constraints stay valid.
#[derive(Debug, Clone, PartialEq)]
pub struct GarmentRange {
    pub particle_start: usize,
    pub particle_count: usize,
    pub constraint_start: usize,
    pub constraint_count: usize,
    pub material: MaterialKind,
    pub active: bool,
}

/// Diagnostics from one [`ClothEngine::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Relaxation iterations performed.
    pub iterations: u32,
    /// Free particles that touched a primitive during the step.
    pub contacts: usize,
    /// Anchored particles that followed a live primitive.
    pub anchored: usize,
}

/// Constraint error summary for a garment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstraintResidual {
    /// Σ |length - rest|.
    pub total: f32,
    /// max |length - rest|.
    pub max: f32,
}

/// Position-based dynamics cloth engine.
///
/// # Usage
///
/// ```text
/// let handle = engine.add_garment(Some(&mesh), MaterialKind::Cotton)?;
/// loop {
///     engine.update_collision_body(&primitives);
///     engine.step(dt)?;
///     let positions = engine.particle_positions(handle)?;
/// }
/// ```
pub struct ClothEngine {
    config: ClothConfig,
    particles: ParticleState,
    constraints: Vec<DistanceConstraint>,
    garments: Vec<GarmentRange>,
    primitives: Vec<CollisionPrimitive>,
    anchor_targets: [Option<Vec3>; LANDMARK_COUNT],
    external_acceleration: Vec3,
}

impl ClothEngine {
    pub fn new(config: ClothConfig) -> TryOnResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            particles: ParticleState::default(),
            constraints: Vec::new(),
            garments: Vec::new(),
            primitives: Vec::new(),
            anchor_targets: [None; LANDMARK_COUNT],
            external_acceleration: Vec3::ZERO,
        })
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleState {
        &self.particles
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn primitives(&self) -> &[CollisionPrimitive] {
        &self.primitives
    }

    /// Total particle slots, including tombstoned ones.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of garments currently simulated.
    pub fn active_garment_count(&self) -> usize {
        self.garments.iter().filter(|g| g.active).count()
    }

    /// Handles of garments currently simulated, oldest first.
    pub fn active_garments(&self) -> impl Iterator<Item = GarmentHandle> + '_ {
        self.garments
            .iter()
            .enumerate()
            .filter(|(_, g)| g.active)
            .map(|(i, _)| GarmentHandle(i as u32))
    }

    pub fn garment_range(&self, handle: GarmentHandle) -> Option<&GarmentRange> {
        self.garments.get(handle.index())
    }

    fn active_range(&self, handle: GarmentHandle) -> TryOnResult<&GarmentRange> {
        match self.garments.get(handle.index()) {
            Some(range) if range.active => Ok(range),
            _ => Err(TryOnError::UnknownGarment(handle.to_string())),
        }
    }

    // ─── Garment lifecycle ─────────────────────────────────────

    /// Adds a garment: one particle per vertex at rest, one stretch
    /// constraint per unique edge with rest length from the current shape.
    ///
    /// Fails with [`TryOnError::NoMesh`] when `mesh` is `None` and with
    /// [`TryOnError::InvalidMesh`] for malformed meshes. Either way the
    /// engine is left untouched.
    pub fn add_garment(
        &mut self,
        mesh: Option<&TriangleMesh>,
        material: MaterialKind,
    ) -> TryOnResult<GarmentHandle> {
        let mesh = mesh.ok_or(TryOnError::NoMesh)?;
        mesh.validate()?;
        if mesh.vertex_count() == 0 {
            return Err(TryOnError::InvalidMesh("Garment mesh has no vertices".into()));
        }

        let props = *self.config.materials.get(material);
        let inv_mass = props.inverse_mass();
        let particle_start = self.particles.len();
        let constraint_start = self.constraints.len();

        for i in 0..mesh.vertex_count() {
            self.particles.push(mesh.position(i), inv_mass);
        }

        let topology = Topology::build(mesh);
        let constraints = DistanceConstraint::from_topology(
            &topology,
            &self.particles,
            particle_start as u32,
            props.stiffness,
        );
        let constraint_count = constraints.len();
        self.constraints.extend(constraints);

        if let Some(heuristic) = self.config.anchor {
            self.apply_anchor_heuristic(mesh, particle_start, heuristic);
        }

        let handle = GarmentHandle(self.garments.len() as u32);
        self.garments.push(GarmentRange {
            particle_start,
            particle_count: mesh.vertex_count(),
            constraint_start,
            constraint_count,
            material,
            active: true,
        });

        debug!(
            %handle,
            %material,
            particles = mesh.vertex_count(),
            constraints = constraint_count,
            "Garment added to simulation"
        );
        Ok(handle)
    }

    fn apply_anchor_heuristic(
        &mut self,
        mesh: &TriangleMesh,
        offset: usize,
        heuristic: AnchorHeuristic,
    ) {
        let Some(bounds) = mesh.bounding_box() else {
            return;
        };
        let threshold = bounds.max.y - heuristic.top_band * bounds.size().y;

        let mut left: Option<(usize, f32)> = None;
        let mut right: Option<(usize, f32)> = None;
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            if p.y < threshold {
                continue;
            }
            if left.map_or(true, |(_, x)| p.x < x) {
                left = Some((i, p.x));
            }
            if right.map_or(true, |(_, x)| p.x > x) {
                right = Some((i, p.x));
            }
        }

        if let Some((i, _)) = left {
            self.particles.pin(offset + i, Some(Landmark::LeftShoulder));
        }
        if let Some((i, _)) = right {
            if left.map(|(l, _)| l) != Some(i) {
                self.particles.pin(offset + i, Some(Landmark::RightShoulder));
            }
        }
    }

    /// Makes one vertex of a garment immovable. With an anchor it follows
    /// that landmark's primitive; without one it stays where it is.
    pub fn pin_vertex(
        &mut self,
        handle: GarmentHandle,
        vertex: usize,
        anchor: Option<Landmark>,
    ) -> TryOnResult<()> {
        let range = self.active_range(handle)?;
        if vertex >= range.particle_count {
            return Err(TryOnError::InvalidMesh(format!(
                "vertex {vertex} out of range for {handle} ({} vertices)",
                range.particle_count
            )));
        }
        let i = range.particle_start + vertex;
        self.particles.pin(i, anchor);
        Ok(())
    }

    /// Tombstones a garment's particles and constraints. Other garments'
    /// indices are unaffected.
    pub fn remove_garment(&mut self, handle: GarmentHandle) -> TryOnResult<()> {
        let range = self.active_range(handle)?.clone();

        for i in range.particle_start..range.particle_start + range.particle_count {
            self.particles.pin(i, None);
        }
        for c in &mut self.constraints[range.constraint_start..range.constraint_start + range.constraint_count] {
            c.stiffness = 0.0;
        }
        if let Some(slot) = self.garments.get_mut(handle.index()) {
            slot.active = false;
        }

        debug!(%handle, "Garment removed from simulation");
        Ok(())
    }

    /// Clears all particles, constraints, garments and collision state.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.constraints.clear();
        self.garments.clear();
        self.primitives.clear();
        self.anchor_targets = [None; LANDMARK_COUNT];
        self.external_acceleration = Vec3::ZERO;
        debug!("Cloth engine reset");
    }

    // ─── Inputs ───────────────────────────────────────────────

    /// Replaces the live collision primitives. Particle and constraint
    /// state is untouched.
    pub fn update_collision_body(&mut self, primitives: &[CollisionPrimitive]) {
        self.primitives.clear();
        self.primitives.extend_from_slice(primitives);
        self.anchor_targets = [None; LANDMARK_COUNT];
        for prim in primitives {
            if let Some(landmark) = prim.landmark {
                self.anchor_targets[landmark.index()] = Some(prim.center);
            }
        }
    }

    /// Adds an acceleration (wind, a tug) applied to free particles during
    /// the next step only.
    pub fn apply_external_force(&mut self, acceleration: Vec3) {
        self.external_acceleration += acceleration;
    }

    /// Overwrites a garment's particle positions and puts them at rest.
    /// Rest lengths are not changed.
    pub fn set_particle_positions(
        &mut self,
        handle: GarmentHandle,
        positions: &[Vec3],
    ) -> TryOnResult<()> {
        let range = self.active_range(handle)?;
        if positions.len() != range.particle_count {
            return Err(TryOnError::InvalidMesh(format!(
                "{} positions for {handle} with {} particles",
                positions.len(),
                range.particle_count
            )));
        }
        let start = range.particle_start;
        for (k, &p) in positions.iter().enumerate() {
            self.particles.set_position(start + k, p);
            self.particles.set_previous(start + k, p);
            self.particles.set_velocity(start + k, Vec3::ZERO);
        }
        Ok(())
    }

    // ─── Outputs ──────────────────────────────────────────────

    /// Current particle positions of a garment, in vertex order.
    pub fn particle_positions(&self, handle: GarmentHandle) -> TryOnResult<Vec<Vec3>> {
        let range = self.active_range(handle)?;
        Ok((range.particle_start..range.particle_start + range.particle_count)
            .map(|i| self.particles.position(i))
            .collect())
    }

    /// Current particle velocities of a garment, in vertex order.
    pub fn particle_velocities(&self, handle: GarmentHandle) -> TryOnResult<Vec<Vec3>> {
        let range = self.active_range(handle)?;
        Ok((range.particle_start..range.particle_start + range.particle_count)
            .map(|i| self.particles.velocity(i))
            .collect())
    }

    /// Stretch error over a garment's constraints.
    pub fn constraint_residual(&self, handle: GarmentHandle) -> TryOnResult<ConstraintResidual> {
        let range = self.active_range(handle)?;
        let slice = &self.constraints[range.constraint_start..range.constraint_start + range.constraint_count];
        Ok(slice.iter().fold(ConstraintResidual::default(), |acc, c| {
            let err = c.error(&self.particles).abs();
            ConstraintResidual {
                total: acc.total + err,
                max: acc.max.max(err),
            }
        }))
    }

    // ─── Simulation ───────────────────────────────────────────

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> TryOnResult<StepStats> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(TryOnError::InvalidConfig(format!(
                "timestep {dt} must be finite and positive"
            )));
        }

        let anchored = self.apply_forces(dt);
        self.relax(self.config.iterations);
        let contacts = self.update_velocities(dt);
        self.external_acceleration = Vec3::ZERO;

        let stats = StepStats {
            iterations: self.config.iterations,
            contacts,
            anchored,
        };
        trace!(
            particles = self.particles.len(),
            contacts,
            anchored,
            "Cloth step"
        );
        Ok(stats)
    }

    /// Phase a: gravity, drag and tentative integration for free particles;
    /// anchored particles snap to their primitive. Returns how many snapped.
    fn apply_forces(&mut self, dt: f32) -> usize {
        let accel = self.config.gravity_vector() + self.external_acceleration;
        let drag = 1.0 - self.config.air_drag;
        let ground = self.config.ground_height;
        let mut anchored = 0;

        for i in 0..self.particles.len() {
            self.particles.contact[i] = None;

            if !self.particles.is_free(i) {
                let target = self.particles.anchor[i].and_then(|lm| self.anchor_targets[lm.index()]);
                if let Some(center) = target {
                    self.particles.set_position(i, center);
                    self.particles.set_previous(i, center);
                    anchored += 1;
                }
                continue;
            }

            let v = (self.particles.velocity(i) + accel * dt) * drag;
            let p = self.particles.position(i);
            self.particles.set_velocity(i, v);
            self.particles.set_previous(i, p);

            let mut next = p + v * dt;
            if let Some(floor) = ground {
                next.y = next.y.max(floor);
            }
            self.particles.set_position(i, next);
        }
        anchored
    }

    /// Phases b and c: `iterations` rounds of constraint projection, each
    /// followed by one collision pass.
    pub fn relax(&mut self, iterations: u32) {
        for _ in 0..iterations {
            for c in &self.constraints {
                c.project(&mut self.particles);
            }
            self.resolve_collisions();
        }
    }

    /// One collision pass: pushes every free particle out of every
    /// primitive it penetrates. Returns the number of corrections.
    pub fn resolve_collisions(&mut self) -> usize {
        if self.primitives.is_empty() {
            return 0;
        }
        let margin = self.config.collision_margin;
        let mut corrections = 0;

        for i in 0..self.particles.len() {
            if !self.particles.is_free(i) {
                continue;
            }
            for prim in &self.primitives {
                if let Some(contact) = prim.resolve(self.particles.position(i), margin) {
                    self.particles.set_position(i, contact.position);
                    self.particles.contact[i] = Some(contact.normal);
                    corrections += 1;
                }
            }
        }
        corrections
    }

    /// Phase d: v = (p - prev) / dt, contact friction, global damping.
    /// Returns the number of particles in contact.
    fn update_velocities(&mut self, dt: f32) -> usize {
        let inv_dt = 1.0 / dt;
        let keep_tangential = 1.0 - self.config.friction;
        let damping = self.config.damping;
        let mut contacts = 0;

        for i in 0..self.particles.len() {
            if !self.particles.is_free(i) {
                continue;
            }
            let mut v = (self.particles.position(i) - self.particles.previous(i)) * inv_dt;

            if let Some(n) = self.particles.contact[i] {
                let vn = v.dot(n);
                let tangential = v - n * vn;
                v = n * vn.max(0.0) + tangential * keep_tangential;
                contacts += 1;
            }

            self.particles.set_velocity(i, v * damping);
        }
        contacts
    }
}
