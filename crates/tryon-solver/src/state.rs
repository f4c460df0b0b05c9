//! Particle state — SoA buffers for every simulated particle.
//!
//! One particle per garment mesh vertex. Garments own contiguous slices of
//! these buffers; slices of removed garments are tombstoned, not compacted.

use glam::Vec3;
use tryon_body::Landmark;

/// SoA particle buffers shared by all garments in the engine.
///
/// # Layout
///
/// All arrays have length `len()`:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// prev_x: ...
/// vel_x: ...
/// inv_mass: [w0, w1, ...]   0 = immovable
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleState {
    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Position at the start of the step ───
    pub prev_x: Vec<f32>,
    pub prev_y: Vec<f32>,
    pub prev_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    /// Inverse mass. Zero marks a pinned or anchored particle.
    pub inv_mass: Vec<f32>,

    /// Landmark whose primitive an immovable particle follows.
    pub anchor: Vec<Option<Landmark>>,

    /// Outward normal of the last contact during the current step.
    pub contact: Vec<Option<Vec3>>,
}

impl ParticleState {
    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    /// Appends a particle at rest.
    pub fn push(&mut self, position: Vec3, inv_mass: f32) {
        self.pos_x.push(position.x);
        self.pos_y.push(position.y);
        self.pos_z.push(position.z);
        self.prev_x.push(position.x);
        self.prev_y.push(position.y);
        self.prev_z.push(position.z);
        self.vel_x.push(0.0);
        self.vel_y.push(0.0);
        self.vel_z.push(0.0);
        self.inv_mass.push(inv_mass);
        self.anchor.push(None);
        self.contact.push(None);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    #[inline]
    pub fn previous(&self, i: usize) -> Vec3 {
        Vec3::new(self.prev_x[i], self.prev_y[i], self.prev_z[i])
    }

    #[inline]
    pub fn set_previous(&mut self, i: usize, p: Vec3) {
        self.prev_x[i] = p.x;
        self.prev_y[i] = p.y;
        self.prev_z[i] = p.z;
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    #[inline]
    pub fn is_free(&self, i: usize) -> bool {
        self.inv_mass[i] > 0.0
    }

    /// Makes a particle immovable, optionally following a landmark.
    pub fn pin(&mut self, i: usize, anchor: Option<Landmark>) {
        self.inv_mass[i] = 0.0;
        self.anchor[i] = anchor;
        self.set_velocity(i, Vec3::ZERO);
    }

    /// Total kinetic energy over free particles: 0.5 · Σ m_i · |v_i|².
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.len() {
            if !self.is_free(i) {
                continue;
            }
            let m = 1.0 / self.inv_mass[i] as f64;
            energy += 0.5 * m * self.velocity(i).length_squared() as f64;
        }
        energy
    }
}
