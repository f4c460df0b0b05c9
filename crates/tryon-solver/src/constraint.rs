//! Distance (stretch) constraints.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tryon_mesh::Topology;
use tryon_types::constants::CONSTRAINT_EPSILON;

use crate::state::ParticleState;

/// Keeps two particles at their rest separation.
///
/// Immutable after creation apart from tombstoning (stiffness set to 0)
/// when the owning garment is removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    /// Global particle indices.
    pub a: u32,
    pub b: u32,
    /// Separation at creation time.
    pub rest_length: f32,
    /// Fraction of the error corrected per projection, in [0, 1].
    pub stiffness: f32,
}

impl DistanceConstraint {
    /// One constraint per unique topology edge, in edge order, with rest
    /// lengths taken from the current particle positions.
    pub fn from_topology(
        topology: &Topology,
        particles: &ParticleState,
        offset: u32,
        stiffness: f32,
    ) -> Vec<Self> {
        topology
            .edges
            .iter()
            .map(|&[i, j]| {
                let a = offset + i;
                let b = offset + j;
                let rest_length = particles
                    .position(a as usize)
                    .distance(particles.position(b as usize));
                Self {
                    a,
                    b,
                    rest_length,
                    stiffness,
                }
            })
            .collect()
    }

    /// Current length minus rest length.
    pub fn error(&self, particles: &ParticleState) -> f32 {
        particles
            .position(self.a as usize)
            .distance(particles.position(self.b as usize))
            - self.rest_length
    }

    /// Moves both ends toward the rest length, split by inverse mass.
    ///
    /// Both ends immovable, or ends closer than [`CONSTRAINT_EPSILON`]:
    /// no correction.
    #[inline]
    pub fn project(&self, particles: &mut ParticleState) {
        let (a, b) = (self.a as usize, self.b as usize);
        let wa = particles.inv_mass[a];
        let wb = particles.inv_mass[b];
        let w = wa + wb;
        if w == 0.0 {
            return;
        }

        let pa = particles.position(a);
        let pb = particles.position(b);
        let delta: Vec3 = pa - pb;
        let dist = delta.length();
        if dist < CONSTRAINT_EPSILON {
            return;
        }

        let correction = (dist - self.rest_length) / w * self.stiffness;
        let step = delta / dist * correction;
        if wa > 0.0 {
            particles.set_position(a, pa - step * wa);
        }
        if wb > 0.0 {
            particles.set_position(b, pb + step * wb);
        }
    }
}
