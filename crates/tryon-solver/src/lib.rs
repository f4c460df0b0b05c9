//! # tryon-solver
//!
//! Position-based dynamics for garments worn on a tracked body.
//!
//! ## Key Types
//!
//! - [`ClothEngine`] — particle arena, constraints and the per-frame step
//! - [`ParticleState`] — SoA buffers for positions, velocities, inverse masses
//! - [`DistanceConstraint`] — stretch constraint derived from a mesh edge
//! - [`ClothConfig`] — gravity, damping, iteration count, material table
//!
//! ## Step phases
//!
//! ```text
//! a. forces     v += (g + ext)·dt, v *= 1 - drag, prev = p, p += v·dt
//!               anchored particles snap to their primitive center
//! b/c. relax    for each iteration: all constraints, then all primitives
//! d. velocity   v = (p - prev) / dt, contact friction, v *= damping
//! ```

pub mod config;
pub mod constraint;
pub mod engine;
pub mod state;

pub use config::{AnchorHeuristic, ClothConfig};
pub use constraint::DistanceConstraint;
pub use engine::{ClothEngine, ConstraintResidual, GarmentRange, StepStats};
pub use state::ParticleState;
