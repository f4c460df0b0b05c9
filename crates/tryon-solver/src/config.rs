//! Cloth engine configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tryon_material::MaterialTable;
use tryon_types::constants::{
    DEFAULT_COLLISION_MARGIN, DEFAULT_DAMPING, DEFAULT_SOLVER_ITERATIONS, GRAVITY,
};
use tryon_types::{TryOnError, TryOnResult};

/// Picks shoulder anchors when a garment enters simulation.
///
/// Among vertices in the top `top_band` fraction of the garment's height,
/// the leftmost is anchored to the left shoulder and the rightmost to the
/// right shoulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorHeuristic {
    pub top_band: f32,
}

impl Default for AnchorHeuristic {
    fn default() -> Self {
        Self { top_band: 0.05 }
    }
}

/// Configuration for [`crate::ClothEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Gravity magnitude in m/s².
    pub gravity: f32,

    /// Gravity direction, normalized on use.
    pub gravity_direction: [f32; 3],

    /// Velocity loss applied during force application: v *= 1 - air_drag.
    pub air_drag: f32,

    /// Global damping multiplier applied to derived velocities.
    pub damping: f32,

    /// Constraint relaxation iterations per step.
    pub iterations: u32,

    /// Thickness added to every collision primitive radius.
    pub collision_margin: f32,

    /// Tangential velocity loss for particles in contact, in [0, 1].
    pub friction: f32,

    /// Floor height. Free particles never integrate below it.
    pub ground_height: Option<f32>,

    /// Shoulder anchoring on garment add. `None` leaves every particle free.
    pub anchor: Option<AnchorHeuristic>,

    /// Stiffness and particle mass per material category.
    pub materials: MaterialTable,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            gravity_direction: [0.0, -1.0, 0.0],
            air_drag: 0.01,
            damping: DEFAULT_DAMPING,
            iterations: DEFAULT_SOLVER_ITERATIONS,
            collision_margin: DEFAULT_COLLISION_MARGIN,
            friction: 0.5,
            ground_height: Some(-2.0),
            anchor: Some(AnchorHeuristic::default()),
            materials: MaterialTable::default(),
        }
    }
}

impl ClothConfig {
    /// Fewer iterations, for debugging and quick previews.
    pub fn debug() -> Self {
        Self {
            iterations: 3,
            ..Default::default()
        }
    }

    /// More iterations for stiffer, less stretchy drapes.
    pub fn high_quality() -> Self {
        Self {
            iterations: 30,
            ..Default::default()
        }
    }

    /// No gravity, drag, floor or anchors. Constraint-only behaviour.
    pub fn static_relaxation() -> Self {
        Self {
            gravity: 0.0,
            air_drag: 0.0,
            damping: 1.0,
            ground_height: None,
            anchor: None,
            ..Default::default()
        }
    }

    /// Gravity acceleration vector.
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::from_array(self.gravity_direction).normalize_or_zero() * self.gravity
    }

    pub fn validate(&self) -> TryOnResult<()> {
        if self.iterations == 0 {
            return Err(TryOnError::InvalidConfig(
                "solver iterations must be at least 1".into(),
            ));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(TryOnError::InvalidConfig(format!(
                "gravity magnitude {} must be finite and non-negative",
                self.gravity
            )));
        }
        for (name, value) in [
            ("air_drag", self.air_drag),
            ("damping", self.damping),
            ("friction", self.friction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TryOnError::InvalidConfig(format!(
                    "{name} {value} is outside [0, 1]"
                )));
            }
        }
        if !(self.collision_margin >= 0.0) {
            return Err(TryOnError::InvalidConfig(format!(
                "collision margin {} must be non-negative",
                self.collision_margin
            )));
        }
        if let Some(anchor) = &self.anchor {
            if !(0.0..=1.0).contains(&anchor.top_band) {
                return Err(TryOnError::InvalidConfig(format!(
                    "anchor top band {} is outside [0, 1]",
                    anchor.top_band
                )));
            }
        }
        self.materials.validate()
    }
}
