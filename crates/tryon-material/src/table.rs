//! Per-material simulation presets.
//!
//! Structural wovens (cotton, denim, leather) get stiff stretch
//! constraints and heavier particles; silk and polyester are soft and
//! light, producing flowing drapes.

use serde::{Deserialize, Serialize};
use tryon_types::{TryOnError, TryOnResult};

use crate::kind::MaterialKind;

/// Simulation parameters for one material category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Stretch constraint stiffness in [0, 1]. 1 = fully rigid edges.
    pub stiffness: f32,
    /// Mass of each particle. Free particles get `inv_mass = 1 / mass`.
    pub particle_mass: f32,
}

impl MaterialProperties {
    pub const fn new(stiffness: f32, particle_mass: f32) -> Self {
        Self {
            stiffness,
            particle_mass,
        }
    }

    /// Inverse mass assigned to free particles of this material.
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.particle_mass
    }
}

/// Stiffness/mass table keyed by [`MaterialKind`].
///
/// One field per category so the table reads naturally in TOML:
///
/// ```toml
/// [cloth.materials.silk]
/// stiffness = 0.4
/// particle_mass = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialTable {
    pub cotton: MaterialProperties,
    pub silk: MaterialProperties,
    pub denim: MaterialProperties,
    pub leather: MaterialProperties,
    pub velvet: MaterialProperties,
    pub wool: MaterialProperties,
    pub polyester: MaterialProperties,
    pub custom: MaterialProperties,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            cotton: MaterialProperties::new(0.9, 1.0),
            silk: MaterialProperties::new(0.5, 0.5),
            denim: MaterialProperties::new(1.0, 1.5),
            leather: MaterialProperties::new(0.95, 2.0),
            velvet: MaterialProperties::new(0.8, 1.2),
            wool: MaterialProperties::new(0.85, 1.3),
            polyester: MaterialProperties::new(0.7, 0.8),
            custom: MaterialProperties::new(0.9, 1.0),
        }
    }
}

impl MaterialTable {
    /// Looks up the preset for a material category.
    pub fn get(&self, kind: MaterialKind) -> &MaterialProperties {
        match kind {
            MaterialKind::Cotton => &self.cotton,
            MaterialKind::Silk => &self.silk,
            MaterialKind::Denim => &self.denim,
            MaterialKind::Leather => &self.leather,
            MaterialKind::Velvet => &self.velvet,
            MaterialKind::Wool => &self.wool,
            MaterialKind::Polyester => &self.polyester,
            MaterialKind::Custom => &self.custom,
        }
    }

    /// Replaces the preset for a material category.
    pub fn set(&mut self, kind: MaterialKind, props: MaterialProperties) {
        let slot = match kind {
            MaterialKind::Cotton => &mut self.cotton,
            MaterialKind::Silk => &mut self.silk,
            MaterialKind::Denim => &mut self.denim,
            MaterialKind::Leather => &mut self.leather,
            MaterialKind::Velvet => &mut self.velvet,
            MaterialKind::Wool => &mut self.wool,
            MaterialKind::Polyester => &mut self.polyester,
            MaterialKind::Custom => &mut self.custom,
        };
        *slot = props;
    }

    /// Rejects stiffness outside [0, 1] and non-positive masses.
    pub fn validate(&self) -> TryOnResult<()> {
        for kind in MaterialKind::ALL {
            let props = self.get(kind);
            if !(0.0..=1.0).contains(&props.stiffness) {
                return Err(TryOnError::InvalidConfig(format!(
                    "{kind} stiffness {} is outside [0, 1]",
                    props.stiffness
                )));
            }
            if !(props.particle_mass > 0.0) {
                return Err(TryOnError::InvalidConfig(format!(
                    "{kind} particle mass {} must be positive",
                    props.particle_mass
                )));
            }
        }
        Ok(())
    }
}
