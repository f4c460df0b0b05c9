//! Session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tryon_body::BodyProxyConfig;
use tryon_render::RenderConfig;
use tryon_solver::ClothConfig;
use tryon_types::constants::{DEFAULT_MAX_GARMENTS, DEFAULT_TARGET_FPS};
use tryon_types::{TryOnError, TryOnResult};

/// Everything a [`TryOnSession`](crate::TryOnSession) needs, with defaults
/// for every field so partial TOML files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frames per second the simulation is stepped at (`dt = 1 / target_fps`).
    pub target_fps: u32,
    /// Garments worn at once. Trying on one more evicts the oldest.
    pub max_garments: usize,
    pub cloth: ClothConfig,
    pub body: BodyProxyConfig,
    pub render: RenderConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_garments: DEFAULT_MAX_GARMENTS,
            cloth: ClothConfig::default(),
            body: BodyProxyConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Fewer solver iterations, for interactive debugging.
    pub fn debug() -> Self {
        Self {
            cloth: ClothConfig::debug(),
            ..Default::default()
        }
    }

    /// More solver iterations and a single garment.
    pub fn high_quality() -> Self {
        Self {
            max_garments: 1,
            cloth: ClothConfig::high_quality(),
            ..Default::default()
        }
    }

    /// Simulation timestep in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    pub fn from_toml_str(content: &str) -> TryOnResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TryOnError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> TryOnResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> TryOnResult<String> {
        toml::to_string_pretty(self).map_err(|e| TryOnError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> TryOnResult<()> {
        if self.target_fps == 0 {
            return Err(TryOnError::InvalidConfig(
                "target_fps must be positive".into(),
            ));
        }
        if self.max_garments == 0 {
            return Err(TryOnError::InvalidConfig(
                "max_garments must be at least 1".into(),
            ));
        }
        self.cloth.validate()?;
        self.body.validate()?;
        self.render.validate()
    }
}
