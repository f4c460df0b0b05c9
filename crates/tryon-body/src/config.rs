//! Body proxy configuration.

use serde::{Deserialize, Serialize};
use tryon_types::{TryOnError, TryOnResult};

use crate::landmark::Landmark;

/// Collision sphere radius per body part, in body-space units.
///
/// Left and right sides share a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusPresets {
    pub head: f32,
    pub shoulder: f32,
    pub elbow: f32,
    pub wrist: f32,
    pub hip: f32,
    pub knee: f32,
    pub ankle: f32,
}

impl Default for RadiusPresets {
    fn default() -> Self {
        Self {
            head: 0.12,
            shoulder: 0.08,
            elbow: 0.06,
            wrist: 0.05,
            hip: 0.1,
            knee: 0.07,
            ankle: 0.05,
        }
    }
}

impl RadiusPresets {
    /// Landmarks that produce a collision primitive, in emission order.
    pub const PRIMITIVE_LANDMARKS: [Landmark; 13] = [
        Landmark::Nose,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    /// Radius for a landmark, or `None` if the landmark has no primitive.
    pub fn radius_for(&self, landmark: Landmark) -> Option<f32> {
        match landmark {
            Landmark::Nose => Some(self.head),
            Landmark::LeftShoulder | Landmark::RightShoulder => Some(self.shoulder),
            Landmark::LeftElbow | Landmark::RightElbow => Some(self.elbow),
            Landmark::LeftWrist | Landmark::RightWrist => Some(self.wrist),
            Landmark::LeftHip | Landmark::RightHip => Some(self.hip),
            Landmark::LeftKnee | Landmark::RightKnee => Some(self.knee),
            Landmark::LeftAnkle | Landmark::RightAnkle => Some(self.ankle),
            _ => None,
        }
    }

    fn values(&self) -> [(&'static str, f32); 7] {
        [
            ("head", self.head),
            ("shoulder", self.shoulder),
            ("elbow", self.elbow),
            ("wrist", self.wrist),
            ("hip", self.hip),
            ("knee", self.knee),
            ("ankle", self.ankle),
        ]
    }
}

/// Configuration for [`crate::BodyProxyBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyProxyConfig {
    /// Blend landmarks with the previous frame before use.
    pub smoothing_enabled: bool,
    /// Weight of the previous frame in [0, 1). 0 disables smoothing.
    pub smoothing: f32,
    /// Sphere radius per body part.
    pub radii: RadiusPresets,
}

impl Default for BodyProxyConfig {
    fn default() -> Self {
        Self {
            smoothing_enabled: true,
            smoothing: 0.5,
            radii: RadiusPresets::default(),
        }
    }
}

impl BodyProxyConfig {
    pub fn validate(&self) -> TryOnResult<()> {
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(TryOnError::InvalidConfig(format!(
                "smoothing {} must be in [0, 1)",
                self.smoothing
            )));
        }
        for (name, r) in self.radii.values() {
            if !(r > 0.0) {
                return Err(TryOnError::InvalidConfig(format!(
                    "{name} radius {r} must be positive"
                )));
            }
        }
        Ok(())
    }
}
