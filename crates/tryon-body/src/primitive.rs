//! Collision primitives.
//!
//! A primitive is rebuilt from the latest landmark set every frame and
//! never persisted. Capsule-shaped limbs are approximated by spheres at
//! the joint landmarks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;

/// Below this distance from the center a point has no usable radial
/// direction and is pushed out along +Y.
const CENTER_EPSILON: f32 = 1.0e-6;

/// Shape tag of a collision primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveShape {
    #[default]
    Sphere,
}

/// A collision sphere, optionally tied to the landmark it follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPrimitive {
    pub shape: PrimitiveShape,
    /// Landmark this primitive tracks. Anchored particles look their
    /// primitive up by this tag.
    pub landmark: Option<Landmark>,
    pub center: Vec3,
    pub radius: f32,
}

/// Result of pushing a point out of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Corrected position on the inflated surface.
    pub position: Vec3,
    /// Outward unit normal at the contact.
    pub normal: Vec3,
    /// How far inside the inflated surface the point was.
    pub depth: f32,
}

impl CollisionPrimitive {
    /// A free-standing sphere not tied to any landmark.
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self {
            shape: PrimitiveShape::Sphere,
            landmark: None,
            center,
            radius,
        }
    }

    /// A sphere following `landmark`.
    pub fn at_landmark(landmark: Landmark, center: Vec3, radius: f32) -> Self {
        Self {
            landmark: Some(landmark),
            ..Self::sphere(center, radius)
        }
    }

    /// Pushes `point` radially out to `radius + margin` if it lies inside.
    ///
    /// Returns `None` when the point is already outside.
    pub fn resolve(&self, point: Vec3, margin: f32) -> Option<Contact> {
        let reach = self.radius + margin;
        let offset = point - self.center;
        let dist_sq = offset.length_squared();
        if dist_sq >= reach * reach {
            return None;
        }

        let dist = dist_sq.sqrt();
        let normal = if dist > CENTER_EPSILON {
            offset / dist
        } else {
            Vec3::Y
        };
        Some(Contact {
            position: self.center + normal * reach,
            normal,
            depth: reach - dist,
        })
    }

    /// Whether `point` is within the inflated radius.
    pub fn contains(&self, point: Vec3, margin: f32) -> bool {
        let reach = self.radius + margin;
        (point - self.center).length_squared() < reach * reach
    }
}
