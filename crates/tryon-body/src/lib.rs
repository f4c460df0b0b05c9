//! # tryon-body
//!
//! Turns the per-frame landmark set from the pose estimator into the small,
//! ordered list of collision primitives the cloth solver pushes against.
//!
//! ## Key Types
//!
//! - [`Landmark`] — the 33 body-part identities, index-aligned with the
//!   estimator output.
//! - [`LandmarkFrame`] — one frame of landmark positions and visibilities.
//! - [`CollisionPrimitive`] — a sphere tagged with the landmark it follows.
//! - [`BodyProxyBuilder`] — smooths landmarks across frames and emits primitives.

pub mod config;
pub mod landmark;
pub mod primitive;
pub mod proxy;

pub use config::{BodyProxyConfig, RadiusPresets};
pub use landmark::{Landmark, LandmarkFrame, LANDMARK_COUNT};
pub use primitive::{CollisionPrimitive, Contact, PrimitiveShape};
pub use proxy::BodyProxyBuilder;
