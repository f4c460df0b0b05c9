//! # tryon-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the tryon garment simulation and compositing pipeline.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other tryon crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{TryOnError, TryOnResult};
pub use ids::GarmentHandle;
