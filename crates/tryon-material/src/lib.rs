//! # tryon-material
//!
//! Fabric categories and the per-material table the cloth solver draws
//! constraint stiffness and particle mass from, plus the RGBA texture
//! the rasterizer samples for albedo and coverage.

pub mod kind;
pub mod table;
pub mod texture;

pub use kind::MaterialKind;
pub use table::{MaterialProperties, MaterialTable};
pub use texture::Texture;
