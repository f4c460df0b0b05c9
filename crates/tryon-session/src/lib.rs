//! # tryon-session
//!
//! Per-frame orchestration of the try-on pipeline and the session
//! lifecycle around it.
//!
//! ## Key Types
//!
//! - [`TryOnSession`] — owns the cloth engine, body proxy, renderer and
//!   garment registry; turns one camera frame into one composited frame
//! - [`SessionConfig`] — target frame rate, garment limit and the nested
//!   cloth/body/render configs, loadable from TOML
//! - [`LandmarkProvider`] — seam to the external pose estimator
//! - [`GarmentRegistry`] — loaded garment assets keyed by string id
//!
//! ## Frame pipeline
//!
//! ```text
//! camera frame ─► LandmarkProvider ─► BodyProxyBuilder ─► ClothEngine::update_collision_body
//!              ─► ClothEngine::step(1 / target_fps)
//!              ─► particle positions → render meshes (+ vertex normals)
//!              ─► RenderStrategy::render(camera frame) ─► composited frame
//! ```

pub mod config;
pub mod provider;
pub mod registry;
pub mod session;

pub use config::SessionConfig;
pub use provider::{LandmarkProvider, ScriptedLandmarks, StaticLandmarks};
pub use registry::{GarmentAsset, GarmentRegistry};
pub use session::TryOnSession;
