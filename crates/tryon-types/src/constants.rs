//! Physical constants and pipeline defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Default target frame rate. The simulation timestep is `1 / DEFAULT_TARGET_FPS`.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Default number of constraint relaxation iterations per step.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 10;

/// Default collision margin (meters) added to every primitive radius.
pub const DEFAULT_COLLISION_MARGIN: f32 = 0.01;

/// Default global velocity damping multiplier applied after velocity derivation.
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Default maximum number of simultaneously worn garments.
pub const DEFAULT_MAX_GARMENTS: usize = 3;

/// Below this separation two constrained particles receive no correction.
pub const CONSTRAINT_EPSILON: f32 = 1.0e-4;

/// Barycentric denominators below this are treated as degenerate triangles.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;

/// Depth-buffer sentinel meaning "nothing drawn yet".
pub const FAR_DEPTH: f32 = f32::INFINITY;
