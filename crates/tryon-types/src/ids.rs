//! Strongly-typed identifiers.
//!
//! Garments are addressed by a small integer handle into the particle
//! arena rather than by pointer identity, so adding and removing garments
//! never aliases a live borrow.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a garment slot in the simulation arena.
///
/// Handles are issued monotonically and never reused within a session,
/// so a stale handle can never address another garment's particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GarmentHandle(pub u32);

impl GarmentHandle {
    /// Returns the raw slot index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for GarmentHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl fmt::Display for GarmentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "garment#{}", self.0)
    }
}
