//! Body landmark identities and per-frame landmark sets.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Number of landmarks produced by the pose estimator.
pub const LANDMARK_COUNT: usize = 33;

/// Body-part identity of a landmark. The discriminant is its index in a
/// [`LandmarkFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl Landmark {
    /// All landmarks in index order.
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Landmark::Nose,
        Landmark::LeftEyeInner,
        Landmark::LeftEye,
        Landmark::LeftEyeOuter,
        Landmark::RightEyeInner,
        Landmark::RightEye,
        Landmark::RightEyeOuter,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::MouthLeft,
        Landmark::MouthRight,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftPinky,
        Landmark::RightPinky,
        Landmark::LeftIndex,
        Landmark::RightIndex,
        Landmark::LeftThumb,
        Landmark::RightThumb,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
        Landmark::LeftHeel,
        Landmark::RightHeel,
        Landmark::LeftFootIndex,
        Landmark::RightFootIndex,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One frame of estimator output in normalized body space (Y up).
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    /// Position per landmark, indexed by [`Landmark::index`].
    pub positions: [Vec3; LANDMARK_COUNT],
    /// Visibility/confidence per landmark in [0, 1].
    pub visibility: [f32; LANDMARK_COUNT],
    /// Overall pose confidence.
    pub confidence: f32,
}

impl LandmarkFrame {
    /// All landmarks at the origin with zero visibility.
    pub fn new() -> Self {
        Self {
            positions: [Vec3::ZERO; LANDMARK_COUNT],
            visibility: [0.0; LANDMARK_COUNT],
            confidence: 0.0,
        }
    }

    /// Standing reference pose, arms slightly away from the body.
    ///
    /// Head near y = 0.8, shoulders at y = 0.6, hips at y = 0, facing +Z.
    pub fn reference_pose() -> Self {
        let mut frame = Self::new();
        let pts: [(Landmark, [f32; 3]); 19] = [
            (Landmark::Nose, [0.0, 0.8, 0.05]),
            (Landmark::LeftEye, [-0.03, 0.83, 0.04]),
            (Landmark::RightEye, [0.03, 0.83, 0.04]),
            (Landmark::LeftEar, [-0.07, 0.81, 0.0]),
            (Landmark::RightEar, [0.07, 0.81, 0.0]),
            (Landmark::LeftShoulder, [-0.2, 0.6, 0.0]),
            (Landmark::RightShoulder, [0.2, 0.6, 0.0]),
            (Landmark::LeftElbow, [-0.3, 0.35, 0.0]),
            (Landmark::RightElbow, [0.3, 0.35, 0.0]),
            (Landmark::LeftWrist, [-0.35, 0.1, 0.0]),
            (Landmark::RightWrist, [0.35, 0.1, 0.0]),
            (Landmark::LeftHip, [-0.15, 0.0, 0.0]),
            (Landmark::RightHip, [0.15, 0.0, 0.0]),
            (Landmark::LeftKnee, [-0.15, -0.45, 0.0]),
            (Landmark::RightKnee, [0.15, -0.45, 0.0]),
            (Landmark::LeftAnkle, [-0.15, -0.9, 0.0]),
            (Landmark::RightAnkle, [0.15, -0.9, 0.0]),
            (Landmark::LeftFootIndex, [-0.15, -0.95, 0.1]),
            (Landmark::RightFootIndex, [0.15, -0.95, 0.1]),
        ];
        for (landmark, [x, y, z]) in pts {
            frame.set(landmark, Vec3::new(x, y, z), 0.9);
        }
        // Remaining face and hand points collapse onto their nearest tracked joint.
        for (landmark, parent) in [
            (Landmark::LeftEyeInner, Landmark::LeftEye),
            (Landmark::LeftEyeOuter, Landmark::LeftEye),
            (Landmark::RightEyeInner, Landmark::RightEye),
            (Landmark::RightEyeOuter, Landmark::RightEye),
            (Landmark::MouthLeft, Landmark::Nose),
            (Landmark::MouthRight, Landmark::Nose),
            (Landmark::LeftPinky, Landmark::LeftWrist),
            (Landmark::LeftIndex, Landmark::LeftWrist),
            (Landmark::LeftThumb, Landmark::LeftWrist),
            (Landmark::RightPinky, Landmark::RightWrist),
            (Landmark::RightIndex, Landmark::RightWrist),
            (Landmark::RightThumb, Landmark::RightWrist),
            (Landmark::LeftHeel, Landmark::LeftAnkle),
            (Landmark::RightHeel, Landmark::RightAnkle),
        ] {
            frame.set(landmark, frame.position(parent), 0.9);
        }
        frame.confidence = 0.9;
        frame
    }

    #[inline]
    pub fn position(&self, landmark: Landmark) -> Vec3 {
        self.positions[landmark.index()]
    }

    #[inline]
    pub fn visibility(&self, landmark: Landmark) -> f32 {
        self.visibility[landmark.index()]
    }

    pub fn set(&mut self, landmark: Landmark, position: Vec3, visibility: f32) {
        self.positions[landmark.index()] = position;
        self.visibility[landmark.index()] = visibility;
    }

    /// Translates every landmark by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        let mut out = self.clone();
        for p in out.positions.iter_mut() {
            *p += offset;
        }
        out
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::new()
    }
}
