//! Hand landmarks, the per-frame input to the classifier.
//!
//! A [`LandmarkFrame`] is one hand's joint positions at one instant, in the
//! 21-point order produced by MediaPipe / ML Kit hand landmarkers:
//!
//! ```text
//!            8   12  16  20        tips
//!            7   11  15  19        DIP
//!        4   6   10  14  18        PIP   (thumb: 4 = tip)
//!        3   5   9   13  17        MCP   (thumb: 3 = IP)
//!        2                               (thumb: 2 = MCP)
//!        1                               (thumb: 1 = CMC)
//!              0                   wrist
//! ```
//!
//! Coordinates are normalised to the image: `x` rightwards, `y` *downwards*,
//! `z` depth relative to the wrist.
//!
//! # Invariants
//! - A frame holds at most [`MAX_LANDMARKS`] points. It may hold fewer: a degraded
//!   detector can deliver a truncated list, and every consumer must treat a
//!   missing index as "untestable" rather than fail.
//! - Frames are immutable once built; no heap allocation.

use heapless::Vec;

/// Number of landmark slots in the hand model.
pub const MAX_LANDMARKS: usize = 21;

/// A single hand joint position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landmark {
    /// Horizontal position, normalised to image width.
    pub x: f32,
    /// Vertical position, normalised to image height. Increases downward.
    pub y: f32,
    /// Depth relative to the wrist.
    pub z: f32,
}

impl Landmark {
    /// Construct a landmark from its three coordinates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in 3D.
    ///
    /// Correctly rounded, so it agrees bit for bit with `f32::sqrt` on every
    /// target. A non-finite coordinate yields NaN or infinity, never 0.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        libm::sqrtf(dx * dx + dy * dy + dz * dz)
    }
}

impl From<(f32, f32, f32)> for Landmark {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Anatomical slot names for the 21-point hand model.
///
/// The discriminant is the index into a [`LandmarkFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum HandJoint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandJoint {
    /// Position of this joint in a [`LandmarkFrame`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One hand's landmarks for one frame.
///
/// Built once from detector output and then only read. Points beyond
/// [`MAX_LANDMARKS`] are ignored on construction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandmarkFrame {
    points: Vec<Landmark, MAX_LANDMARKS>,
}

impl LandmarkFrame {
    /// An empty frame (no points). Classifies as a closed fist.
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a frame from up to 21 landmarks.
    pub fn from_slice(points: &[Landmark]) -> Self {
        let take = points.len().min(MAX_LANDMARKS);
        let mut frame = Vec::new();
        for p in &points[..take] {
            // Capacity is MAX_LANDMARKS and `take` never exceeds it.
            let _ = frame.push(*p);
        }
        Self { points: frame }
    }

    /// Build a frame from a flat `[x0, y0, z0, x1, y1, z1, ...]` buffer.
    ///
    /// A trailing partial triple is dropped.
    pub fn from_flat(flat: &[f32]) -> Self {
        let mut frame = Vec::new();
        for chunk in flat.chunks_exact(3).take(MAX_LANDMARKS) {
            let _ = frame.push(Landmark::new(chunk[0], chunk[1], chunk[2]));
        }
        Self { points: frame }
    }

    /// Number of points present.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the detector delivered no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at `index`, or `None` if the frame is too short.
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    /// Landmark for a named joint, or `None` if the frame is too short.
    pub fn joint(&self, joint: HandJoint) -> Option<&Landmark> {
        self.get(joint.index())
    }

    /// True when every index up to and including `max_index` is present.
    pub fn covers(&self, max_index: usize) -> bool {
        self.points.len() > max_index
    }

    /// All points in slot order.
    pub fn as_slice(&self) -> &[Landmark] {
        &self.points
    }
}

impl From<&[Landmark]> for LandmarkFrame {
    fn from(points: &[Landmark]) -> Self {
        Self::from_slice(points)
    }
}
