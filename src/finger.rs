/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Finger state extraction: open/closed per finger from landmark geometry.
//!
//! A finger is **open** when its tip is far from the finger base relative to the
//! mid joint:
//!
//! ```text
//! open  ⇔  dist(base, tip) > ratio × dist(base, mid)        ratio = 1.5 by default
//! ```
//!
//! Extended, the tip sits roughly two segments from the base; curled, it folds
//! back toward the base and the ratio collapses. The thumb has no PIP, so it
//! uses (CMC, IP, tip) with the same rule.
//!
//! # Invariants
//! - A frame too short to contain all three joints of a finger reads that finger
//!   as **closed**. Extraction never fails and never guesses from partial data.
//! - Pure functions of the frame and thresholds.

use crate::config::{Thresholds, DEFAULT_FINGER_OPEN_RATIO};
use crate::landmark::{HandJoint, LandmarkFrame};

/// Base, middle and tip joints tested for one finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JointTriple {
    /// MCP for fingers, CMC for the thumb.
    pub base: HandJoint,
    /// PIP for fingers, IP for the thumb.
    pub mid: HandJoint,
    /// Fingertip.
    pub tip: HandJoint,
}

impl JointTriple {
    /// Largest frame index this triple reads.
    pub fn max_index(&self) -> usize {
        self.base.index().max(self.mid.index()).max(self.tip.index())
    }
}

/// The five fingers of one hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, thumb first.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// The joint triple this finger is tested on.
    pub const fn joints(self) -> JointTriple {
        match self {
            Finger::Thumb => JointTriple {
                base: HandJoint::ThumbCmc,
                mid: HandJoint::ThumbIp,
                tip: HandJoint::ThumbTip,
            },
            Finger::Index => JointTriple {
                base: HandJoint::IndexMcp,
                mid: HandJoint::IndexPip,
                tip: HandJoint::IndexTip,
            },
            Finger::Middle => JointTriple {
                base: HandJoint::MiddleMcp,
                mid: HandJoint::MiddlePip,
                tip: HandJoint::MiddleTip,
            },
            Finger::Ring => JointTriple {
                base: HandJoint::RingMcp,
                mid: HandJoint::RingPip,
                tip: HandJoint::RingTip,
            },
            Finger::Pinky => JointTriple {
                base: HandJoint::PinkyMcp,
                mid: HandJoint::PinkyPip,
                tip: HandJoint::PinkyTip,
            },
        }
    }

    /// Test this finger against `frame` with the given open ratio.
    pub fn is_open(self, frame: &LandmarkFrame, ratio: f32) -> bool {
        let j = self.joints();
        is_finger_open(frame, j.base.index(), j.mid.index(), j.tip.index(), ratio)
    }
}

/// Open/closed test for an arbitrary joint triple.
///
/// Returns `false` when the frame holds fewer than `max(mcp, pip, tip) + 1`
/// points, or when any of the three joints has a non-finite coordinate.
pub fn is_finger_open(
    frame: &LandmarkFrame,
    mcp_index: usize,
    pip_index: usize,
    tip_index: usize,
    ratio: f32,
) -> bool {
    let (mcp, pip, tip) = match (
        frame.get(mcp_index),
        frame.get(pip_index),
        frame.get(tip_index),
    ) {
        (Some(mcp), Some(pip), Some(tip)) => (mcp, pip, tip),
        _ => return false,
    };

    let d_tip = mcp.distance(tip);
    let d_pip = mcp.distance(pip);
    if !(d_tip.is_finite() && d_pip.is_finite()) {
        return false;
    }
    d_tip > ratio * d_pip
}

/// Thumb open test (CMC, IP, tip) at the default ratio.
pub fn is_thumb_open(frame: &LandmarkFrame) -> bool {
    Finger::Thumb.is_open(frame, DEFAULT_FINGER_OPEN_RATIO)
}

/// Index finger open test at the default ratio.
pub fn is_index_open(frame: &LandmarkFrame) -> bool {
    Finger::Index.is_open(frame, DEFAULT_FINGER_OPEN_RATIO)
}

/// Middle finger open test at the default ratio.
pub fn is_middle_open(frame: &LandmarkFrame) -> bool {
    Finger::Middle.is_open(frame, DEFAULT_FINGER_OPEN_RATIO)
}

/// Ring finger open test at the default ratio.
pub fn is_ring_open(frame: &LandmarkFrame) -> bool {
    Finger::Ring.is_open(frame, DEFAULT_FINGER_OPEN_RATIO)
}

/// Pinky open test at the default ratio.
pub fn is_pinky_open(frame: &LandmarkFrame) -> bool {
    Finger::Pinky.is_open(frame, DEFAULT_FINGER_OPEN_RATIO)
}

// ─── FingerStates ───────────────────────────────────────────────────────────

/// Open/closed state of all five fingers for one frame.
///
/// Derived, never stored across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Evaluate every finger once.
    pub fn from_frame(frame: &LandmarkFrame, thresholds: &Thresholds) -> Self {
        let ratio = thresholds.finger_open_ratio;
        Self {
            thumb: Finger::Thumb.is_open(frame, ratio),
            index: Finger::Index.is_open(frame, ratio),
            middle: Finger::Middle.is_open(frame, ratio),
            ring: Finger::Ring.is_open(frame, ratio),
            pinky: Finger::Pinky.is_open(frame, ratio),
        }
    }

    /// State of a single finger.
    pub fn is_open(&self, finger: Finger) -> bool {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    /// All five fingers open.
    pub fn all_open(&self) -> bool {
        self.thumb && self.index && self.middle && self.ring && self.pinky
    }

    /// At least one finger open.
    pub fn any_open(&self) -> bool {
        self.thumb || self.index || self.middle || self.ring || self.pinky
    }

    /// Number of open fingers, 0–5.
    pub fn open_count(&self) -> usize {
        Finger::ALL.iter().filter(|f| self.is_open(**f)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, MAX_LANDMARKS};

    /// All points at the origin; tests place the joints they care about.
    fn blank() -> [Landmark; MAX_LANDMARKS] {
        [Landmark::default(); MAX_LANDMARKS]
    }

    fn place(points: &mut [Landmark], finger: Finger, d_pip: f32, d_tip: f32) {
        let j = finger.joints();
        let x = j.base.index() as f32 * 0.01;
        points[j.base.index()] = Landmark::new(x, 0.8, 0.0);
        points[j.mid.index()] = Landmark::new(x, 0.8 - d_pip, 0.0);
        points[j.tip.index()] = Landmark::new(x, 0.8 - d_tip, 0.0);
    }

    #[test]
    fn test_extended_finger_is_open() {
        let mut pts = blank();
        place(&mut pts, Finger::Index, 0.05, 0.15); // 0.15 > 1.5 × 0.05
        let frame = LandmarkFrame::from_slice(&pts);
        assert!(is_index_open(&frame));
    }

    #[test]
    fn test_curled_finger_is_closed() {
        let mut pts = blank();
        place(&mut pts, Finger::Index, 0.05, 0.04);
        let frame = LandmarkFrame::from_slice(&pts);
        assert!(!is_index_open(&frame));
    }

    #[test]
    fn test_non_finite_joint_reads_closed() {
        // Index curled: tip 0.02 from the MCP, PIP 0.05.
        let mut pts = blank();
        place(&mut pts, Finger::Index, 0.05, 0.02);

        let mut nan_pip = pts;
        nan_pip[HandJoint::IndexPip.index()].x = f32::NAN;
        assert!(!is_finger_open(&LandmarkFrame::from_slice(&nan_pip[..9]), 5, 6, 8, 1.5));
        assert!(!is_index_open(&LandmarkFrame::from_slice(&nan_pip)));

        let mut nan_tip = pts;
        nan_tip[HandJoint::IndexTip.index()].y = f32::NAN;
        assert!(!is_index_open(&LandmarkFrame::from_slice(&nan_tip)));

        // An infinite tip would pass the ratio test; it is still untestable.
        let mut inf_tip = pts;
        inf_tip[HandJoint::IndexTip.index()].z = f32::INFINITY;
        assert!(!is_index_open(&LandmarkFrame::from_slice(&inf_tip)));
    }

    #[test]
    fn test_ratio_threshold_either_side() {
        // d_tip / d_pip = 2.0
        let pts = [
            Landmark::new(0.0, 0.0, 0.0),
            Landmark::new(0.0, 0.25, 0.0),
            Landmark::new(0.0, 0.5, 0.0),
        ];
        let frame = LandmarkFrame::from_slice(&pts);
        assert!(!is_finger_open(&frame, 0, 1, 2, 2.1));
        assert!(is_finger_open(&frame, 0, 1, 2, 1.9));
    }

    #[test]
    fn test_depth_counts_toward_distance() {
        // Tip pushed toward the camera only along z.
        let pts = [
            Landmark::new(0.5, 0.5, 0.0),
            Landmark::new(0.5, 0.5, -0.05),
            Landmark::new(0.5, 0.5, -0.2),
        ];
        let frame = LandmarkFrame::from_slice(&pts);
        assert!(is_finger_open(&frame, 0, 1, 2, 1.5));
    }

    #[test]
    fn test_short_frame_is_closed_not_panic() {
        let mut pts = blank();
        place(&mut pts, Finger::Pinky, 0.05, 0.2);
        // Pinky tip is index 20; drop it.
        let frame = LandmarkFrame::from_slice(&pts[..20]);
        assert!(!is_pinky_open(&frame));
        assert!(!is_finger_open(&frame, 17, 18, 20, 1.5));
    }

    #[test]
    fn test_index_order_does_not_matter_for_guard() {
        let frame = LandmarkFrame::from_slice(&[Landmark::default(); 5]);
        assert!(!is_finger_open(&frame, 9, 1, 2, 1.5));
        assert!(!is_finger_open(&frame, 1, 2, 9, 1.5));
    }

    #[test]
    fn test_thumb_uses_cmc_ip_tip() {
        let j = Finger::Thumb.joints();
        assert_eq!(j.base, HandJoint::ThumbCmc);
        assert_eq!(j.mid, HandJoint::ThumbIp);
        assert_eq!(j.tip, HandJoint::ThumbTip);
        assert_eq!(j.max_index(), 4);

        let mut pts = blank();
        place(&mut pts, Finger::Thumb, 0.05, 0.12);
        // The thumb MCP (index 2) is irrelevant to the test.
        pts[HandJoint::ThumbMcp.index()] = Landmark::new(9.0, 9.0, 9.0);
        let frame = LandmarkFrame::from_slice(&pts);
        assert!(is_thumb_open(&frame));
    }

    #[test]
    fn test_custom_ratio_changes_verdict() {
        let mut pts = blank();
        place(&mut pts, Finger::Middle, 0.05, 0.09);
        let frame = LandmarkFrame::from_slice(&pts);

        assert!(Finger::Middle.is_open(&frame, 1.5));
        assert!(!Finger::Middle.is_open(&frame, 2.0));
    }

    #[test]
    fn test_finger_states_aggregates() {
        let mut pts = blank();
        for f in Finger::ALL {
            place(&mut pts, f, 0.05, 0.15);
        }
        let open = FingerStates::from_frame(&LandmarkFrame::from_slice(&pts), &Thresholds::default());
        assert!(open.all_open());
        assert!(open.any_open());
        assert_eq!(open.open_count(), 5);

        let closed = FingerStates::from_frame(&LandmarkFrame::empty(), &Thresholds::default());
        assert!(!closed.all_open());
        assert!(!closed.any_open());
        assert_eq!(closed.open_count(), 0);
        assert_eq!(closed, FingerStates::default());
    }

    #[test]
    fn test_finger_states_is_open_matches_fields() {
        let s = FingerStates { thumb: false, index: true, middle: false, ring: true, pinky: false };
        assert!(!s.is_open(Finger::Thumb));
        assert!(s.is_open(Finger::Index));
        assert!(s.is_open(Finger::Ring));
        assert_eq!(s.open_count(), 2);
        assert!(!s.all_open());
        assert!(s.any_open());
    }
}
