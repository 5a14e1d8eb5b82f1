/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Gesture classification: five finger states to one discrete label.
//!
//! Rules are evaluated in a fixed priority order, first match wins:
//!
//! | # | Label | Condition |
//! |---|-------|-----------|
//! | 1 | `OPEN_PALM` | all five fingers open |
//! | 2 | `CLOSED_FIST` | no finger open |
//! | 3 | `POINTING_UP` | index open; middle, ring, pinky closed (thumb ignored) |
//! | 4 | `VICTORY` | index, middle open; ring, pinky closed |
//! | 5 | `THUMB_UP` | thumb tip above wrist by `thumb_raise`; index–pinky closed |
//! | 6 | `PINKY_OUT` | pinky open; index, middle, ring closed |
//! | 7 | `ROCK_ON` | index, pinky open; middle, ring closed |
//! | – | `UNKNOWN` | nothing matched |
//!
//! Most conditions are mutually exclusive, but the order is part of the contract
//! and is kept stable for reproducible output.
//!
//! # Invariants
//! - `classify` is pure and deterministic: equal frames give equal labels.
//! - Incomplete frames never error. Untestable fingers read as closed, so a
//!   degraded `OPEN_PALM` can come out as a label needing fewer open fingers.

use core::fmt;
use core::str::FromStr;

use crate::config::{ConfigError, Thresholds};
use crate::finger::FingerStates;
use crate::landmark::{HandJoint, LandmarkFrame};

// ─── GestureLabel ───────────────────────────────────────────────────────────

/// Discrete gesture recognised in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GestureLabel {
    /// Every finger extended.
    OpenPalm,
    /// Every finger curled.
    ClosedFist,
    /// Index finger only (thumb may be either way).
    PointingUp,
    /// Index and middle, "V".
    Victory,
    /// Thumb raised above the wrist, other four curled.
    ThumbUp,
    /// Pinky only.
    PinkyOut,
    /// Index and pinky, "horns".
    RockOn,
    /// No rule matched.
    Unknown,
}

impl GestureLabel {
    /// Every label, in rule priority order with `Unknown` last.
    pub const ALL: [GestureLabel; 8] = [
        GestureLabel::OpenPalm,
        GestureLabel::ClosedFist,
        GestureLabel::PointingUp,
        GestureLabel::Victory,
        GestureLabel::ThumbUp,
        GestureLabel::PinkyOut,
        GestureLabel::RockOn,
        GestureLabel::Unknown,
    ];

    /// Wire name, e.g. `"OPEN_PALM"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::OpenPalm => "OPEN_PALM",
            GestureLabel::ClosedFist => "CLOSED_FIST",
            GestureLabel::PointingUp => "POINTING_UP",
            GestureLabel::Victory => "VICTORY",
            GestureLabel::ThumbUp => "THUMB_UP",
            GestureLabel::PinkyOut => "PINKY_OUT",
            GestureLabel::RockOn => "ROCK_ON",
            GestureLabel::Unknown => "UNKNOWN",
        }
    }

    /// `true` for every label except `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, GestureLabel::Unknown)
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the eight wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseLabelError;

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised gesture label")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLabelError {}

impl FromStr for GestureLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or(ParseLabelError)
    }
}

// ─── HandPose ───────────────────────────────────────────────────────────────

/// Everything the rules look at, evaluated once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandPose {
    /// Per-finger open/closed.
    pub fingers: FingerStates,
    /// Thumb tip sits above the wrist by more than `thumb_raise` (y grows downward).
    pub thumb_raised: bool,
}

impl HandPose {
    /// Evaluate finger states and thumb elevation for `frame`.
    pub fn from_frame(frame: &LandmarkFrame, thresholds: &Thresholds) -> Self {
        Self {
            fingers: FingerStates::from_frame(frame, thresholds),
            thumb_raised: thumb_raised(frame, thresholds.thumb_raise),
        }
    }
}

fn thumb_raised(frame: &LandmarkFrame, thumb_raise: f32) -> bool {
    match (frame.joint(HandJoint::Wrist), frame.joint(HandJoint::ThumbTip)) {
        (Some(wrist), Some(tip)) => {
            let lift = wrist.y - tip.y;
            lift.is_finite() && lift > thumb_raise
        }
        _ => false,
    }
}

// ─── Rule table ─────────────────────────────────────────────────────────────

/// One entry of the priority table.
#[derive(Clone, Copy)]
pub struct GestureRule {
    /// Label produced when the predicate matches.
    pub label: GestureLabel,
    /// Predicate over the evaluated pose.
    pub matches: fn(&HandPose) -> bool,
}

impl fmt::Debug for GestureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRule").field("label", &self.label).finish()
    }
}

fn open_palm(p: &HandPose) -> bool {
    p.fingers.all_open()
}

fn closed_fist(p: &HandPose) -> bool {
    !p.fingers.any_open()
}

fn pointing_up(p: &HandPose) -> bool {
    let f = &p.fingers;
    f.index && !f.middle && !f.ring && !f.pinky
}

fn victory(p: &HandPose) -> bool {
    let f = &p.fingers;
    f.index && f.middle && !f.ring && !f.pinky
}

fn thumb_up(p: &HandPose) -> bool {
    let f = &p.fingers;
    p.thumb_raised && !f.index && !f.middle && !f.ring && !f.pinky
}

fn pinky_out(p: &HandPose) -> bool {
    let f = &p.fingers;
    !f.index && !f.middle && !f.ring && f.pinky
}

fn rock_on(p: &HandPose) -> bool {
    let f = &p.fingers;
    f.index && !f.middle && !f.ring && f.pinky
}

/// The priority-ordered rule set. First match wins; no match is `Unknown`.
pub const GESTURE_RULES: [GestureRule; 7] = [
    GestureRule { label: GestureLabel::OpenPalm, matches: open_palm },
    GestureRule { label: GestureLabel::ClosedFist, matches: closed_fist },
    GestureRule { label: GestureLabel::PointingUp, matches: pointing_up },
    GestureRule { label: GestureLabel::Victory, matches: victory },
    GestureRule { label: GestureLabel::ThumbUp, matches: thumb_up },
    GestureRule { label: GestureLabel::PinkyOut, matches: pinky_out },
    GestureRule { label: GestureLabel::RockOn, matches: rock_on },
];

/// Apply [`GESTURE_RULES`] to an already-evaluated pose.
pub fn label_for(pose: &HandPose) -> GestureLabel {
    GESTURE_RULES
        .iter()
        .find(|rule| (rule.matches)(pose))
        .map_or(GestureLabel::Unknown, |rule| rule.label)
}

// ─── Classifier ─────────────────────────────────────────────────────────────

/// Frame → label with a fixed set of thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureClassifier {
    thresholds: Thresholds,
}

impl GestureClassifier {
    /// Build a classifier, rejecting unusable thresholds.
    pub fn new(thresholds: Thresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Intermediate pose for `frame`.
    pub fn pose(&self, frame: &LandmarkFrame) -> HandPose {
        if !frame.covers(HandJoint::PinkyTip.index()) {
            log::trace!(
                "degraded frame: {} of 21 landmarks, missing fingers read as closed",
                frame.len()
            );
        }
        HandPose::from_frame(frame, &self.thresholds)
    }

    /// Label for `frame`.
    pub fn classify(&self, frame: &LandmarkFrame) -> GestureLabel {
        label_for(&self.pose(frame))
    }
}

/// Classify with default thresholds.
pub fn classify(frame: &LandmarkFrame) -> GestureLabel {
    GestureClassifier::default().classify(frame)
}
