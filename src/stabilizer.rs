/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Temporal stabilisation: turns a noisy per-frame label stream into sparse,
//! rate-limited gesture transitions.
//!
//! Two independent timers sit on top of the classifier:
//!
//! ```text
//! frame ─▶ throttle ─▶ classify ─▶ debounce + cooldown ─▶ TransitionEvent
//!            │                          │
//!        < interval: drop          same label: Repeated
//!                                  cooldown open: CoolingDown
//! ```
//!
//! - **Frame throttle**: a frame arriving less than `frame_interval_ms` after the
//!   last *classified* frame is dropped outright. No queue, no backlog.
//! - **Debounce**: a label equal to the last *emitted* label never emits.
//! - **Cooldown**: a new label emits only if strictly more than `cooldown_ms`
//!   has passed since the last emission. Otherwise it is dropped and *not*
//!   remembered.
//!
//! # Known debounce artifact
//!
//! Because a change dropped during cooldown does not update `last_detected`, an
//! A → B → A oscillation inside the cooldown loses B entirely, and a B seen
//! after the cooldown is treated as new even if it was first seen long before.
//! Emitted transitions are therefore rate-limited but not guaranteed to
//! describe every distinct change.
//!
//! # Concurrency
//!
//! [`StabilizerState`] is plain data mutated through `&mut`. One session owns
//! one state; the borrow checker rules out two cycles touching it at once.
//! Dropping the state is session teardown.

use crate::config::{ConfigError, GestureConfig, StabilizerConfig};
use crate::gesture::{GestureClassifier, GestureLabel};
use crate::landmark::LandmarkFrame;

// ─── Events and outcomes ────────────────────────────────────────────────────

/// A stable change of gesture, ready for the action dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionEvent {
    /// The newly emitted label.
    pub label: GestureLabel,
    /// Label emitted before this one, `None` for the first of a session.
    pub previous: Option<GestureLabel>,
    /// Timestamp of the frame that produced the transition.
    pub at_ms: u64,
}

/// What the debounce stage did with a classified label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// New label accepted and recorded.
    Emitted(TransitionEvent),
    /// Same as the last emitted label.
    Repeated,
    /// Different label, but the cooldown has not elapsed. Dropped, not recorded.
    CoolingDown,
}

/// Result of feeding one frame to the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Arrived inside the processing interval. Not classified.
    Throttled,
    /// Classified. `label` is the raw per-frame label for display.
    Classified {
        /// Raw classification, before debounce.
        label: GestureLabel,
        /// Debounce verdict.
        decision: Decision,
    },
}

impl FrameOutcome {
    /// Raw label, if the frame was classified.
    pub fn label(&self) -> Option<GestureLabel> {
        match self {
            FrameOutcome::Throttled => None,
            FrameOutcome::Classified { label, .. } => Some(*label),
        }
    }

    /// The transition, if this frame produced one.
    pub fn transition(&self) -> Option<&TransitionEvent> {
        match self {
            FrameOutcome::Classified { decision: Decision::Emitted(ev), .. } => Some(ev),
            _ => None,
        }
    }
}

// ─── StabilizerState ────────────────────────────────────────────────────────

/// Per-session timers and the last emitted label.
///
/// `None` means "never": an unset timer never blocks, so the first frame of a
/// session is always classified and its label always emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilizerState {
    /// Most recently *emitted* label.
    pub last_detected: Option<GestureLabel>,
    /// When the last transition was emitted.
    pub last_play_ms: Option<u64>,
    /// When the last frame was actually classified.
    pub last_processing_ms: Option<u64>,
}

impl StabilizerState {
    /// Fresh session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything, as at the start of a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Elapsed milliseconds since `since`. A clock that steps backwards reads as 0.
fn elapsed(now_ms: u64, since: Option<u64>) -> Option<u64> {
    since.map(|t| now_ms.saturating_sub(t))
}

// ─── Stabilizer ─────────────────────────────────────────────────────────────

/// Classifier plus timing policy. Holds no per-session data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stabilizer {
    config: StabilizerConfig,
    classifier: GestureClassifier,
}

impl Stabilizer {
    /// Build from a full configuration, validating it.
    pub fn new(config: &GestureConfig) -> Result<Self, ConfigError> {
        config.stabilizer.validate()?;
        Ok(Self {
            config: config.stabilizer,
            classifier: GestureClassifier::new(config.thresholds)?,
        })
    }

    /// Timing in use.
    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Classifier in use.
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Frame throttle: `true` if a frame at `now_ms` should be classified.
    pub fn should_process(&self, state: &StabilizerState, now_ms: u64) -> bool {
        match elapsed(now_ms, state.last_processing_ms) {
            Some(dt) => dt >= self.config.frame_interval_ms,
            None => true,
        }
    }

    /// Debounce + cooldown for a label classified at `now_ms`.
    ///
    /// Updates `state` only when the label is emitted.
    pub fn debounce(
        &self,
        state: &mut StabilizerState,
        label: GestureLabel,
        now_ms: u64,
    ) -> Decision {
        if state.last_detected == Some(label) {
            return Decision::Repeated;
        }

        let cooled = match elapsed(now_ms, state.last_play_ms) {
            Some(dt) => dt > self.config.cooldown_ms,
            None => true,
        };
        if !cooled {
            log::debug!(
                "dropped {} at {}ms: cooldown of {}ms still open",
                label,
                now_ms,
                self.config.cooldown_ms
            );
            return Decision::CoolingDown;
        }

        let event = TransitionEvent {
            label,
            previous: state.last_detected,
            at_ms: now_ms,
        };
        state.last_detected = Some(label);
        state.last_play_ms = Some(now_ms);
        log::info!("gesture transition -> {} at {}ms", label, now_ms);
        Decision::Emitted(event)
    }

    /// Run one full cycle: throttle, classify, debounce.
    pub fn step(
        &self,
        state: &mut StabilizerState,
        frame: &LandmarkFrame,
        now_ms: u64,
    ) -> FrameOutcome {
        if !self.should_process(state, now_ms) {
            log::trace!("frame at {}ms throttled", now_ms);
            return FrameOutcome::Throttled;
        }
        state.last_processing_ms = Some(now_ms);

        let label = self.classifier.classify(frame);
        log::debug!("classified {} at {}ms", label, now_ms);
        let decision = self.debounce(state, label, now_ms);
        FrameOutcome::Classified { label, decision }
    }
}
