//! Downstream wiring: label display, label → sound table, and the session loop.
//!
//! The core emits two streams:
//!
//! - every classified frame's raw label, for on-screen display;
//! - debounced [`TransitionEvent`]s, each mapped through an [`ActionTable`] to
//!   a sound and handed to an [`ActionDispatcher`].
//!
//! Audio output and rendering are the caller's; they plug in through the two
//! traits below.
//!
//! ```rust
//! use handsign_core::dispatch::{ActionDispatcher, GestureSession, LabelDisplay, Note};
//! use handsign_core::landmark::LandmarkFrame;
//! use handsign_core::stabilizer::TransitionEvent;
//!
//! struct Speaker;
//! impl ActionDispatcher for Speaker {
//!     fn dispatch(&mut self, _event: &TransitionEvent, _note: Note) {}
//! }
//!
//! struct Screen;
//! impl LabelDisplay for Screen {
//!     fn show(&mut self, _label: &str) {}
//! }
//!
//! let mut session = GestureSession::with_defaults(Speaker, Screen);
//! session.on_frame(&LandmarkFrame::empty(), 0);
//! ```

use hashbrown::HashMap;

use crate::config::{ConfigError, GestureConfig};
use crate::gesture::GestureLabel;
use crate::landmark::LandmarkFrame;
use crate::stabilizer::{FrameOutcome, Stabilizer, StabilizerState, TransitionEvent};

// ─── Note ───────────────────────────────────────────────────────────────────

/// Sound identifier: one note of the C-major scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Note {
    /// Sample asset name, e.g. `"note_c"`.
    pub const fn asset_name(&self) -> &'static str {
        match self {
            Note::C => "note_c",
            Note::D => "note_d",
            Note::E => "note_e",
            Note::F => "note_f",
            Note::G => "note_g",
            Note::A => "note_a",
            Note::B => "note_b",
        }
    }
}

// ─── ActionTable ────────────────────────────────────────────────────────────

/// Static label → sound mapping. `UNKNOWN` is never mapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTable {
    sounds: HashMap<GestureLabel, Note>,
}

impl ActionTable {
    /// A table with no entries; every transition is silent.
    pub fn empty() -> Self {
        Self { sounds: HashMap::new() }
    }

    /// Sound for `label`, if any.
    pub fn sound_for(&self, label: GestureLabel) -> Option<Note> {
        self.sounds.get(&label).copied()
    }

    /// Map `label` to `note`, returning the previous mapping.
    pub fn insert(&mut self, label: GestureLabel, note: Note) -> Result<Option<Note>, ConfigError> {
        if !label.is_known() {
            return Err(ConfigError::UnknownHasNoAction);
        }
        Ok(self.sounds.insert(label, note))
    }

    /// Remove the mapping for `label`.
    pub fn remove(&mut self, label: GestureLabel) -> Option<Note> {
        self.sounds.remove(&label)
    }

    /// Number of mapped labels.
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// True when nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl Default for ActionTable {
    /// C through B, in rule order.
    fn default() -> Self {
        let pairs = [
            (GestureLabel::OpenPalm, Note::C),
            (GestureLabel::ClosedFist, Note::D),
            (GestureLabel::PointingUp, Note::E),
            (GestureLabel::Victory, Note::F),
            (GestureLabel::ThumbUp, Note::G),
            (GestureLabel::PinkyOut, Note::A),
            (GestureLabel::RockOn, Note::B),
        ];
        Self { sounds: pairs.into_iter().collect() }
    }
}

// ─── Sinks ──────────────────────────────────────────────────────────────────

/// Receives debounced transitions that have a mapped sound.
pub trait ActionDispatcher {
    /// Perform the side effect for `event` (e.g. play `note`).
    fn dispatch(&mut self, event: &TransitionEvent, note: Note);
}

/// Receives the raw label of every classified frame.
pub trait LabelDisplay {
    /// Present `label` (a wire name such as `"VICTORY"`).
    fn show(&mut self, label: &str);
}

impl<T: ActionDispatcher + ?Sized> ActionDispatcher for &mut T {
    fn dispatch(&mut self, event: &TransitionEvent, note: Note) {
        (**self).dispatch(event, note)
    }
}

impl<T: LabelDisplay + ?Sized> LabelDisplay for &mut T {
    fn show(&mut self, label: &str) {
        (**self).show(label)
    }
}

/// Discards everything. Useful when only one of the two streams is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ActionDispatcher for NullSink {
    fn dispatch(&mut self, _event: &TransitionEvent, _note: Note) {}
}

impl LabelDisplay for NullSink {
    fn show(&mut self, _label: &str) {}
}

// ─── GestureSession ─────────────────────────────────────────────────────────

/// One capture session: pipeline, its state, the action table and both sinks.
///
/// Frames must be fed sequentially; `on_frame` takes `&mut self`.
pub struct GestureSession<A: ActionDispatcher, D: LabelDisplay> {
    stabilizer: Stabilizer,
    state: StabilizerState,
    actions: ActionTable,
    dispatcher: A,
    display: D,
}

impl<A: ActionDispatcher, D: LabelDisplay> GestureSession<A, D> {
    /// Start a session with the given configuration and action table.
    pub fn new(
        config: &GestureConfig,
        actions: ActionTable,
        dispatcher: A,
        display: D,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            stabilizer: Stabilizer::new(config)?,
            state: StabilizerState::new(),
            actions,
            dispatcher,
            display,
        })
    }

    /// Start a session with default thresholds, timing, and sounds.
    pub fn with_defaults(dispatcher: A, display: D) -> Self {
        Self {
            stabilizer: Stabilizer::default(),
            state: StabilizerState::new(),
            actions: ActionTable::default(),
            dispatcher,
            display,
        }
    }

    /// Feed one frame captured at `now_ms`.
    ///
    /// Classified frames update the display; emitted transitions with a mapped
    /// sound reach the dispatcher.
    pub fn on_frame(&mut self, frame: &LandmarkFrame, now_ms: u64) -> FrameOutcome {
        let outcome = self.stabilizer.step(&mut self.state, frame, now_ms);
        if let FrameOutcome::Classified { label, .. } = outcome {
            self.display.show(label.as_str());
        }
        if let Some(event) = outcome.transition() {
            match self.actions.sound_for(event.label) {
                Some(note) => self.dispatcher.dispatch(event, note),
                None => log::debug!("no action mapped for {}", event.label),
            }
        }
        outcome
    }

    /// Feed one frame stamped with the current reading of `clock`.
    #[cfg(feature = "std")]
    pub fn on_frame_now<C: crate::clock::Clock>(
        &mut self,
        frame: &LandmarkFrame,
        clock: &C,
    ) -> FrameOutcome {
        self.on_frame(frame, clock.now_ms())
    }

    /// Current stabilisation state.
    pub fn state(&self) -> &StabilizerState {
        &self.state
    }

    /// Action table in use.
    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// End the session, discarding its state and handing back the sinks.
    pub fn end(self) -> (A, D) {
        log::debug!("session ended, last gesture {:?}", self.state.last_detected);
        (self.dispatcher, self.display)
    }
}
