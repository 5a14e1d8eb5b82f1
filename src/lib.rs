//! # handsign-core
//!
//! Hand sign recognition from 21-point hand landmarks: per-finger open/closed
//! extraction, a fixed-priority gesture classifier, and a throttle + debounce
//! stage that turns the noisy per-frame label stream into a few stable
//! gesture transitions.
//!
//! Camera capture and landmark inference happen upstream (MediaPipe, ML Kit,
//! ...). Sound playback and display happen downstream. This crate is the part
//! in between that makes decisions.
//!
//! ## The pipeline
//!
//! ```text
//! LandmarkFrame → FingerStates → GestureLabel → Stabilizer → TransitionEvent
//!                      ↑               ↑             ↑              ↓
//!                 Thresholds     GESTURE_RULES  StabilizerState  ActionTable → ActionDispatcher
//!                                                    │
//!                                          raw label → LabelDisplay
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`landmark`] | [`LandmarkFrame`], [`Landmark`], [`HandJoint`] | One hand's 21 points, 3D distance |
//! | [`finger`] | [`Finger`], [`FingerStates`] | Open/closed per finger from joint distances |
//! | [`gesture`] | [`GestureLabel`], [`GestureClassifier`] | Priority-ordered rules to one label |
//! | [`stabilizer`] | [`Stabilizer`], [`StabilizerState`], [`TransitionEvent`] | Frame throttle, debounce, cooldown |
//! | [`dispatch`] | [`GestureSession`], [`ActionTable`] | Label → sound table, sinks, the session loop |
//! | [`config`] | [`GestureConfig`] | Tunable thresholds and timing |
//! | `clock` | `Clock`, `MonotonicClock` | Millisecond clocks for live capture (requires `std`) |
//!
//! ## Quick start
//!
//! ```rust
//! use handsign_core::{classify, GestureLabel, LandmarkFrame};
//!
//! // A detector that found no points reads as a closed fist.
//! assert_eq!(classify(&LandmarkFrame::empty()), GestureLabel::ClosedFist);
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default with no heap required. Enable `std`
//! for the clocks and `std::error::Error` impls, `serde` for serialisation of
//! configuration and events, and `python-ffi` for PyO3 bindings.
//!
//! ## Logging
//!
//! Decisions are reported through the [`log`] facade: `trace` for throttled
//! and degraded frames, `debug` for classifications and dropped changes,
//! `info` for emitted transitions. Install any logger to see them.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod finger;
pub mod gesture;
pub mod landmark;
pub mod stabilizer;

#[cfg(feature = "std")]
pub mod clock;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use config::{ConfigError, GestureConfig, StabilizerConfig, Thresholds};
pub use dispatch::{ActionDispatcher, ActionTable, GestureSession, LabelDisplay, Note};
pub use finger::{Finger, FingerStates};
pub use gesture::{classify, GestureClassifier, GestureLabel};
pub use landmark::{HandJoint, Landmark, LandmarkFrame};
pub use stabilizer::{Decision, FrameOutcome, Stabilizer, StabilizerState, TransitionEvent};
