//! Python FFI bindings via PyO3.
//!
//! Most hand landmarkers people actually run (MediaPipe, ML Kit wrappers) live
//! in Python. These bindings let a Python capture loop hand one hand's points
//! to the Rust pipeline per frame.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! import time
//! from handsign_core import GestureClassifier, GestureSession, sound_for
//!
//! clf = GestureClassifier()
//! session = GestureSession(cooldown_ms=500)
//!
//! # points: up to 21 (x, y, z) tuples from the landmarker, y grows downward
//! points = [(lm.x, lm.y, lm.z) for lm in result.hand_landmarks[0]]
//! print(clf.classify(points))             # "VICTORY"
//!
//! label, transition = session.on_frame(points, int(time.monotonic() * 1000))
//! if transition is not None:
//!     play(sound_for(transition))          # "note_f"
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{GestureConfig, StabilizerConfig, Thresholds};
use crate::dispatch::ActionTable;
use crate::finger::Finger;
use crate::gesture::{GestureClassifier as RustClassifier, GestureLabel};
use crate::landmark::{Landmark, LandmarkFrame};
use crate::stabilizer::{FrameOutcome, Stabilizer, StabilizerState};

fn points_to_frame(points: &[(f32, f32, f32)]) -> LandmarkFrame {
    let landmarks: Vec<Landmark> = points.iter().map(|p| Landmark::from(*p)).collect();
    LandmarkFrame::from_slice(&landmarks)
}

// ── GestureClassifier ─────────────────────────────────────────────────────────

/// Stateless frame → label classifier.
#[pyclass(name = "GestureClassifier")]
#[derive(Clone)]
pub struct PyGestureClassifier {
    inner: RustClassifier,
}

#[pymethods]
impl PyGestureClassifier {
    /// Create a classifier.
    ///
    /// Args:
    ///     finger_open_ratio: tip/mid distance ratio above which a finger is open (default 1.5)
    ///     thumb_raise:       wrist.y - thumb_tip.y above which the thumb is raised (default 0.15)
    #[new]
    #[pyo3(signature = (finger_open_ratio=1.5, thumb_raise=0.15))]
    pub fn new(finger_open_ratio: f32, thumb_raise: f32) -> PyResult<Self> {
        let inner = RustClassifier::new(Thresholds { finger_open_ratio, thumb_raise })
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Classify one hand.
    ///
    /// Args:
    ///     points: list of up to 21 (x, y, z) tuples
    ///
    /// Returns:
    ///     One of "OPEN_PALM", "CLOSED_FIST", "POINTING_UP", "VICTORY",
    ///     "THUMB_UP", "PINKY_OUT", "ROCK_ON", "UNKNOWN"
    pub fn classify(&self, points: Vec<(f32, f32, f32)>) -> &'static str {
        self.inner.classify(&points_to_frame(&points)).as_str()
    }

    /// Open/closed for thumb, index, middle, ring, pinky.
    pub fn finger_states(&self, points: Vec<(f32, f32, f32)>) -> [bool; 5] {
        let pose = self.inner.pose(&points_to_frame(&points));
        Finger::ALL.map(|f| pose.fingers.is_open(f))
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let t = self.inner.thresholds();
        format!(
            "GestureClassifier(finger_open_ratio={:.2}, thumb_raise={:.2})",
            t.finger_open_ratio, t.thumb_raise
        )
    }
}

// ── GestureSession ────────────────────────────────────────────────────────────

/// Throttled, debounced gesture stream for one capture session.
///
/// Feed every frame; act on the transition when it is not None.
#[pyclass(name = "GestureSession")]
pub struct PyGestureSession {
    stabilizer: Stabilizer,
    state: StabilizerState,
}

#[pymethods]
impl PyGestureSession {
    /// Start a session.
    ///
    /// Args:
    ///     frame_interval_ms: frames closer than this to the last classified one are dropped (default 100)
    ///     cooldown_ms:       minimum spacing between transitions (default 500)
    ///     finger_open_ratio: see GestureClassifier (default 1.5)
    ///     thumb_raise:       see GestureClassifier (default 0.15)
    #[new]
    #[pyo3(signature = (frame_interval_ms=100, cooldown_ms=500, finger_open_ratio=1.5, thumb_raise=0.15))]
    pub fn new(
        frame_interval_ms: u64,
        cooldown_ms: u64,
        finger_open_ratio: f32,
        thumb_raise: f32,
    ) -> PyResult<Self> {
        let config = GestureConfig {
            thresholds: Thresholds { finger_open_ratio, thumb_raise },
            stabilizer: StabilizerConfig { frame_interval_ms, cooldown_ms },
        };
        let stabilizer =
            Stabilizer::new(&config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { stabilizer, state: StabilizerState::new() })
    }

    /// Feed one frame.
    ///
    /// Args:
    ///     points: list of up to 21 (x, y, z) tuples
    ///     now_ms: monotonic timestamp in milliseconds
    ///
    /// Returns:
    ///     (label, transition): label is the raw classification or None if the
    ///     frame was throttled; transition is the newly emitted label or None.
    pub fn on_frame(
        &mut self,
        points: Vec<(f32, f32, f32)>,
        now_ms: u64,
    ) -> (Option<&'static str>, Option<&'static str>) {
        let outcome = self
            .stabilizer
            .step(&mut self.state, &points_to_frame(&points), now_ms);
        match outcome {
            FrameOutcome::Throttled => (None, None),
            FrameOutcome::Classified { label, .. } => (
                Some(label.as_str()),
                outcome.transition().map(|e| e.label.as_str()),
            ),
        }
    }

    /// The last emitted label, or None before the first transition.
    #[getter]
    pub fn last_detected(&self) -> Option<&'static str> {
        self.state.last_detected.map(|l| l.as_str())
    }

    /// Forget all timers and the last label.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let c = self.stabilizer.config();
        format!(
            "GestureSession(frame_interval_ms={}, cooldown_ms={})",
            c.frame_interval_ms, c.cooldown_ms
        )
    }
}

// ── Module functions ──────────────────────────────────────────────────────────

/// Default sound asset for a label, e.g. "VICTORY" -> "note_f".
///
/// Returns None for "UNKNOWN". Raises ValueError for unrecognised strings.
#[pyfunction]
pub fn sound_for(label: &str) -> PyResult<Option<&'static str>> {
    let label: GestureLabel = label
        .parse()
        .map_err(|e: crate::gesture::ParseLabelError| PyValueError::new_err(e.to_string()))?;
    Ok(ActionTable::default().sound_for(label).map(|n| n.asset_name()))
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Hand sign classification and stabilisation.
///
/// Landmarks are one hand's 21 (x, y, z) points in detector order, y downward.
#[pymodule]
pub fn handsign_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGestureClassifier>()?;
    m.add_class::<PyGestureSession>()?;
    m.add_function(wrap_pyfunction!(sound_for, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "LABELS",
        GestureLabel::ALL.map(|l| l.as_str()).to_vec(),
    )?;
    Ok(())
}
