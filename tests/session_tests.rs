//! End-to-end session tests: frames in, display labels and sounds out.

use handsign_core::config::{ConfigError, GestureConfig, StabilizerConfig, Thresholds};
use handsign_core::dispatch::{
    ActionDispatcher, ActionTable, GestureSession, LabelDisplay, NullSink, Note,
};
use handsign_core::gesture::GestureLabel;
use handsign_core::landmark::{HandJoint, Landmark, LandmarkFrame};
use handsign_core::stabilizer::{Decision, FrameOutcome, TransitionEvent};

// ─── helpers ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Speaker {
    played: Vec<(GestureLabel, Note, u64)>,
}

impl ActionDispatcher for Speaker {
    fn dispatch(&mut self, event: &TransitionEvent, note: Note) {
        self.played.push((event.label, note, event.at_ms));
    }
}

#[derive(Default)]
struct Screen {
    lines: Vec<String>,
}

impl LabelDisplay for Screen {
    fn show(&mut self, label: &str) {
        self.lines.push(format!("Detected: {}", label));
    }
}

fn fist() -> LandmarkFrame {
    LandmarkFrame::empty()
}

fn victory() -> LandmarkFrame {
    let mut p = [Landmark::default(); 13];
    for (mcp, x) in [(HandJoint::IndexMcp, 0.45), (HandJoint::MiddleMcp, 0.5)] {
        let base = mcp.index();
        p[base] = Landmark::new(x, 0.6, 0.0);
        p[base + 1] = Landmark::new(x, 0.55, 0.0);
        p[base + 2] = Landmark::new(x, 0.5, 0.0);
        p[base + 3] = Landmark::new(x, 0.45, 0.0);
    }
    LandmarkFrame::from_slice(&p)
}

fn pointing() -> LandmarkFrame {
    let mut p = [Landmark::default(); 9];
    let base = HandJoint::IndexMcp.index();
    for (k, y) in [0.6, 0.55, 0.5, 0.45].into_iter().enumerate() {
        p[base + k] = Landmark::new(0.45, y, 0.0);
    }
    LandmarkFrame::from_slice(&p)
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[test]
fn test_display_sees_every_classified_frame() {
    let mut session = GestureSession::with_defaults(Speaker::default(), Screen::default());

    // fist, then victory inside the cooldown, then victory after it.
    session.on_frame(&fist(), 0);
    session.on_frame(&victory(), 40); // throttled
    session.on_frame(&victory(), 200);
    session.on_frame(&victory(), 600);

    let (speaker, screen) = session.end();
    assert_eq!(
        screen.lines,
        vec!["Detected: CLOSED_FIST", "Detected: VICTORY", "Detected: VICTORY"]
    );
    assert_eq!(
        speaker.played,
        vec![
            (GestureLabel::ClosedFist, Note::D, 0),
            (GestureLabel::Victory, Note::F, 600),
        ]
    );
}

/// A hand flickering between two signs every 150 ms, sampled at ~30 fps:
/// both signs reach the display, and changes inside the cooldown are held.
#[test]
fn test_flicker_slower_than_throttle_reaches_display() {
    let mut session = GestureSession::with_defaults(Speaker::default(), Screen::default());
    let mut held = 0;
    for t in (0..1_000u64).step_by(33) {
        let frame = if (t / 150) % 2 == 0 { victory() } else { pointing() };
        if let FrameOutcome::Classified { decision: Decision::CoolingDown, .. } =
            session.on_frame(&frame, t)
        {
            held += 1;
        }
    }

    let (speaker, screen) = session.end();
    assert!(screen.lines.iter().any(|l| l == "Detected: VICTORY"));
    assert!(screen.lines.iter().any(|l| l == "Detected: POINTING_UP"));
    assert!(held >= 2, "only {} changes held", held);
    assert_eq!(
        speaker.played,
        vec![(GestureLabel::Victory, Note::F, 0), (GestureLabel::PointingUp, Note::E, 528)]
    );
}

#[test]
fn test_custom_action_table() {
    let mut table = ActionTable::empty();
    table.insert(GestureLabel::Victory, Note::C).expect("known label");

    let mut session = GestureSession::new(
        &GestureConfig::default(),
        table,
        Speaker::default(),
        NullSink,
    )
    .expect("default config is valid");

    session.on_frame(&fist(), 0);
    session.on_frame(&victory(), 1_000);

    assert_eq!(session.state().last_detected, Some(GestureLabel::Victory));
    let (speaker, _) = session.end();
    // The fist transition still happened; it just had no sound.
    assert_eq!(speaker.played, vec![(GestureLabel::Victory, Note::C, 1_000)]);
}

#[test]
fn test_session_rejects_invalid_config() {
    let bad_ratio = GestureConfig {
        thresholds: Thresholds { finger_open_ratio: -1.0, ..Thresholds::default() },
        ..GestureConfig::default()
    };
    let err = GestureSession::new(&bad_ratio, ActionTable::default(), NullSink, NullSink).err();
    assert_eq!(err, Some(ConfigError::NonPositiveRatio(-1.0)));

    let bad_interval = GestureConfig {
        stabilizer: StabilizerConfig { frame_interval_ms: 0, cooldown_ms: 500 },
        ..GestureConfig::default()
    };
    let err = GestureSession::new(&bad_interval, ActionTable::default(), NullSink, NullSink).err();
    assert_eq!(err, Some(ConfigError::ZeroFrameInterval));
}

#[test]
fn test_sinks_by_reference() {
    let mut speaker = Speaker::default();
    let mut screen = Screen::default();
    {
        let mut session = GestureSession::with_defaults(&mut speaker, &mut screen);
        for t in (0..3_000).step_by(33) {
            let frame = if t < 1_500 { fist() } else { victory() };
            session.on_frame(&frame, t);
        }
    }
    assert_eq!(speaker.played.len(), 2);
    assert_eq!(speaker.played[1].0, GestureLabel::Victory);
    assert!(screen.lines.len() > 20);
}

#[cfg(feature = "std")]
#[test]
fn test_manual_clock_drives_session() {
    use handsign_core::clock::ManualClock;

    let mut clock = ManualClock::starting_at(5_000);
    let mut session = GestureSession::with_defaults(Speaker::default(), NullSink);
    session.on_frame_now(&fist(), &clock);
    clock.advance(50);
    assert!(session.on_frame_now(&victory(), &clock).label().is_none());
    clock.advance(600);
    assert!(session.on_frame_now(&victory(), &clock).transition().is_some());
}
