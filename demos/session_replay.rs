//! # Session Replay
//!
//! Replays six seconds of synthetic camera output at ~30 fps through a
//! [`GestureSession`]. The scripted hand holds a few poses, then flickers
//! between two of them for a second, the way a real detector does when a hand
//! sits between signs.
//!
//! Every classified frame is shown on a "screen". Only stable transitions
//! reach the "speaker", and never closer together than the cooldown.
//!
//! ```text
//! 0.0s  fist ── 1.0s  open palm ── 2.0s  flicker ── 3.0s  thumb up ── 4.5s  rock on
//! ```
//!
//! ## Running this example
//!
//! ```
//! cargo run --example session_replay
//! ```

use handsign_core::dispatch::{ActionDispatcher, GestureSession, LabelDisplay, Note};
use handsign_core::gesture::GestureLabel;
use handsign_core::landmark::{HandJoint, Landmark, LandmarkFrame, MAX_LANDMARKS};
use handsign_core::stabilizer::{Decision, FrameOutcome, TransitionEvent};

// ── Synthetic hands ──────────────────────────────────────────────────────────

/// Right hand, palm to camera. `fingers` is index, middle, ring, pinky.
fn hand(thumb_up: bool, fingers: [bool; 4]) -> LandmarkFrame {
    let mut p = [Landmark::default(); MAX_LANDMARKS];
    p[HandJoint::Wrist.index()] = Landmark::new(0.5, 0.9, 0.0);
    p[HandJoint::ThumbCmc.index()] = Landmark::new(0.40, 0.80, 0.0);
    p[HandJoint::ThumbMcp.index()] = Landmark::new(0.35, 0.75, 0.0);
    if thumb_up {
        p[HandJoint::ThumbIp.index()] = Landmark::new(0.33, 0.70, 0.0);
        p[HandJoint::ThumbTip.index()] = Landmark::new(0.32, 0.60, 0.0);
    } else {
        p[HandJoint::ThumbIp.index()] = Landmark::new(0.36, 0.78, 0.0);
        p[HandJoint::ThumbTip.index()] = Landmark::new(0.39, 0.79, 0.0);
    }

    let mcps = [HandJoint::IndexMcp, HandJoint::MiddleMcp, HandJoint::RingMcp, HandJoint::PinkyMcp];
    for (i, (mcp, open)) in mcps.iter().zip(fingers).enumerate() {
        let x = 0.42 + 0.06 * i as f32;
        let b = mcp.index();
        p[b] = Landmark::new(x, 0.60, 0.0);
        p[b + 1] = Landmark::new(x, 0.55, 0.0);
        let (dip, tip) = if open { (0.50, 0.45) } else { (0.53, 0.58) };
        p[b + 2] = Landmark::new(x, dip, 0.0);
        p[b + 3] = Landmark::new(x, tip, 0.0);
    }
    LandmarkFrame::from_slice(&p)
}

/// The flicker alternates every 150 ms, slower than the throttle, so both
/// poses reach the classifier.
fn scripted_frame(t_ms: u64) -> LandmarkFrame {
    match t_ms {
        0..=999 => hand(false, [false; 4]),
        1_000..=1_999 => hand(true, [true; 4]),
        2_000..=2_999 if (t_ms / 150) % 2 == 0 => hand(false, [true, true, false, false]),
        2_000..=2_999 => hand(false, [true, false, false, false]),
        3_000..=4_499 => hand(true, [false; 4]),
        _ => hand(false, [true, false, false, true]),
    }
}

// ── Sinks ────────────────────────────────────────────────────────────────────

struct Speaker {
    played: u32,
}

impl ActionDispatcher for Speaker {
    fn dispatch(&mut self, event: &TransitionEvent, note: Note) {
        self.played += 1;
        let from = event.previous.map(|p| p.as_str()).unwrap_or("-");
        println!(
            "  {:>5} ms  ♪ {:<7}  {:<12} → {}",
            event.at_ms,
            note.asset_name(),
            from,
            event.label,
        );
    }
}

#[derive(Default)]
struct Screen {
    shown: u32,
    last: Option<&'static str>,
}

impl LabelDisplay for Screen {
    fn show(&mut self, label: &str) {
        self.shown += 1;
        self.last = GestureLabel::ALL.iter().map(|l| l.as_str()).find(|s| *s == label);
    }
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    println!("Session replay: 6 s at ~30 fps, 100 ms throttle, 500 ms cooldown\n");

    let mut session = GestureSession::with_defaults(Speaker { played: 0 }, Screen::default());
    let mut frames = 0u64;
    let mut throttled = 0u32;
    let mut cooling = 0u32;

    let mut t = 0u64;
    while t < 6_000 {
        match session.on_frame(&scripted_frame(t), t) {
            FrameOutcome::Throttled => throttled += 1,
            FrameOutcome::Classified { decision: Decision::CoolingDown, label } => {
                cooling += 1;
                println!("  {:>5} ms    (held)   {} dropped inside cooldown", t, label);
            }
            FrameOutcome::Classified { .. } => {}
        }
        frames += 1;
        t += 33;
    }

    let (speaker, screen) = session.end();
    println!();
    println!("  frames delivered : {}", frames);
    println!("  throttled        : {}", throttled);
    println!("  labels displayed : {}", screen.shown);
    println!("  cooldown drops   : {}", cooling);
    println!("  sounds played    : {}", speaker.played);
    println!("  final label      : {}", screen.last.unwrap_or("-"));
}
