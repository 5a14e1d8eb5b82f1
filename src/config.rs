//! Tunable constants for classification and stabilisation.
//!
//! Every threshold the pipeline uses lives here, with the empirically chosen
//! defaults. None of them is a physical law; they were picked against a
//! front-facing phone camera at arm's length and should be re-tuned for other
//! setups.
//!
//! ```rust
//! use handsign_core::config::{GestureConfig, StabilizerConfig};
//!
//! let cfg = GestureConfig {
//!     stabilizer: StabilizerConfig { cooldown_ms: 750, ..StabilizerConfig::default() },
//!     ..GestureConfig::default()
//! };
//! assert!(cfg.validate().is_ok());
//! ```

use core::fmt;

/// Default finger-open ratio: tip-to-base must exceed 1.5 × mid-to-base.
pub const DEFAULT_FINGER_OPEN_RATIO: f32 = 1.5;

/// Default thumb-raise threshold, in normalised image units.
pub const DEFAULT_THUMB_RAISE: f32 = 0.15;

/// Default minimum spacing between classified frames.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;

/// Default minimum spacing between emitted gesture transitions.
pub const DEFAULT_COOLDOWN_MS: u64 = 500;

// ─── ConfigError ────────────────────────────────────────────────────────────

/// Rejected configuration value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `finger_open_ratio` must be strictly positive.
    NonPositiveRatio(f32),
    /// A threshold was NaN or infinite.
    NonFiniteThreshold(&'static str),
    /// `frame_interval_ms` of zero would classify every frame; use 1 for "no throttle".
    ZeroFrameInterval,
    /// `UNKNOWN` never maps to an action.
    UnknownHasNoAction,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveRatio(r) => {
                write!(f, "finger_open_ratio must be > 0, got {}", r)
            }
            ConfigError::NonFiniteThreshold(name) => write!(f, "{} must be finite", name),
            ConfigError::ZeroFrameInterval => f.write_str("frame_interval_ms must be at least 1"),
            ConfigError::UnknownHasNoAction => {
                f.write_str("UNKNOWN cannot be mapped to an action")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ─── Thresholds ─────────────────────────────────────────────────────────────

/// Geometric thresholds used by the finger extractor and classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// A finger is open when `dist(base, tip) > finger_open_ratio × dist(base, mid)`.
    pub finger_open_ratio: f32,
    /// The thumb counts as raised when `wrist.y − thumb_tip.y > thumb_raise`.
    pub thumb_raise: f32,
}

impl Thresholds {
    /// Check that both thresholds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.finger_open_ratio.is_finite() {
            return Err(ConfigError::NonFiniteThreshold("finger_open_ratio"));
        }
        if self.finger_open_ratio <= 0.0 {
            return Err(ConfigError::NonPositiveRatio(self.finger_open_ratio));
        }
        if !self.thumb_raise.is_finite() {
            return Err(ConfigError::NonFiniteThreshold("thumb_raise"));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            finger_open_ratio: DEFAULT_FINGER_OPEN_RATIO,
            thumb_raise: DEFAULT_THUMB_RAISE,
        }
    }
}

// ─── StabilizerConfig ───────────────────────────────────────────────────────

/// Timing for the frame throttle and the transition cooldown, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StabilizerConfig {
    /// Frames arriving sooner than this after the last classified frame are dropped.
    pub frame_interval_ms: u64,
    /// A label change is only emitted if strictly more than this has passed since
    /// the last emitted transition.
    pub cooldown_ms: u64,
}

impl StabilizerConfig {
    /// Check that the throttle interval is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

// ─── GestureConfig ──────────────────────────────────────────────────────────

/// Complete pipeline configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Geometry thresholds.
    pub thresholds: Thresholds,
    /// Timing.
    pub stabilizer: StabilizerConfig,
}

impl GestureConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.stabilizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GestureConfig::default();
        assert!((cfg.thresholds.finger_open_ratio - 1.5).abs() < f32::EPSILON);
        assert!((cfg.thresholds.thumb_raise - 0.15).abs() < f32::EPSILON);
        assert_eq!(cfg.stabilizer.frame_interval_ms, 100);
        assert_eq!(cfg.stabilizer.cooldown_ms, 500);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_ratio() {
        let t = Thresholds { finger_open_ratio: 0.0, ..Thresholds::default() };
        assert_eq!(t.validate(), Err(ConfigError::NonPositiveRatio(0.0)));

        let t = Thresholds { finger_open_ratio: -1.0, ..Thresholds::default() };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_thresholds() {
        let t = Thresholds { finger_open_ratio: f32::NAN, ..Thresholds::default() };
        assert_eq!(
            t.validate(),
            Err(ConfigError::NonFiniteThreshold("finger_open_ratio"))
        );

        let t = Thresholds { thumb_raise: f32::INFINITY, ..Thresholds::default() };
        assert_eq!(t.validate(), Err(ConfigError::NonFiniteThreshold("thumb_raise")));
    }

    #[test]
    fn test_negative_thumb_raise_is_allowed() {
        // A negative threshold accepts a thumb level with (or slightly below) the wrist.
        let t = Thresholds { thumb_raise: -0.05, ..Thresholds::default() };
        assert_eq!(t.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        let s = StabilizerConfig { frame_interval_ms: 0, ..StabilizerConfig::default() };
        assert_eq!(s.validate(), Err(ConfigError::ZeroFrameInterval));

        let cfg = GestureConfig { stabilizer: s, ..GestureConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFrameInterval));
    }

    #[test]
    fn test_zero_cooldown_is_allowed() {
        let s = StabilizerConfig { cooldown_ms: 0, ..StabilizerConfig::default() };
        assert_eq!(s.validate(), Ok(()));
    }
}
