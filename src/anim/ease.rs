//! Easing curves for enter animations.

use serde::Deserialize;
use std::time::Duration;

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// No easing.
    Linear,
    /// Decelerating quadratic.
    OutQuad,
    /// Decelerating cubic.
    #[default]
    OutCubic,
    /// Quadratic ease in, then out.
    InOutQuad,
}

impl Ease {
    /// Map `t` (clamped to `0.0..=1.0`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

/// A delayed, eased transition from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Wait before the transition starts.
    pub delay: Duration,
    /// Time from start to finish.
    pub duration: Duration,
    /// Curve applied to the progress.
    pub ease: Ease,
}

impl Transition {
    /// A transition starting after `delay` and lasting `duration`.
    pub const fn new(delay: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            delay,
            duration,
            ease,
        }
    }

    /// Eased progress `elapsed` after the transition was triggered.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        self.ease
            .apply(active.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Whether the transition has reached its end state.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}
