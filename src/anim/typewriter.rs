//! Cycling typewriter headline.
//!
//! Types each phrase one character at a time, holds the full phrase, deletes
//! it one character at a time, then moves on to the next phrase, forever.
//!
//! # State Machine
//!
//! ```text
//!            type tick               hold elapsed
//! Growing ──(full phrase)──▶ PausedFull ──────────▶ Shrinking
//!    ▲                                                  │
//!    └──────────── (empty, next phrase) ◀───────────────┘
//!                        delete tick
//! ```
//!
//! The machine is purely time-driven: [`Typewriter::advance`] replays every
//! step whose deadline is at or before `now`, so it behaves the same under a
//! coarse event-loop tick, a virtual clock, or a long stall.

use super::ticker::Animated;
use std::time::Duration;
use thiserror::Error;

/// Default delay between typed characters.
pub const DEFAULT_TYPE_INTERVAL: Duration = Duration::from_millis(100);

/// Default delay between deleted characters.
pub const DEFAULT_DELETE_INTERVAL: Duration = Duration::from_millis(50);

/// Default hold on the full phrase before deleting.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(2000);

/// Errors constructing a [`Typewriter`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    /// The phrase list was empty; there is nothing to cycle through.
    #[error("typewriter needs at least one phrase")]
    NoPhrases,
}

/// Cadence of the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Delay between typed characters.
    pub type_interval: Duration,
    /// Delay between deleted characters.
    pub delete_interval: Duration,
    /// How long the full phrase stays on screen.
    pub hold: Duration,
}

impl TypewriterTiming {
    /// Every interval raised to at least 1ms so time always moves forward.
    pub fn clamped(self) -> Self {
        let floor = Duration::from_millis(1);
        Self {
            type_interval: self.type_interval.max(floor),
            delete_interval: self.delete_interval.max(floor),
            hold: self.hold.max(floor),
        }
    }
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_interval: DEFAULT_TYPE_INTERVAL,
            delete_interval: DEFAULT_DELETE_INTERVAL,
            hold: DEFAULT_HOLD,
        }
    }
}

/// Current mode of the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Appending characters toward the full phrase.
    Growing,
    /// Showing the full phrase until the hold elapses.
    PausedFull,
    /// Removing characters toward the empty string.
    Shrinking,
}

/// Infinite phrase-cycling typewriter.
///
/// # Examples
///
/// ```rust
/// use folio::anim::ticker::Animated;
/// use folio::anim::typewriter::{Typewriter, TypewriterTiming};
/// use std::time::Duration;
///
/// let mut tw = Typewriter::new(
///     vec!["hi".to_string()],
///     TypewriterTiming::default(),
///     Duration::ZERO,
/// )
/// .unwrap();
///
/// tw.advance(Duration::from_millis(100));
/// assert_eq!(tw.displayed(), "h");
/// tw.advance(Duration::from_millis(200));
/// assert_eq!(tw.displayed(), "hi");
/// ```
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    active: usize,
    /// Byte length of the displayed prefix, always on a char boundary.
    shown: usize,
    phase: Phase,
    next_due: Duration,
}

impl Typewriter {
    /// Create a typewriter whose first character appears one type interval
    /// after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`TypewriterError::NoPhrases`] if `phrases` is empty.
    pub fn new(
        phrases: Vec<String>,
        timing: TypewriterTiming,
        start: Duration,
    ) -> Result<Self, TypewriterError> {
        if phrases.is_empty() {
            return Err(TypewriterError::NoPhrases);
        }
        let timing = timing.clamped();
        Ok(Self {
            phrases,
            timing,
            active: 0,
            shown: 0,
            phase: Phase::Growing,
            next_due: start + timing.type_interval,
        })
    }

    /// The text currently on screen. Always a prefix of [`Self::active_phrase`].
    pub fn displayed(&self) -> &str {
        &self.phrases[self.active][..self.shown]
    }

    /// Index of the phrase being typed or deleted.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The phrase being typed or deleted.
    pub fn active_phrase(&self) -> &str {
        &self.phrases[self.active]
    }

    /// All phrases in cycle order.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Current state of the machine.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Timing in effect, after clamping.
    pub fn timing(&self) -> TypewriterTiming {
        self.timing
    }

    /// Time at which the next step happens.
    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Perform exactly one transition and schedule the next one relative to
    /// the deadline just consumed.
    pub fn step(&mut self) {
        let due = self.next_due;
        match self.phase {
            Phase::Growing => {
                let phrase = &self.phrases[self.active];
                if let Some(ch) = phrase[self.shown..].chars().next() {
                    self.shown += ch.len_utf8();
                }
                if self.shown == phrase.len() {
                    self.phase = Phase::PausedFull;
                    self.next_due = due + self.timing.hold;
                } else {
                    self.next_due = due + self.timing.type_interval;
                }
            }
            Phase::PausedFull => {
                self.phase = Phase::Shrinking;
                self.next_due = due + self.timing.delete_interval;
            }
            Phase::Shrinking => {
                if let Some(ch) = self.displayed().chars().next_back() {
                    self.shown -= ch.len_utf8();
                }
                if self.shown == 0 {
                    self.active = (self.active + 1) % self.phrases.len();
                    self.phase = Phase::Growing;
                    self.next_due = due + self.timing.type_interval;
                } else {
                    self.next_due = due + self.timing.delete_interval;
                }
            }
        }
    }

    /// The infinite sequence of display states, starting from the current
    /// state. Does not modify `self`.
    pub fn frames(&self) -> Frames {
        Frames {
            machine: self.clone(),
            emitted_current: false,
        }
    }
}

impl Animated for Typewriter {
    fn advance(&mut self, now: Duration) -> bool {
        let before = (self.active, self.shown);
        while self.next_due <= now {
            self.step();
        }
        before != (self.active, self.shown)
    }

    fn next_deadline(&self) -> Option<Duration> {
        Some(self.next_due)
    }
}

/// A display state produced by [`Frames`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// When this text appears.
    pub at: Duration,
    /// Index of the phrase being typed.
    pub phrase: usize,
    /// Text on screen from `at` until the next frame.
    pub text: String,
}

/// Lazy, unbounded iterator over a typewriter's display changes.
///
/// Yields the current state first, then one item per visible change. Steps
/// that do not change the text (entering the hold, leaving it) are folded
/// into the following frame's timing.
#[derive(Debug, Clone)]
pub struct Frames {
    machine: Typewriter,
    emitted_current: bool,
}

impl Iterator for Frames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if !self.emitted_current {
            self.emitted_current = true;
            return Some(self.frame_at(None));
        }
        let before = (self.machine.active, self.machine.shown);
        let mut at = self.machine.next_due;
        // Any visible change is at most three steps away, except for a lone
        // empty phrase, which repeats "" once per cycle.
        for _ in 0..3 {
            at = self.machine.next_due;
            self.machine.step();
            if (self.machine.active, self.machine.shown) != before {
                break;
            }
        }
        Some(self.frame_at(Some(at)))
    }
}

impl Frames {
    fn frame_at(&self, at: Option<Duration>) -> Frame {
        let at = at.unwrap_or_else(|| {
            // Current state has been on screen since one interval before the next step.
            let interval = match self.machine.phase {
                Phase::Growing => self.machine.timing.type_interval,
                Phase::PausedFull => self.machine.timing.hold,
                Phase::Shrinking => self.machine.timing.delete_interval,
            };
            self.machine.next_due.saturating_sub(interval)
        });
        Frame {
            at,
            phrase: self.machine.active,
            text: self.machine.displayed().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "typewriter_tests.rs"]
mod tests;
