//! Visibility reveal tracker.
//!
//! Tells a page section whether it is in view and whether it has ever been
//! in view, so the section can play its enter animation.
//!
//! # Lifecycle
//!
//! 1. [`RevealTracker::new`]: configured but idle; `is_intersecting()` is
//!    `false` and nothing is observed.
//! 2. [`RevealTracker::attach`]: acquires an [`Observation`] on a region.
//! 3. [`RevealTracker::handle`]: applies reports for the live observation.
//! 4. [`RevealTracker::detach`], [`RevealTracker::reconfigure`] or drop:
//!    the observation guard cancels itself; later reports are ignored.

use super::intersection::{
    IntersectionEvent, Observation, ObserveOptions, RegionId, RootMargin, SharedSource, Threshold,
};
use tracing::debug;

/// Configuration of a [`RevealTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackerOptions {
    /// Visible fraction required to count as intersecting. Default `0.1`.
    pub threshold: Threshold,
    /// Margin applied to the viewport before intersecting. Default `"0px"`.
    pub root_margin: RootMargin,
    /// Stop updating `is_intersecting` once the region has been seen.
    pub freeze_once_visible: bool,
}

impl TrackerOptions {
    /// Replace the threshold.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the root margin.
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Set whether `is_intersecting` freezes once the region has been seen.
    pub fn freeze_once_visible(mut self, freeze: bool) -> Self {
        self.freeze_once_visible = freeze;
        self
    }

    fn observe_options(&self) -> ObserveOptions {
        ObserveOptions {
            threshold: self.threshold,
            root_margin: self.root_margin,
        }
    }
}

/// Snapshot of a tracker's two signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealSignal {
    /// The region currently meets the threshold.
    pub is_intersecting: bool,
    /// The region has met the threshold at least once.
    pub has_been_visible: bool,
}

/// Tracks the visibility of one page region.
///
/// # Invariants
///
/// - `has_been_visible` never goes from `true` back to `false`.
/// - With `freeze_once_visible`, once `has_been_visible` is `true`,
///   `is_intersecting` stays `true`.
/// - Only reports carrying the current observation's token are applied.
#[derive(Debug, Default)]
pub struct RevealTracker {
    options: TrackerOptions,
    signal: RevealSignal,
    observation: Option<Observation>,
}

impl RevealTracker {
    /// An unattached tracker. Nothing is observed until [`attach`](Self::attach).
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options,
            signal: RevealSignal::default(),
            observation: None,
        }
    }

    /// Options the current observation was made with.
    pub fn options(&self) -> TrackerOptions {
        self.options
    }

    /// Whether the region currently meets the threshold.
    pub fn is_intersecting(&self) -> bool {
        self.signal.is_intersecting
    }

    /// Whether the region has ever met the threshold.
    pub fn has_been_visible(&self) -> bool {
        self.signal.has_been_visible
    }

    /// Both signals at once.
    pub fn signal(&self) -> RevealSignal {
        self.signal
    }

    /// Whether an observation is live.
    pub fn is_attached(&self) -> bool {
        self.observation.is_some()
    }

    /// The observed region, if attached.
    pub fn region(&self) -> Option<RegionId> {
        self.observation.as_ref().map(Observation::region)
    }

    /// Start observing `region`, replacing any previous observation.
    pub fn attach(&mut self, region: RegionId, source: &SharedSource) {
        // Release the old registration before acquiring the new one.
        self.observation = None;
        self.observation = Some(Observation::start(
            source,
            region,
            &self.options.observe_options(),
        ));
    }

    /// Stop observing. The signals keep their last values.
    pub fn detach(&mut self) {
        self.observation = None;
    }

    /// Replace the options. An attached tracker re-observes its region with
    /// the new parameters; the old observation is cancelled first.
    pub fn reconfigure(&mut self, options: TrackerOptions, source: &SharedSource) {
        self.options = options;
        if let Some(region) = self.region() {
            debug!(region = region.get(), threshold = options.threshold.get(), root_margin = %options.root_margin, "re-observing with new options");
            self.attach(region, source);
        }
    }

    /// Apply an intersection report. Returns `true` if a signal changed.
    ///
    /// Reports for other observations (including cancelled ones) are ignored.
    pub fn handle(&mut self, event: &IntersectionEvent) -> bool {
        let Some(observation) = &self.observation else {
            return false;
        };
        if observation.token() != event.token {
            return false;
        }

        let before = self.signal;
        let frozen = self.options.freeze_once_visible && self.signal.has_been_visible;

        if event.is_intersecting {
            self.signal.has_been_visible = true;
        }
        if !frozen {
            self.signal.is_intersecting = event.is_intersecting;
        }

        self.signal != before
    }
}

#[cfg(test)]
#[path = "reveal_tests.rs"]
mod tests;
