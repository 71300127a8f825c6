//! Viewport intersection observation.
//!
//! [`IntersectionSource`] is the capability reveal trackers consume:
//! register a region with a threshold and root margin, receive reports when
//! its visibility changes, cancel the registration. [`Viewport`] implements
//! it for the terminal, measuring regions in rows of the scrolled page.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{trace, warn};

// ===== Identifiers =====

/// Identifies a renderable region of the page. The page layout owns the
/// region; observers only refer to it by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(usize);

impl RegionId {
    /// Region at position `index` in the page layout.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index.
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Handle for one live observation, returned by [`IntersectionSource::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationToken(u64);

impl ObservationToken {
    /// Token from a raw counter value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

// ===== Threshold =====

/// Threshold outside `[0, 1]`.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("threshold must be within 0.0..=1.0, got {0}")]
pub struct ThresholdError(pub f64);

/// Fraction of a region that must be visible to count as intersecting.
///
/// `0.0` means any overlap at all.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Threshold used when none is configured.
    pub const DEFAULT: Threshold = Threshold(0.1);

    /// # Errors
    ///
    /// Returns [`ThresholdError`] for NaN or values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ThresholdError(value))
        }
    }

    /// The fraction.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether a visible `ratio` satisfies this threshold.
    pub fn is_met_by(self, ratio: f64) -> bool {
        if self.0 == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.0
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ===== RootMargin =====

/// Root margin string that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid root margin {input:?}: {reason}")]
pub struct MarginParseError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: String,
}

/// Largest percentage magnitude a margin component may use.
pub const MAX_MARGIN_PERCENT: f64 = 1000.0;

/// Bound on a resolved margin, so root bounds stay well inside `i64`.
const MAX_RESOLVED_MARGIN: i64 = u32::MAX as i64;

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    /// Terminal cells (rows for top/bottom, columns for left/right).
    Cells(i32),
    /// Percent of the viewport's height (top/bottom) or width (left/right).
    Percent(f64),
}

impl MarginLength {
    fn parse(token: &str) -> Result<Self, String> {
        if token == "0" {
            return Ok(Self::Cells(0));
        }
        if let Some(number) = token.strip_suffix("px") {
            return number
                .parse::<i32>()
                .map(Self::Cells)
                .map_err(|e| format!("{token:?}: {e}"));
        }
        if let Some(number) = token.strip_suffix('%') {
            return match number.parse::<f64>() {
                Ok(value) if value.is_finite() && value.abs() <= MAX_MARGIN_PERCENT => {
                    Ok(Self::Percent(value))
                }
                Ok(_) => Err(format!(
                    "{token:?}: percentage must be within ±{MAX_MARGIN_PERCENT}%"
                )),
                Err(e) => Err(format!("{token:?}: {e}")),
            };
        }
        Err(format!("{token:?}: expected a px or % length"))
    }

    /// Resolve to cells against a viewport dimension.
    ///
    /// The result is clamped to `±u32::MAX` whatever the length was built
    /// from.
    pub fn resolve(self, dimension: u16) -> i64 {
        let cells = match self {
            Self::Cells(cells) => i64::from(cells),
            Self::Percent(pct) => (pct * f64::from(dimension) / 100.0).round() as i64,
        };
        cells.clamp(-MAX_RESOLVED_MARGIN, MAX_RESOLVED_MARGIN)
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cells(cells) => write!(f, "{cells}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Grows (positive) or shrinks (negative) the viewport before intersecting,
/// written in CSS margin shorthand: `"0px"`, `"-2px 0px"`, `"10% 0px 5px"`,
/// `"1px 2px 3px 4px"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    /// Margin above the viewport.
    pub top: MarginLength,
    /// Margin right of the viewport.
    pub right: MarginLength,
    /// Margin below the viewport.
    pub bottom: MarginLength,
    /// Margin left of the viewport.
    pub left: MarginLength,
}

impl RootMargin {
    /// No margin on any side.
    pub const ZERO: RootMargin = RootMargin {
        top: MarginLength::Cells(0),
        right: MarginLength::Cells(0),
        bottom: MarginLength::Cells(0),
        left: MarginLength::Cells(0),
    };

    /// Parse CSS margin shorthand with one to four components.
    ///
    /// # Errors
    ///
    /// Returns [`MarginParseError`] for an empty string, more than four
    /// components, or a component that is not `0`, `<int>px` or `<number>%`.
    pub fn parse(input: &str) -> Result<Self, MarginParseError> {
        let err = |reason: String| MarginParseError {
            input: input.to_string(),
            reason,
        };

        let parts = input
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<Result<Vec<_>, _>>()
            .map_err(err)?;

        match parts.as_slice() {
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            [] => Err(err("expected at least one length".to_string())),
            _ => Err(err(format!(
                "expected at most four lengths, got {}",
                parts.len()
            ))),
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

// ===== Capability =====

/// Parameters of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObserveOptions {
    /// Fraction of the region that must be visible.
    pub threshold: Threshold,
    /// Margin applied to the viewport first.
    pub root_margin: RootMargin,
}

/// One intersection report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    /// Observation the report belongs to.
    pub token: ObservationToken,
    /// Observed region.
    pub region: RegionId,
    /// Whether the ratio meets the threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the region in `[0, 1]`.
    pub ratio: f64,
}

/// Viewport intersection capability.
pub trait IntersectionSource {
    /// Start observing `region`. The next report cycle always includes an
    /// initial report for the new token.
    fn observe(&mut self, region: RegionId, options: &ObserveOptions) -> ObservationToken;

    /// Stop observing. Cancelled tokens never report again.
    fn cancel(&mut self, token: ObservationToken);
}

/// Shared handle to the loop's intersection source.
pub type SharedSource = Rc<RefCell<dyn IntersectionSource>>;

/// Scoped observation: cancels itself when dropped.
pub struct Observation {
    token: ObservationToken,
    region: RegionId,
    source: Weak<RefCell<dyn IntersectionSource>>,
}

impl Observation {
    /// Register `region` with `source` for as long as the returned guard lives.
    pub fn start(source: &SharedSource, region: RegionId, options: &ObserveOptions) -> Self {
        let token = source.borrow_mut().observe(region, options);
        Self {
            token,
            region,
            source: Rc::downgrade(source),
        }
    }

    /// Token the source issued.
    pub fn token(&self) -> ObservationToken {
        self.token
    }

    /// Observed region.
    pub fn region(&self) -> RegionId {
        self.region
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("token", &self.token)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        match source.try_borrow_mut() {
            Ok(mut source) => source.cancel(self.token),
            Err(_) => warn!(
                token = ?self.token,
                "intersection source busy, observation not cancelled"
            ),
        };
    }
}

// ===== Terminal viewport =====

/// Vertical extent of a region in page rows. Regions span the full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRect {
    /// First row.
    pub top: u32,
    /// Rows spanned.
    pub height: u32,
}

/// Where each region sits on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionLayout {
    regions: Vec<(RegionId, RegionRect)>,
    total_height: u32,
}

impl RegionLayout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region of `height` rows below the previous one.
    pub fn push(&mut self, region: RegionId, height: u32) -> RegionRect {
        let rect = RegionRect {
            top: self.total_height,
            height,
        };
        self.regions.push((region, rect));
        self.total_height += height;
        rect
    }

    /// Where `region` sits, if it is laid out.
    pub fn get(&self, region: RegionId) -> Option<RegionRect> {
        self.regions
            .iter()
            .find(|(id, _)| *id == region)
            .map(|(_, rect)| *rect)
    }

    /// Regions in page order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, RegionRect)> + '_ {
        self.regions.iter().copied()
    }

    /// Rows spanned by all regions.
    pub fn total_height(&self) -> u32 {
        self.total_height
    }
}

/// The visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBounds {
    /// First visible page row.
    pub scroll: u32,
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}

#[derive(Debug)]
struct Registration {
    region: RegionId,
    options: ObserveOptions,
    last: Option<bool>,
}

/// Terminal implementation of [`IntersectionSource`].
#[derive(Debug, Default)]
pub struct Viewport {
    next_token: u64,
    registrations: BTreeMap<ObservationToken, Registration>,
}

impl Viewport {
    /// A viewport with no observations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live observations.
    pub fn observation_count(&self) -> usize {
        self.registrations.len()
    }

    /// Recompute every observation against the current layout and bounds.
    ///
    /// Returns reports in registration order, one per observation whose
    /// state changed (or which has never reported).
    pub fn update(
        &mut self,
        layout: &RegionLayout,
        bounds: ViewportBounds,
    ) -> Vec<IntersectionEvent> {
        let mut events = Vec::new();
        for (token, registration) in &mut self.registrations {
            let ratio = layout
                .get(registration.region)
                .map_or(0.0, |rect| visible_ratio(rect, bounds, &registration.options.root_margin));
            let is_intersecting = registration.options.threshold.is_met_by(ratio);

            if registration.last != Some(is_intersecting) {
                registration.last = Some(is_intersecting);
                trace!(?token, region = registration.region.get(), ratio, is_intersecting, "intersection changed");
                events.push(IntersectionEvent {
                    token: *token,
                    region: registration.region,
                    is_intersecting,
                    ratio,
                });
            }
        }
        events
    }
}

impl IntersectionSource for Viewport {
    fn observe(&mut self, region: RegionId, options: &ObserveOptions) -> ObservationToken {
        self.next_token += 1;
        let token = ObservationToken(self.next_token);
        self.registrations.insert(
            token,
            Registration {
                region,
                options: *options,
                last: None,
            },
        );
        token
    }

    fn cancel(&mut self, token: ObservationToken) {
        self.registrations.remove(&token);
    }
}

/// Visible fraction of `rect` inside the margin-adjusted viewport.
fn visible_ratio(rect: RegionRect, bounds: ViewportBounds, margin: &RootMargin) -> f64 {
    let scroll = i64::from(bounds.scroll);
    let root_top = scroll.saturating_sub(margin.top.resolve(bounds.height));
    let root_bottom = (scroll + i64::from(bounds.height))
        .saturating_add(margin.bottom.resolve(bounds.height));
    let root_left = margin.left.resolve(bounds.width).saturating_neg();
    let root_right = i64::from(bounds.width).saturating_add(margin.right.resolve(bounds.width));

    let top = i64::from(rect.top);
    let bottom = top + i64::from(rect.height);
    let width = i64::from(bounds.width);

    if root_bottom <= root_top || root_right <= root_left {
        return 0.0;
    }

    // Zero-area regions count as fully visible when they touch the root.
    if rect.height == 0 || width == 0 {
        let inside_v = top >= root_top && top <= root_bottom;
        let inside_h = root_left <= 0 && root_right >= 0;
        return if inside_v && inside_h { 1.0 } else { 0.0 };
    }

    let v_overlap = (bottom.min(root_bottom) - top.max(root_top)).max(0);
    let h_overlap = (width.min(root_right) - root_left.max(0)).max(0);
    (v_overlap * h_overlap) as f64 / (i64::from(rect.height) * width) as f64
}
