//! Scrollable page state: sections, their reveal trackers and the viewport.
//!
//! The page owns the terminal [`Viewport`] that every section tracker
//! observes. Each frame the shell measures the section heights for the
//! current width ([`PageState::set_layout`]), then calls
//! [`PageState::sync`] to turn the scroll position into intersection
//! reports for the trackers.

use crate::anim::ease::{Ease, Transition};
use crate::anim::intersection::{RegionId, RegionLayout, SharedSource, Viewport, ViewportBounds};
use crate::anim::reveal::{RevealTracker, TrackerOptions};
use crate::model::SectionId;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Length of one item's enter animation.
pub const REVEAL_DURATION: Duration = Duration::from_millis(800);

/// Items per section assumed when deciding whether a reveal has settled.
const SETTLE_ITEMS: u32 = 8;

/// Delay between consecutive items' enter animations in section `id`.
pub fn stagger(id: SectionId) -> Duration {
    let ms = match id {
        SectionId::Experience => 300,
        SectionId::Skills | SectionId::Contact => 100,
        _ => 200,
    };
    Duration::from_millis(ms)
}

/// Region a section occupies in the page layout.
pub fn region_of(id: SectionId) -> RegionId {
    RegionId::new(id.index())
}

/// One section's reveal state.
#[derive(Debug)]
pub struct SectionState {
    id: SectionId,
    tracker: RevealTracker,
    revealed_at: Option<Duration>,
}

impl SectionState {
    /// Which section this is.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// The section's reveal tracker.
    pub fn tracker(&self) -> &RevealTracker {
        &self.tracker
    }

    /// When the section was first seen.
    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }
}

/// Tracker options for `id`, given the configured options for content
/// sections. The hero uses the defaults; the footer reveals once.
pub fn tracker_options_for(id: SectionId, content: TrackerOptions) -> TrackerOptions {
    match id {
        SectionId::Hero => TrackerOptions::default(),
        SectionId::Footer => content.freeze_once_visible(true),
        _ => content,
    }
}

/// Scroll position, layout and reveal state of the whole page.
#[derive(Debug)]
pub struct PageState {
    viewport: Rc<RefCell<Viewport>>,
    sections: Vec<SectionState>,
    layout: RegionLayout,
    layout_width: Option<u16>,
    scroll: u32,
    viewport_height: u16,
    animations: bool,
    pending_jump: Option<SectionId>,
}

impl PageState {
    /// Build the page with one attached tracker per section.
    pub fn new(content_options: TrackerOptions, animations: bool) -> Self {
        let viewport = Rc::new(RefCell::new(Viewport::new()));
        let source: SharedSource = viewport.clone();

        let sections = SectionId::ALL
            .iter()
            .map(|&id| {
                let mut tracker = RevealTracker::new(tracker_options_for(id, content_options));
                tracker.attach(region_of(id), &source);
                SectionState {
                    id,
                    tracker,
                    revealed_at: None,
                }
            })
            .collect();

        Self {
            viewport,
            sections,
            layout: RegionLayout::new(),
            layout_width: None,
            scroll: 0,
            viewport_height: 0,
            animations,
            pending_jump: None,
        }
    }

    /// Whether enter animations play.
    pub fn animations(&self) -> bool {
        self.animations
    }

    /// Every section in page order.
    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    /// State of one section.
    pub fn section(&self, id: SectionId) -> &SectionState {
        &self.sections[id.index()]
    }

    /// Shared handle to the viewport the trackers observe.
    pub fn source(&self) -> SharedSource {
        self.viewport.clone()
    }

    /// Apply new tracker options to every content section.
    pub fn reconfigure(&mut self, content_options: TrackerOptions) {
        let source = self.source();
        for section in &mut self.sections {
            section
                .tracker
                .reconfigure(tracker_options_for(section.id, content_options), &source);
        }
    }

    // ===== Layout =====

    /// Width the current layout was measured for.
    pub fn layout_width(&self) -> Option<u16> {
        self.layout_width
    }

    /// Rows each section occupies.
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Replace the measured layout. Applies a pending section jump.
    pub fn set_layout(&mut self, width: u16, layout: RegionLayout) {
        debug!(width, total_height = layout.total_height(), "page layout measured");
        self.layout = layout;
        self.layout_width = Some(width);
        if let Some(id) = self.pending_jump.take() {
            self.scroll_to_section(id);
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    /// Set the rows available to the page and re-clamp the scroll.
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Rows available to the page.
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Scroll to `id` once a layout exists.
    pub fn jump_when_ready(&mut self, id: SectionId) {
        if self.layout_width.is_some() {
            self.scroll_to_section(id);
        } else {
            self.pending_jump = Some(id);
        }
    }

    // ===== Scrolling =====

    /// First visible page row.
    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    /// Largest scroll that still fills the viewport.
    pub fn max_scroll(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Scroll to `row`, clamped to [`max_scroll`](Self::max_scroll).
    pub fn scroll_to(&mut self, row: u32) {
        self.scroll = row.min(self.max_scroll());
    }

    /// Scroll by `delta` rows in either direction.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.scroll) + delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX));
    }

    /// First row of `id`, once laid out.
    pub fn section_top(&self, id: SectionId) -> Option<u32> {
        self.layout.get(region_of(id)).map(|rect| rect.top)
    }

    /// Scroll so `id` starts at the top of the viewport.
    pub fn scroll_to_section(&mut self, id: SectionId) {
        if let Some(top) = self.section_top(id) {
            self.scroll_to(top);
        }
    }

    /// Section containing the first visible row.
    pub fn current_section(&self) -> SectionId {
        SectionId::ALL
            .iter()
            .rev()
            .copied()
            .find(|&id| self.section_top(id).is_some_and(|top| top <= self.scroll))
            .unwrap_or(SectionId::Hero)
    }

    /// Scroll to the next section whose top is below the current position.
    pub fn next_section(&mut self) {
        let target = SectionId::ALL
            .iter()
            .copied()
            .find(|&id| self.section_top(id).is_some_and(|top| top > self.scroll));
        if let Some(id) = target {
            self.scroll_to_section(id);
        }
    }

    /// Scroll to the start of the current section, or the previous one if
    /// already there.
    pub fn prev_section(&mut self) {
        let target = SectionId::ALL
            .iter()
            .rev()
            .copied()
            .find(|&id| self.section_top(id).is_some_and(|top| top < self.scroll));
        if let Some(id) = target {
            self.scroll_to_section(id);
        }
    }

    // ===== Reveal =====

    /// Feed the current scroll position to the viewport and apply its
    /// reports. Returns `true` if any tracker changed.
    pub fn sync(&mut self, now: Duration) -> bool {
        let Some(width) = self.layout_width else {
            return false;
        };
        let bounds = ViewportBounds {
            scroll: self.scroll,
            width,
            height: self.viewport_height,
        };
        let events = self.viewport.borrow_mut().update(&self.layout, bounds);

        let mut changed = false;
        for event in &events {
            for section in &mut self.sections {
                if !section.tracker.handle(event) {
                    continue;
                }
                changed = true;
                if section.tracker.has_been_visible() && section.revealed_at.is_none() {
                    debug!(section = %section.id, ratio = event.ratio, "section revealed");
                    section.revealed_at = Some(now);
                }
            }
        }
        changed
    }

    /// Sections currently in view, in page order.
    pub fn intersecting(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections
            .iter()
            .filter(|s| s.tracker.is_intersecting())
            .map(|s| s.id)
    }

    /// Eased enter progress of the `item`-th element of `id` at `now`.
    ///
    /// `1.0` when animations are off; `0.0` until the section is seen.
    pub fn item_progress(&self, id: SectionId, item: usize, now: Duration) -> f64 {
        if !self.animations {
            return 1.0;
        }
        let Some(revealed_at) = self.section(id).revealed_at else {
            return 0.0;
        };
        let delay = stagger(id) * u32::try_from(item).unwrap_or(u32::MAX);
        Transition::new(delay, REVEAL_DURATION, Ease::OutCubic)
            .progress(now.saturating_sub(revealed_at))
    }

    /// Whether any section is still playing its enter animation.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.animations
            && self.sections.iter().any(|s| {
                s.revealed_at.is_some_and(|at| {
                    now < at + REVEAL_DURATION + stagger(s.id) * SETTLE_ITEMS
                })
            })
    }
}
