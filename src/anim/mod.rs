//! Time and visibility primitives (pure).
//!
//! Everything here is driven by an explicit `now: Duration` and explicit
//! intersection reports, so it is testable without a terminal.

pub mod clock;
pub mod ease;
pub mod intersection;
pub mod reveal;
pub mod ticker;
pub mod typewriter;

// Re-export for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use ease::{Ease, Transition};
pub use intersection::{
    IntersectionEvent, IntersectionSource, MarginParseError, RegionId, RegionLayout, RootMargin,
    SharedSource, Threshold, Viewport, ViewportBounds,
};
pub use reveal::{RevealSignal, RevealTracker, TrackerOptions};
pub use ticker::{Animated, Ticker};
pub use typewriter::{Typewriter, TypewriterError, TypewriterTiming};
