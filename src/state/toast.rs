//! Transient notifications.
//!
//! A toast is a scoped request: "show message M for duration D, then remove
//! it". The queue is owned by [`crate::state::AppState`] and expired by the
//! event loop; nothing here touches the terminal.
//!
//! Timeline of one toast, relative to when it was pushed:
//!
//! ```text
//! 0      100ms        400ms               D         D+300ms
//! |hidden |  sliding in |      shown       | sliding out |  removed
//! ```

use crate::anim::ease::Ease;
use std::collections::VecDeque;
use std::time::Duration;

/// Delay before the slide-in starts.
pub const ENTER_DELAY: Duration = Duration::from_millis(100);

/// Length of the slide-in and slide-out.
pub const SLIDE: Duration = Duration::from_millis(300);

/// Default time from push until the slide-out starts.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Maximum toasts kept at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 3;

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation, e.g. a copied address.
    Info,
    /// Something failed.
    Error,
}

/// Where a toast is in its timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    /// Pushed but not yet on screen.
    Pending,
    /// Sliding in; fraction visible in `0.0..1.0`.
    Entering(f64),
    /// Fully on screen.
    Shown,
    /// Sliding out; fraction still visible in `0.0..1.0`.
    Leaving(f64),
}

impl ToastPhase {
    /// Fraction of the toast's width on screen.
    pub fn visible_fraction(self) -> f64 {
        match self {
            ToastPhase::Pending => 0.0,
            ToastPhase::Entering(f) | ToastPhase::Leaving(f) => f,
            ToastPhase::Shown => 1.0,
        }
    }

    /// Whether the toast is sliding.
    pub fn is_moving(self) -> bool {
        matches!(self, ToastPhase::Entering(_) | ToastPhase::Leaving(_))
    }
}

/// One notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
    created_at: Duration,
    duration: Duration,
}

impl Toast {
    /// Id returned by [`ToastQueue::push`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Text shown.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Styling kind.
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Time at which the toast is gone for good.
    pub fn expires_at(&self) -> Duration {
        self.created_at + self.duration + SLIDE
    }

    /// Phase at `now`, or `None` once expired.
    pub fn phase(&self, now: Duration) -> Option<ToastPhase> {
        let age = now.saturating_sub(self.created_at);
        if now >= self.expires_at() {
            return None;
        }
        if age >= self.duration {
            let gone = (age - self.duration).as_secs_f64() / SLIDE.as_secs_f64();
            return Some(ToastPhase::Leaving(1.0 - slide_fraction(gone)));
        }
        if age < ENTER_DELAY {
            return Some(ToastPhase::Pending);
        }
        let entered = (age - ENTER_DELAY).as_secs_f64() / SLIDE.as_secs_f64();
        if entered >= 1.0 {
            Some(ToastPhase::Shown)
        } else {
            Some(ToastPhase::Entering(slide_fraction(entered)))
        }
    }
}

/// Ordered queue of live toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
    next_id: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    /// Queue whose toasts stay up for `duration` before sliding out.
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            next_id: 0,
        }
    }

    /// How long new toasts stay up.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `message` starting at `now`. Returns the toast id.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            message: message.into(),
            kind,
            created_at: now,
            duration: self.duration,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        id
    }

    /// Push an info toast.
    pub fn info(&mut self, message: impl Into<String>, now: Duration) -> u64 {
        self.push(message, ToastKind::Info, now)
    }

    /// Push an error toast.
    pub fn error(&mut self, message: impl Into<String>, now: Duration) -> u64 {
        self.push(message, ToastKind::Error, now)
    }

    /// Drop expired toasts. Returns `true` if any were removed.
    pub fn update(&mut self, now: Duration) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| now < t.expires_at());
        self.toasts.len() != before
    }

    /// Live toasts with their phase at `now`, oldest first.
    pub fn visible(&self, now: Duration) -> impl Iterator<Item = (&Toast, ToastPhase)> + '_ {
        self.toasts
            .iter()
            .filter_map(move |t| t.phase(now).map(|phase| (t, phase)))
    }

    /// Whether any toast will look different on the next frame.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.visible(now)
            .any(|(_, phase)| phase.is_moving() || phase == ToastPhase::Pending)
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Number of queued toasts, expired or not.
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Queued toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}

fn slide_fraction(t: f64) -> f64 {
    Ease::OutCubic.apply(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn toast_walks_through_its_timeline() {
        let mut queue = ToastQueue::default();
        queue.info("Copied!", ms(1000));
        let phase = |t| queue.iter().next().and_then(|toast| toast.phase(ms(t)));

        assert_eq!(phase(1000), Some(ToastPhase::Pending));
        assert!(matches!(phase(1250), Some(ToastPhase::Entering(f)) if f > 0.0 && f < 1.0));
        assert_eq!(phase(1400), Some(ToastPhase::Shown));
        assert_eq!(phase(3999), Some(ToastPhase::Shown));
        assert!(matches!(phase(4000), Some(ToastPhase::Leaving(f)) if f == 1.0));
        assert!(matches!(phase(4200), Some(ToastPhase::Leaving(f)) if f < 1.0));
        assert_eq!(phase(4300), None);
    }

    #[test]
    fn update_removes_toasts_after_slide_out() {
        let mut queue = ToastQueue::default();
        queue.info("a", ms(0));
        assert!(!queue.update(ms(3299)));
        assert_eq!(queue.len(), 1);
        assert!(queue.update(ms(3300)));
        assert!(queue.is_empty());
    }

    #[test]
    fn custom_duration_moves_the_slide_out() {
        let mut queue = ToastQueue::new(ms(500));
        queue.error("nope", ms(0));
        let toast = queue.iter().next().unwrap();
        assert_eq!(toast.kind(), ToastKind::Error);
        assert!(matches!(toast.phase(ms(500)), Some(ToastPhase::Leaving(_))));
        assert_eq!(toast.expires_at(), ms(800));
    }

    #[test]
    fn queue_keeps_only_the_newest_toasts() {
        let mut queue = ToastQueue::default();
        for i in 0..5 {
            queue.info(format!("toast {i}"), ms(i * 10));
        }
        let messages: Vec<&str> = queue.iter().map(Toast::message).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut queue = ToastQueue::default();
        let a = queue.info("a", ms(0));
        let b = queue.info("b", ms(0));
        assert!(b > a);
    }

    #[test]
    fn animating_only_while_pending_or_sliding() {
        let mut queue = ToastQueue::default();
        assert!(!queue.is_animating(ms(0)));
        queue.info("a", ms(0));
        assert!(queue.is_animating(ms(50)));
        assert!(queue.is_animating(ms(200)));
        assert!(!queue.is_animating(ms(1000)));
        assert!(queue.is_animating(ms(3100)));
    }

    #[test]
    fn visible_fraction_is_monotonic_while_entering() {
        let mut queue = ToastQueue::default();
        queue.info("a", ms(0));
        let toast = queue.iter().next().unwrap();
        let mut last = 0.0;
        for t in (0..=400).step_by(20) {
            let f = toast.phase(ms(t)).unwrap().visible_fraction();
            assert!(f >= last, "fraction shrank at {t}ms");
            last = f;
        }
        assert_eq!(last, 1.0);
    }
}
