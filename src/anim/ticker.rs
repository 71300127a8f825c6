//! Single repeating scheduler tick shared by all time-driven widgets.
//!
//! Widgets do not arm their own timers. They implement [`Animated`], keep
//! their next deadline in their own state, and subscribe to one [`Ticker`]
//! that the event loop fires at a fixed interval while something is moving,
//! and at the earliest subscriber deadline otherwise. The ticker holds only weak
//! references, so dropping a widget is its teardown: the next tick prunes the
//! dead subscription and nothing ever runs against freed state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Longest the event loop blocks when nothing is scheduled.
pub const MAX_IDLE_WAIT: Duration = Duration::from_secs(1);

/// State that changes as time passes.
pub trait Animated {
    /// Catch the state up to `now`. Returns `true` if anything visible changed.
    fn advance(&mut self, now: Duration) -> bool;

    /// Earliest time at which `advance` would change something.
    fn next_deadline(&self) -> Option<Duration>;
}

/// Fixed-interval driver for [`Animated`] subscribers.
pub struct Ticker {
    interval: Duration,
    last_tick: Option<Duration>,
    subscribers: Vec<Weak<RefCell<dyn Animated>>>,
}

impl Ticker {
    /// Create a ticker firing every `interval` (clamped to at least 1ms).
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            last_tick: None,
            subscribers: Vec::new(),
        }
    }

    /// Time between ticks while busy.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register an animation. The ticker keeps it alive only as long as the
    /// caller's `Rc` does.
    pub fn subscribe<T: Animated + 'static>(&mut self, animation: &Rc<RefCell<T>>) {
        let shared: Rc<RefCell<dyn Animated>> = animation.clone();
        self.subscribers.push(Rc::downgrade(&shared));
    }

    /// Number of subscribers whose owner is still alive.
    #[cfg(test)]
    pub(crate) fn live_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Whether a tick is due at `now`.
    pub fn is_due(&self, now: Duration) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now >= last + self.interval,
        }
    }

    /// How long the event loop may block before the next tick is due.
    ///
    /// While `busy` (something outside the subscribers is animating) that is
    /// the fixed interval. Otherwise the wait stretches to the earliest
    /// subscriber deadline, never shorter than the interval and never longer
    /// than [`MAX_IDLE_WAIT`].
    pub fn poll_timeout(&self, now: Duration, busy: bool) -> Duration {
        let Some(last) = self.last_tick else {
            return Duration::ZERO;
        };
        let next_tick = last + self.interval;
        let wake = if busy {
            next_tick
        } else {
            let latest = (now + MAX_IDLE_WAIT).max(next_tick);
            self.next_deadline()
                .map_or(latest, |deadline| deadline.clamp(next_tick, latest))
        };
        wake.saturating_sub(now)
    }

    /// Fire one tick: advance every live subscriber in subscription order and
    /// drop the dead ones. Returns `true` if any subscriber changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.last_tick = Some(now);
        let mut changed = false;
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(animation) => {
                changed |= animation.borrow_mut().advance(now);
                true
            }
            None => false,
        });
        changed
    }

    /// Earliest deadline among live subscribers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.subscribers
            .iter()
            .filter_map(Weak::upgrade)
            .filter_map(|animation| animation.borrow().next_deadline())
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts every `advance` call through a shared counter.
    struct Spy {
        calls: Rc<Cell<usize>>,
        deadline: Option<Duration>,
    }

    impl Animated for Spy {
        fn advance(&mut self, _now: Duration) -> bool {
            self.calls.set(self.calls.get() + 1);
            true
        }

        fn next_deadline(&self) -> Option<Duration> {
            self.deadline
        }
    }

    fn spy(deadline: Option<Duration>) -> (Rc<RefCell<Spy>>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let spy = Rc::new(RefCell::new(Spy {
            calls: Rc::clone(&calls),
            deadline,
        }));
        (spy, calls)
    }

    #[test]
    fn first_tick_is_due_immediately() {
        let ticker = Ticker::new(Duration::from_millis(25));
        assert!(ticker.is_due(Duration::ZERO));
        assert_eq!(ticker.poll_timeout(Duration::ZERO, false), Duration::ZERO);
    }

    #[test]
    fn tick_is_due_after_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(25));
        ticker.tick(Duration::from_millis(100));
        assert!(!ticker.is_due(Duration::from_millis(110)));
        assert_eq!(
            ticker.poll_timeout(Duration::from_millis(110), true),
            Duration::from_millis(15)
        );
        assert!(ticker.is_due(Duration::from_millis(125)));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let ticker = Ticker::new(Duration::ZERO);
        assert_eq!(ticker.interval(), Duration::from_millis(1));
    }

    #[test]
    fn tick_advances_live_subscribers() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let (a, a_calls) = spy(None);
        let (b, b_calls) = spy(None);
        ticker.subscribe(&a);
        ticker.subscribe(&b);

        assert!(ticker.tick(Duration::from_millis(10)));
        assert!(ticker.tick(Duration::from_millis(20)));

        assert_eq!(a_calls.get(), 2);
        assert_eq!(b_calls.get(), 2);
        assert_eq!(ticker.live_count(), 2);
    }

    #[test]
    fn dropped_subscriber_never_fires_again() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let (animation, calls) = spy(None);
        ticker.subscribe(&animation);

        ticker.tick(Duration::from_millis(10));
        assert_eq!(calls.get(), 1);

        drop(animation);
        assert_eq!(ticker.live_count(), 0);
        assert!(!ticker.tick(Duration::from_millis(20)));
        assert!(!ticker.tick(Duration::from_millis(30)));
        assert_eq!(calls.get(), 1, "no advance after teardown");
    }

    #[test]
    fn idle_poll_waits_for_the_earliest_deadline() {
        let mut ticker = Ticker::new(Duration::from_millis(25));
        let (typing, _) = spy(Some(Duration::from_millis(600)));
        ticker.subscribe(&typing);
        ticker.tick(Duration::from_millis(100));

        assert_eq!(
            ticker.poll_timeout(Duration::from_millis(100), false),
            Duration::from_millis(500)
        );
        assert_eq!(
            ticker.poll_timeout(Duration::from_millis(100), true),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn idle_poll_never_undercuts_the_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(25));
        let (overdue, _) = spy(Some(Duration::from_millis(50)));
        ticker.subscribe(&overdue);
        ticker.tick(Duration::from_millis(100));

        assert_eq!(
            ticker.poll_timeout(Duration::from_millis(100), false),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn idle_poll_without_deadlines_is_capped() {
        let mut ticker = Ticker::new(Duration::from_millis(25));
        let (far, _) = spy(Some(Duration::from_secs(60)));
        ticker.subscribe(&far);
        ticker.tick(Duration::ZERO);
        assert_eq!(ticker.poll_timeout(Duration::ZERO, false), MAX_IDLE_WAIT);

        drop(far);
        assert_eq!(ticker.poll_timeout(Duration::ZERO, false), MAX_IDLE_WAIT);
    }

    #[test]
    fn next_deadline_is_minimum_of_live_subscribers() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let (early, _) = spy(Some(Duration::from_millis(300)));
        let (late, _) = spy(Some(Duration::from_millis(900)));
        let (idle, _) = spy(None);
        ticker.subscribe(&late);
        ticker.subscribe(&early);
        ticker.subscribe(&idle);

        assert_eq!(ticker.next_deadline(), Some(Duration::from_millis(300)));
        drop(early);
        assert_eq!(ticker.next_deadline(), Some(Duration::from_millis(900)));
    }
}
