//! One-shot "reveal on scroll" state.
//!
//! A [`RevealHandle`] observes one target through a [`VisibilityWatcher`] and
//! flips to visible exactly once, `delay` after the target first reaches its
//! visibility threshold. Observation stops at the first trigger. Dropping or
//! disposing the handle before that tears down the subscription and any
//! pending timer.

pub mod count_up;
pub mod timer;
pub mod watcher;

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

pub use count_up::{CountUp, DEFAULT_COUNT_UP_DURATION, ease_out_cubic};
pub use timer::{ManualClock, RevealTimer, TimerId, TimerTask};
pub use watcher::{
    IntersectionEntry, IntersectionListener, ScriptedViewport, SubscriptionId, TargetId,
    VisibilityWatcher,
};

/// Threshold for generic revealable blocks.
pub const REVEAL_THRESHOLD: f64 = 0.12;
/// Threshold for animated counters.
pub const COUNTER_THRESHOLD: f64 = 0.2;
/// Threshold for progress bars.
pub const PROGRESS_BAR_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealOptions {
    /// Fraction of the target area that must be on screen, in `(0, 1]`.
    pub threshold: f64,
    pub delay: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            delay: Duration::ZERO,
        }
    }
}

impl RevealOptions {
    #[must_use]
    pub fn counter() -> Self {
        Self::default().with_threshold(COUNTER_THRESHOLD)
    }

    #[must_use]
    pub fn progress_bar() -> Self {
        Self::default().with_threshold(PROGRESS_BAR_THRESHOLD)
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_delay_ms(self, delay_ms: u64) -> Self {
        self.with_delay(Duration::from_millis(delay_ms))
    }

    /// Returns options with the threshold forced into `(0, 1]`.
    ///
    /// Non-finite or non-positive thresholds fall back to
    /// [`REVEAL_THRESHOLD`]; thresholds above 1 become 1.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let threshold = if !self.threshold.is_finite() || self.threshold <= 0.0 {
            REVEAL_THRESHOLD
        } else {
            self.threshold.min(1.0)
        };
        if threshold != self.threshold {
            warn!(
                requested = self.threshold,
                applied = threshold,
                "reveal threshold outside (0, 1], sanitized"
            );
        }
        Self { threshold, ..self }
    }
}

/// Public lifecycle phase of a reveal handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Waiting for the target to reach its threshold.
    Observing,
    /// Threshold reached; waiting for the delay timer.
    Pending,
    Visible,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// `subscribe` has not returned yet.
    Subscribing,
    Observing(SubscriptionId),
    Pending(TimerId),
    Visible,
    Disposed,
}

pub type RevealCallback = Box<dyn FnOnce()>;

struct RevealState {
    target: TargetId,
    options: RevealOptions,
    lifecycle: Lifecycle,
    visible: bool,
    callbacks: Vec<RevealCallback>,
    watcher: Option<Rc<dyn VisibilityWatcher>>,
    timer: Rc<dyn RevealTimer>,
}

/// Creates reveal handles sharing one watcher and one timer capability.
///
/// Handles never share timers or subscriptions with each other: each one
/// owns a single subscription and at most one pending timer.
#[derive(Clone)]
pub struct RevealController {
    watcher: Option<Rc<dyn VisibilityWatcher>>,
    timer: Rc<dyn RevealTimer>,
}

impl fmt::Debug for RevealController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealController")
            .field("has_watcher", &self.watcher.is_some())
            .finish()
    }
}

impl RevealController {
    #[must_use]
    pub fn new<W, T>(watcher: Rc<W>, timer: Rc<T>) -> Self
    where
        W: VisibilityWatcher + 'static,
        T: RevealTimer + 'static,
    {
        let watcher: Rc<dyn VisibilityWatcher> = watcher;
        Self {
            watcher: Some(watcher),
            timer,
        }
    }

    /// Controller for environments without a visibility primitive.
    ///
    /// Every handle it creates is visible immediately.
    #[must_use]
    pub fn without_watcher<T>(timer: Rc<T>) -> Self
    where
        T: RevealTimer + 'static,
    {
        Self {
            watcher: None,
            timer,
        }
    }

    /// Starts observing `target` and returns the handle owning that observation.
    ///
    /// Never fails: when the watcher is missing or refuses the subscription
    /// the handle fails open and is visible right away.
    #[must_use]
    pub fn observe_reveal(&self, target: TargetId, options: RevealOptions) -> RevealHandle {
        let options = options.sanitized();
        let state = Rc::new(RefCell::new(RevealState {
            target,
            options,
            lifecycle: Lifecycle::Subscribing,
            visible: false,
            callbacks: Vec::new(),
            watcher: self.watcher.clone(),
            timer: Rc::clone(&self.timer),
        }));

        let Some(watcher) = self.watcher.clone() else {
            warn!(target_id = target.0, "no visibility watcher, revealing immediately");
            fail_open(&state);
            return RevealHandle { state };
        };

        let weak = Rc::downgrade(&state);
        let listener: IntersectionListener = Rc::new(move |entry: IntersectionEntry| {
            if let Some(state) = weak.upgrade() {
                on_intersection(&state, entry);
            }
        });

        match watcher.subscribe(target, options.threshold, listener) {
            Ok(subscription) => {
                let mut guard = state.borrow_mut();
                if guard.lifecycle == Lifecycle::Subscribing {
                    guard.lifecycle = Lifecycle::Observing(subscription);
                    debug!(
                        target_id = target.0,
                        threshold = options.threshold,
                        delay = ?options.delay,
                        "observing reveal target"
                    );
                } else {
                    // Triggered or disposed before `subscribe` returned.
                    watcher.unsubscribe(subscription);
                }
            }
            Err(err) => {
                warn!(
                    target_id = target.0,
                    error = %err,
                    "visibility watcher refused subscription, revealing immediately"
                );
                fail_open(&state);
            }
        }

        RevealHandle { state }
    }
}

fn fail_open(state: &Rc<RefCell<RevealState>>) {
    let mut guard = state.borrow_mut();
    guard.lifecycle = Lifecycle::Visible;
    guard.visible = true;
}

fn on_intersection(state: &Rc<RefCell<RevealState>>, entry: IntersectionEntry) {
    let mut guard = state.borrow_mut();
    let subscription = match guard.lifecycle {
        Lifecycle::Observing(subscription) => Some(subscription),
        Lifecycle::Subscribing => None,
        Lifecycle::Pending(_) | Lifecycle::Visible | Lifecycle::Disposed => return,
    };
    if !entry.meets(guard.options.threshold) {
        trace!(target_id = entry.target.0, ratio = entry.ratio, "reveal target below threshold");
        return;
    }

    if let (Some(subscription), Some(watcher)) = (subscription, guard.watcher.as_ref()) {
        watcher.unsubscribe(subscription);
    }

    let weak: Weak<RefCell<RevealState>> = Rc::downgrade(state);
    let timer_id = guard.timer.schedule(
        guard.options.delay,
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                reveal(&state);
            }
        }),
    );
    guard.lifecycle = Lifecycle::Pending(timer_id);
    debug!(
        target_id = guard.target.0,
        ratio = entry.ratio,
        "reveal threshold reached"
    );
}

fn reveal(state: &Rc<RefCell<RevealState>>) {
    let callbacks = {
        let mut guard = state.borrow_mut();
        if !matches!(guard.lifecycle, Lifecycle::Pending(_)) {
            return;
        }
        guard.lifecycle = Lifecycle::Visible;
        guard.visible = true;
        debug!(target_id = guard.target.0, "reveal target visible");
        mem::take(&mut guard.callbacks)
    };

    for callback in callbacks {
        callback();
    }
}

/// Owner of one reveal observation. Dropping it disposes the observation.
pub struct RevealHandle {
    state: Rc<RefCell<RevealState>>,
}

impl fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RevealHandle")
            .field("target", &state.target)
            .field("options", &state.options)
            .field("lifecycle", &state.lifecycle)
            .field("callbacks", &state.callbacks.len())
            .finish()
    }
}

impl RevealHandle {
    #[must_use]
    pub fn target(&self) -> TargetId {
        self.state.borrow().target
    }

    #[must_use]
    pub fn options(&self) -> RevealOptions {
        self.state.borrow().options
    }

    /// Monotonic: once `true` it stays `true`, disposal included.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        match self.state.borrow().lifecycle {
            Lifecycle::Subscribing | Lifecycle::Observing(_) => RevealPhase::Observing,
            Lifecycle::Pending(_) => RevealPhase::Pending,
            Lifecycle::Visible => RevealPhase::Visible,
            Lifecycle::Disposed => RevealPhase::Disposed,
        }
    }

    /// Registers `callback` to run once when the target becomes visible.
    ///
    /// Runs it immediately when the handle is already visible; drops it when
    /// the handle has been disposed.
    pub fn on_become_visible<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        {
            let mut guard = self.state.borrow_mut();
            match guard.lifecycle {
                Lifecycle::Disposed => return,
                Lifecycle::Visible => {}
                _ => {
                    guard.callbacks.push(Box::new(callback));
                    return;
                }
            }
        }

        callback();
    }

    /// Stops observing and cancels any pending timer. Idempotent.
    pub fn dispose(&self) {
        let dropped_callbacks = {
            let mut guard = self.state.borrow_mut();
            let previous = mem::replace(&mut guard.lifecycle, Lifecycle::Disposed);
            match previous {
                Lifecycle::Disposed => return,
                Lifecycle::Observing(subscription) => {
                    if let Some(watcher) = guard.watcher.as_ref() {
                        watcher.unsubscribe(subscription);
                    }
                }
                Lifecycle::Pending(timer_id) => guard.timer.cancel(timer_id),
                Lifecycle::Subscribing | Lifecycle::Visible => {}
            }
            debug!(target_id = guard.target.0, "reveal handle disposed");
            mem::take(&mut guard.callbacks)
        };
        drop(dropped_callbacks);
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
