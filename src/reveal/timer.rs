use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

pub type TimerTask = Box<dyn FnOnce()>;

/// Cancellable one-shot timer capability.
///
/// `schedule` must never run `task` before returning, even for a zero delay,
/// and `cancel` on an already fired or unknown timer is a no-op.
pub trait RevealTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId;
    fn cancel(&self, timer: TimerId);
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), TimerTask>,
}

/// Deterministic timer advanced explicitly by the host.
#[derive(Default)]
pub struct ManualClock {
    state: RefCell<ClockState>,
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualClock")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Moves time forward by `by` and runs every task that became due, in
    /// deadline order then scheduling order. Tasks scheduled while advancing
    /// run too when their deadline falls inside the window.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let until = self.state.borrow().now.saturating_add(by);
        let mut ran = 0;
        loop {
            let (id, task) = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .pending
                    .first_key_value()
                    .is_some_and(|((deadline, _), _)| *deadline <= until);
                if !due {
                    break;
                }
                let Some(((deadline, id), task)) = state.pending.pop_first() else {
                    break;
                };
                state.now = deadline;
                (id, task)
            };

            trace!(timer_id = id.0, "run timer task");
            task();
            ran += 1;
        }
        self.state.borrow_mut().now = until;
        ran
    }
}

impl RevealTimer for ManualClock {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let deadline = state.now.saturating_add(delay);
        state.pending.insert((deadline, id), task);
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.state
            .borrow_mut()
            .pending
            .retain(|(_, id), _| *id != timer);
    }
}
