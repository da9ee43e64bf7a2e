use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Opaque handle of an observed renderable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Visibility sample delivered to a listener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: TargetId,
    /// Fraction of the target area inside the viewport, in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionEntry {
    #[must_use]
    pub fn meets(self, threshold: f64) -> bool {
        self.ratio > 0.0 && self.ratio >= threshold
    }
}

pub type IntersectionListener = Rc<dyn Fn(IntersectionEntry)>;

/// Platform capability that reports how much of a target is on screen.
///
/// Contract for implementations:
/// - after `subscribe`, deliver one entry for the target's current state
///   asynchronously, without waiting for a scroll;
/// - afterwards deliver entries whenever the target's ratio changes;
/// - never hold internal borrows while invoking a listener, since listeners
///   unsubscribe re-entrantly, and never invoke listeners from inside
///   `subscribe` or `unsubscribe`.
pub trait VisibilityWatcher {
    fn subscribe(
        &self,
        target: TargetId,
        threshold: f64,
        listener: IntersectionListener,
    ) -> ChartResult<SubscriptionId>;

    fn unsubscribe(&self, subscription: SubscriptionId);
}

struct Subscription {
    target: TargetId,
    threshold: f64,
    listener: IntersectionListener,
}

#[derive(Default)]
struct ScriptedState {
    next_id: u64,
    ratios: IndexMap<TargetId, f64>,
    subscriptions: IndexMap<SubscriptionId, Subscription>,
    queue: VecDeque<SubscriptionId>,
}

/// In-memory watcher driven explicitly by the host.
///
/// Ratios are set with [`ScriptedViewport::set_ratio`]; entries are queued and
/// only delivered by [`ScriptedViewport::flush`], which plays the role of the
/// event loop turn in which a platform observer would report.
pub struct ScriptedViewport {
    available: bool,
    state: RefCell<ScriptedState>,
}

impl Default for ScriptedViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScriptedViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScriptedViewport")
            .field("available", &self.available)
            .field("targets", &state.ratios.len())
            .field("subscriptions", &state.subscriptions.len())
            .field("queued", &state.queue.len())
            .finish()
    }
}

impl ScriptedViewport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: true,
            state: RefCell::new(ScriptedState::default()),
        }
    }

    /// Watcher for environments without an intersection primitive.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            state: RefCell::new(ScriptedState::default()),
        }
    }

    /// Records the on-screen ratio of `target` and queues an entry for every
    /// subscription observing it. Ratios are clamped into `[0, 1]`.
    pub fn set_ratio(&self, target: TargetId, ratio: f64) {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut state = self.state.borrow_mut();
        state.ratios.insert(target, ratio);
        let matching: Vec<SubscriptionId> = state
            .subscriptions
            .iter()
            .filter(|(_, subscription)| subscription.target == target)
            .map(|(id, _)| *id)
            .collect();
        state.queue.extend(matching);
    }

    #[must_use]
    pub fn ratio(&self, target: TargetId) -> f64 {
        self.state
            .borrow()
            .ratios
            .get(&target)
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.state.borrow().queue.len()
    }

    #[must_use]
    pub fn threshold_of(&self, subscription: SubscriptionId) -> Option<f64> {
        self.state
            .borrow()
            .subscriptions
            .get(&subscription)
            .map(|subscription| subscription.threshold)
    }

    /// Delivers queued entries in order and returns how many were delivered.
    ///
    /// Entries queued for subscriptions removed in the meantime are skipped.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let Some(id) = state.queue.pop_front() else {
                    break;
                };
                state.subscriptions.get(&id).map(|subscription| {
                    let ratio = state
                        .ratios
                        .get(&subscription.target)
                        .copied()
                        .unwrap_or(0.0);
                    (
                        Rc::clone(&subscription.listener),
                        IntersectionEntry {
                            target: subscription.target,
                            ratio,
                        },
                    )
                })
            };

            if let Some((listener, entry)) = next {
                trace!(target_id = entry.target.0, ratio = entry.ratio, "deliver intersection entry");
                listener(entry);
                delivered += 1;
            }
        }
        delivered
    }
}

impl VisibilityWatcher for ScriptedViewport {
    fn subscribe(
        &self,
        target: TargetId,
        threshold: f64,
        listener: IntersectionListener,
    ) -> ChartResult<SubscriptionId> {
        if !self.available {
            return Err(ChartError::WatcherUnavailable(
                "scripted viewport was created without intersection support".to_owned(),
            ));
        }

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.subscriptions.insert(
            id,
            Subscription {
                target,
                threshold,
                listener,
            },
        );
        state.queue.push_back(id);
        Ok(id)
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.state
            .borrow_mut()
            .subscriptions
            .shift_remove(&subscription);
    }
}
