//! Toast notifications as an injected publish/subscribe bus.
//!
//! Components receive a [`ToastBus`] explicitly instead of dispatching on a
//! global event target. A display layer subscribes once and keeps its own
//! [`ToastStack`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriberId(pub u64);

pub type ToastListener = Rc<dyn Fn(&Toast)>;

#[derive(Default)]
struct BusState {
    next_subscriber: u64,
    next_toast: u64,
    subscribers: IndexMap<SubscriberId, ToastListener>,
}

/// Single-threaded toast dispatcher shared by cloning.
#[derive(Clone, Default)]
pub struct ToastBus {
    state: Rc<RefCell<BusState>>,
}

impl fmt::Debug for ToastBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ToastBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriberId
    where
        F: Fn(&Toast) + 'static,
    {
        let mut state = self.state.borrow_mut();
        state.next_subscriber += 1;
        let id = SubscriberId(state.next_subscriber);
        state.subscribers.insert(id, Rc::new(listener));
        id
    }

    /// Removes a subscriber; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.state.borrow_mut().subscribers.shift_remove(&id);
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    /// Delivers a toast to every current subscriber in subscription order.
    ///
    /// Listeners may publish or (un)subscribe re-entrantly; those changes
    /// apply from the next publish on.
    pub fn publish(&self, message: impl Into<String>, kind: ToastKind) -> Toast {
        let (toast, listeners) = {
            let mut state = self.state.borrow_mut();
            state.next_toast += 1;
            let toast = Toast {
                id: state.next_toast,
                message: message.into(),
                kind,
            };
            let listeners: Vec<ToastListener> = state.subscribers.values().cloned().collect();
            (toast, listeners)
        };

        debug!(
            toast_id = toast.id,
            kind = ?toast.kind,
            subscribers = listeners.len(),
            "publish toast"
        );
        for listener in listeners {
            listener(&toast);
        }
        toast
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.publish(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.publish(message, ToastKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> Toast {
        self.publish(message, ToastKind::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveToast {
    toast: Toast,
    shown_at: Duration,
}

/// On-screen toasts, oldest first, each expiring after its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastStack {
    lifetime: Duration,
    active: Vec<ActiveToast>,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStack {
    #[must_use]
    pub fn new() -> Self {
        Self::with_lifetime(TOAST_LIFETIME)
    }

    #[must_use]
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            lifetime,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, toast: Toast, now: Duration) {
        self.active.push(ActiveToast {
            toast,
            shown_at: now,
        });
    }

    /// Drops every toast shown at least one lifetime ago; returns how many.
    pub fn expire(&mut self, now: Duration) -> usize {
        let before = self.active.len();
        let lifetime = self.lifetime;
        self.active
            .retain(|entry| now.saturating_sub(entry.shown_at) < lifetime);
        let expired = before - self.active.len();
        if expired > 0 {
            trace!(expired, remaining = self.active.len(), "expire toasts");
        }
        expired
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|entry| entry.toast.id != id);
        before != self.active.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|entry| &entry.toast)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
