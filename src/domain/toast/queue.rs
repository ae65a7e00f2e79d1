//! Usage: Toast queue state, expiry timers and change notifications.

use super::types::{ToastId, ToastItem, ToastKind, DEFAULT_TOAST_DURATION};
use crate::shared::mutex_ext::MutexExt;
use crate::shared::subscribers::{Listener, SubscriptionId, Subscribers};
use crate::shared::time::now_unix_millis;
use crate::shared::timer::Scheduler;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOAST_EVENT_NAME: &str = "toast:queue";

struct Entry {
    item: ToastItem,
    // Token of the auto-dismiss armed for this entry; a timer only removes the entry if its token
    // still matches.
    expiry: Option<u64>,
}

#[derive(Default)]
struct QueueState {
    entries: Vec<Entry>,
    next_id: u64,
    next_expiry: u64,
}

impl QueueState {
    fn arm_expiry(&mut self) -> u64 {
        self.next_expiry += 1;
        self.next_expiry
    }

    fn items(&self) -> Vec<ToastItem> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    fn position(&self, id: ToastId) -> Option<usize> {
        self.entries.iter().position(|e| e.item.id == id)
    }
}

struct ToastShared {
    state: Mutex<QueueState>,
    subscribers: Subscribers<Vec<ToastItem>>,
    scheduler: Arc<dyn Scheduler>,
    default_duration: Duration,
}

/// Ordered queue of transient status toasts.
///
/// No upper bound on the number of live toasts: they are user-facing and low volume, so the queue
/// stays simple instead of applying backpressure.
#[derive(Clone)]
pub struct ToastQueue {
    shared: Arc<ToastShared>,
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("len", &self.len())
            .field("default_duration", &self.shared.default_duration)
            .finish()
    }
}

impl ToastQueue {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_default_duration(scheduler, DEFAULT_TOAST_DURATION)
    }

    pub fn with_default_duration(scheduler: Arc<dyn Scheduler>, default_duration: Duration) -> Self {
        Self {
            shared: Arc::new(ToastShared {
                state: Mutex::new(QueueState::default()),
                subscribers: Subscribers::default(),
                scheduler,
                default_duration,
            }),
        }
    }

    pub fn default_duration(&self) -> Duration {
        self.shared.default_duration
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        self.push_with_duration(kind, message, self.shared.default_duration)
    }

    /// Appends a toast and returns its id. A zero `duration` means no auto-dismiss; `duration` is
    /// ignored for loading toasts.
    pub fn push_with_duration(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> ToastId {
        let message = message.into();
        let (id, expiry, items) = {
            let mut state = self.shared.state.lock_or_recover();
            state.next_id += 1;
            let id = ToastId::new(state.next_id);
            let expiry = (kind.auto_dismisses() && !duration.is_zero()).then(|| state.arm_expiry());
            state.entries.push(Entry {
                item: ToastItem {
                    id,
                    kind,
                    message,
                    created_at_ms: now_unix_millis(),
                    auto_dismiss_after_ms: expiry.map(|_| duration_ms(duration)),
                },
                expiry,
            });
            (id, expiry, state.items())
        };

        if let Some(token) = expiry {
            self.schedule_expiry(id, token, duration);
        }

        tracing::debug!(toast_id = %id, kind = kind.as_str(), "toast 已加入队列");
        self.shared.subscribers.notify(&items);
        id
    }

    /// Removes the toast if it is still queued. Unknown or already removed ids are a no-op.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let items = {
            let mut state = self.shared.state.lock_or_recover();
            let Some(idx) = state.position(id) else {
                return false;
            };
            state.entries.remove(idx);
            state.items()
        };

        tracing::debug!(toast_id = %id, "toast 已关闭");
        self.shared.subscribers.notify(&items);
        true
    }

    /// Replaces kind and message in place, keeping the toast's position. Switching to an
    /// auto-dismissing kind re-arms expiry with the default duration; switching to loading
    /// disarms it.
    pub fn update(&self, id: ToastId, kind: ToastKind, message: impl Into<String>) -> bool {
        let duration = self.shared.default_duration;
        let (expiry, items) = {
            let mut state = self.shared.state.lock_or_recover();
            let Some(idx) = state.position(id) else {
                return false;
            };
            let expiry = (kind.auto_dismisses() && !duration.is_zero()).then(|| state.arm_expiry());
            let entry = &mut state.entries[idx];
            entry.item.kind = kind;
            entry.item.message = message.into();
            entry.item.auto_dismiss_after_ms = expiry.map(|_| duration_ms(duration));
            entry.expiry = expiry;
            (expiry, state.items())
        };

        if let Some(token) = expiry {
            self.schedule_expiry(id, token, duration);
        }

        self.shared.subscribers.notify(&items);
        true
    }

    pub fn items(&self) -> Vec<ToastItem> {
        self.shared.state.lock_or_recover().items()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.shared.state.lock_or_recover().position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock_or_recover().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self, listener: Listener<Vec<ToastItem>>) -> SubscriptionId {
        self.shared.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.unsubscribe(id)
    }

    fn schedule_expiry(&self, id: ToastId, token: u64, delay: Duration) {
        let weak = Arc::downgrade(&self.shared);
        self.shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    ToastQueue { shared }.expire(id, token);
                }
            }),
        );
    }

    fn expire(&self, id: ToastId, token: u64) {
        let items = {
            let mut state = self.shared.state.lock_or_recover();
            let Some(idx) = state.position(id) else {
                return;
            };
            if state.entries[idx].expiry != Some(token) {
                return;
            }
            state.entries.remove(idx);
            state.items()
        };

        tracing::debug!(toast_id = %id, "toast 已自动过期");
        self.shared.subscribers.notify(&items);
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
