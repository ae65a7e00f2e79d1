//! Usage: Synchronous subscriber lists for state containers (presentation layer read-only hooks).

use crate::shared::mutex_ext::MutexExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) struct Subscribers<T> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Subscribers<T> {
    pub(crate) fn subscribe(&self, listener: Listener<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock_or_recover().push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock_or_recover();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub(crate) fn clear(&self) {
        self.listeners.lock_or_recover().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.lock_or_recover().len()
    }

    /// Calls every listener in subscription order. The list is snapshotted first so listeners may
    /// subscribe/unsubscribe (or read the owning container) without deadlocking.
    pub(crate) fn notify(&self, payload: &T) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock_or_recover()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_reaches_listeners_in_subscription_order() {
        let subscribers = Subscribers::<u32>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            subscribers.subscribe(Arc::new(move |v: &u32| {
                seen.lock_or_recover().push(format!("{tag}:{v}"));
            }));
        }

        subscribers.notify(&7);
        assert_eq!(
            *seen.lock_or_recover(),
            vec!["first:7".to_string(), "second:7".to_string()]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let subscribers = Subscribers::<u32>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_for_listener = seen.clone();
        let id = subscribers.subscribe(Arc::new(move |v: &u32| {
            seen_for_listener.lock_or_recover().push(*v);
        }));

        subscribers.notify(&1);
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&2);

        assert_eq!(*seen.lock_or_recover(), vec![1]);
        assert_eq!(subscribers.len(), 0);
    }
}
