//! Per-channel callback table mapping event names to ordered callbacks.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

/// A callback bound to an event name.
///
/// Cloning shares the underlying closure; two handles are the same callback
/// when they were cloned from one another. Unbinding compares by that
/// identity, never by behaviour.
#[derive(Clone)]
pub struct EventCallback(Arc<dyn Fn(&Value) + Send + Sync>);

impl EventCallback {
    /// Wraps a closure.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invokes the callback with an event payload.
    pub fn call(&self, data: &Value) {
        (self.0)(data)
    }

    /// Whether both handles refer to the same closure.
    pub fn same_as(&self, other: &EventCallback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventCallback")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Event name → callbacks in bind order.
///
/// An event name is present only while it has at least one callback.
#[derive(Debug, Default)]
pub struct CallbackTable {
    /// Event name → callbacks.
    entries: DashMap<String, Vec<EventCallback>>,
}

impl CallbackTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Whether an entry exists for the event name.
    pub fn contains(&self, event: &str) -> bool {
        self.entries.contains_key(event)
    }

    /// Appends a callback, creating the entry if needed.
    ///
    /// Returns `true` when this call created the entry. The check and the
    /// insert happen under one shard lock.
    pub fn push(&self, event: &str, callback: EventCallback) -> bool {
        match self.entries.entry(event.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().push(callback);
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(vec![callback]);
                true
            }
        }
    }

    /// Removes every occurrence of `callback` from the event's list.
    ///
    /// Returns `None` when no entry existed, otherwise the number of
    /// callbacks left. An entry left empty is deleted under the same shard
    /// lock, so a concurrent [`push`](Self::push) either lands before the
    /// removal or creates a fresh entry.
    pub fn remove(&self, event: &str, callback: &EventCallback) -> Option<usize> {
        let mut remaining = None;
        self.entries.remove_if_mut(event, |_, callbacks| {
            callbacks.retain(|existing| !existing.same_as(callback));
            remaining = Some(callbacks.len());
            callbacks.is_empty()
        });
        remaining
    }

    /// Snapshot of the callbacks bound to an event, in bind order.
    pub fn callbacks(&self, event: &str) -> Vec<EventCallback> {
        self.entries
            .get(event)
            .map(|callbacks| callbacks.value().clone())
            .unwrap_or_default()
    }

    /// Number of callbacks bound to an event.
    pub fn callback_count(&self, event: &str) -> usize {
        self.entries
            .get(event)
            .map(|callbacks| callbacks.len())
            .unwrap_or(0)
    }

    /// Event names with at least one callback.
    pub fn event_names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of event names with callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callbacks are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
