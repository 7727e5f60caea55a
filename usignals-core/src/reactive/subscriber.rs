//! Subscribers and notification channels.
//!
//! Every signal owns two channels, *touched* and *distinct*. A channel is an
//! ordered list of subscribers; it does not own the signals its handlers
//! notify.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::error::Result;

/// Unique identifier for a subscriber.
///
/// Returned by [`Channel::subscribe`] and used to unsubscribe by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback stored in a channel. Recompute handlers of dependents can fail,
/// plain observers never do.
pub(crate) type Handler = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// A registered callback together with its identity.
struct Subscriber {
    id: SubscriberId,
    handler: Handler,
}

/// An ordered list of callbacks fired by a signal.
pub struct Channel {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Channel {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer. Observers fire in registration order.
    pub fn subscribe<F>(&self, notify: F) -> SubscriberId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_fallible(move || {
            notify();
            Ok(())
        })
    }

    /// Register a handler whose failure aborts the emission it runs in.
    pub(crate) fn subscribe_fallible<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        self.subscribers.lock().push(Subscriber {
            id,
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered, so
    /// removing twice is harmless.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    /// Check whether a subscriber is registered.
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.lock().iter().any(|s| s.id == id)
    }

    /// Get the number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }

    /// Drop every subscriber.
    pub fn clear(&self) {
        self.subscribers.lock().clear();
    }

    /// Invoke every subscriber in registration order.
    ///
    /// Handlers run against a snapshot taken before the first call, with the
    /// lock released, so they may subscribe or unsubscribe freely. The first
    /// failing handler stops the emission and its error is returned.
    pub(crate) fn emit(&self) -> Result<()> {
        let snapshot: SmallVec<[Handler; 4]> = self
            .subscribers
            .lock()
            .iter()
            .map(|s| Arc::clone(&s.handler))
            .collect();

        for handler in snapshot {
            handler()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscriber_count", &self.len())
            .finish()
    }
}
