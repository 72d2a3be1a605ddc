//! Synchronous, ordered notification fan-out.
//!
//! A [`Notifier`] holds an ordered list of [`Subscriber`]s and hands every published
//! message to each of them, in attachment order, on the caller's stack. There is no
//! queue, no thread and no retry: when `notify` returns, every subscriber has seen the
//! message.
//!
//! ## Identity
//!
//! Subscribers are identified by their `Arc` allocation. Attaching the same `Arc` twice
//! is a no-op, so a subscriber sees each message at most once. Two distinct allocations
//! of an equal value are two subscribers.
//!
//! ## Failure isolation
//!
//! A subscriber returning an error does not stop the fan-out. The failure is logged and
//! the remaining subscribers still run. Publishers never see subscriber errors; by the
//! time they notify, their own state change has already been committed.

use std::sync::Arc;

use thiserror::Error;

/// Error reported by a subscriber that could not handle a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SubscriberError(String);

impl SubscriberError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Receives messages published through a [`Notifier`].
///
/// Subscribers get a shared reference: they observe the message and cannot change
/// what other subscribers see.
pub trait Subscriber<M>: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    fn notify(&self, message: &M) -> Result<(), SubscriberError>;
}

/// Ordered set of subscribers, each attached at most once.
pub struct Notifier<M> {
    subscribers: Vec<Arc<dyn Subscriber<M>>>,
}

impl<M> Notifier<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a subscriber at the end of the delivery order.
    ///
    /// Returns `false` (and changes nothing) when this exact subscriber is already
    /// attached.
    pub fn attach(&mut self, subscriber: Arc<dyn Subscriber<M>>) -> bool {
        if self.contains(&subscriber) {
            return false;
        }
        tracing::debug!(subscriber = subscriber.name(), "subscriber attached");
        self.subscribers.push(subscriber);
        true
    }

    /// Detach a subscriber. Detaching one that is not attached is a no-op.
    ///
    /// Returns whether anything was removed.
    pub fn detach<S>(&mut self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber<M> + ?Sized,
    {
        let target = allocation(subscriber);
        let before = self.subscribers.len();
        self.subscribers.retain(|s| allocation(s) != target);
        let removed = self.subscribers.len() != before;
        if removed {
            tracing::debug!(subscriber = subscriber.name(), "subscriber detached");
        }
        removed
    }

    pub fn contains<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber<M> + ?Sized,
    {
        let target = allocation(subscriber);
        self.subscribers.iter().any(|s| allocation(s) == target)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver `message` to every subscriber in attachment order.
    ///
    /// Returns the number of subscribers that handled the message successfully.
    pub fn notify(&self, message: &M) -> usize {
        let mut delivered = 0;
        for subscriber in &self.subscribers {
            match subscriber.notify(message) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    tracing::warn!(
                        subscriber = subscriber.name(),
                        error = %err,
                        "subscriber failed; continuing fan-out"
                    );
                }
            }
        }
        delivered
    }
}

impl<M> Default for Notifier<M> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<M> core::fmt::Debug for Notifier<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.subscribers.iter().map(|s| s.name()))
            .finish()
    }
}

// Thin data pointer of the allocation; vtable pointers are not stable for comparison.
fn allocation<T: ?Sized>(arc: &Arc<T>) -> *const () {
    Arc::as_ptr(arc).cast::<()>()
}
