//! In-memory recording subscriber for tests/dev.

use std::sync::Mutex;

use crate::notifier::{Subscriber, SubscriberError};

/// Subscriber that keeps a copy of every message it receives.
///
/// - No IO
/// - Messages are kept in delivery order
#[derive(Debug)]
pub struct RecordingSubscriber<M> {
    messages: Mutex<Vec<M>>,
}

impl<M: Clone> RecordingSubscriber<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn messages(&self) -> Vec<M> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.messages.lock() {
            Ok(messages) => messages.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M> Default for RecordingSubscriber<M> {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl<M> Subscriber<M> for RecordingSubscriber<M>
where
    M: Clone + Send,
{
    fn name(&self) -> &str {
        "recording"
    }

    fn notify(&self, message: &M) -> Result<(), SubscriberError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| SubscriberError::new("recording subscriber lock poisoned"))?;
        messages.push(message.clone());
        Ok(())
    }
}
