//! Domain events and synchronous notification fan-out.

pub mod event;
pub mod notifier;
pub mod recording;

pub use event::Event;
pub use notifier::{Notifier, Subscriber, SubscriberError};
pub use recording::RecordingSubscriber;
