use chrono::{DateTime, Utc};

/// A fact published after a state change has been committed.
///
/// Subscribers receive events by shared reference; an event is never edited after
/// it is built.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted `<context>.<entity>.<change>` name, e.g. `orders.order.item_added`.
    fn event_type(&self) -> &'static str;

    /// Payload layout revision. Bump when a field changes meaning.
    fn version(&self) -> u32 {
        1
    }

    /// When the change happened.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Leading segment of [`Event::event_type`].
    fn context(&self) -> &'static str {
        let name = self.event_type();
        name.split('.').next().unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Restocked(DateTime<Utc>);

    impl Event for Restocked {
        fn event_type(&self) -> &'static str {
            "catalog.product.restocked"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn defaults_derive_from_event_type() {
        let event = Restocked(Utc::now());
        assert_eq!(event.version(), 1);
        assert_eq!(event.context(), "catalog");
    }
}
