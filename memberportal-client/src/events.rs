/// Portal event bus
///
/// Views broadcast [`PortalEvent`]s after modifying data so that list
/// views can refresh. Publishing never fails: an event with no live
/// subscriber is dropped.

use memberportal_shared::alerts::{EventType, PortalEvent};
use tokio::sync::broadcast;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_BUFFER: usize = 64;

/// Broadcast bus for [`PortalEvent`]s
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PortalEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    /// Publishes an event to every current subscriber
    pub fn broadcast(&self, event: PortalEvent) {
        tracing::debug!(kind = ?event.kind, "Broadcasting portal event");
        if self.sender.send(event).is_err() {
            tracing::trace!("No subscribers for portal event");
        }
    }

    /// Shorthand for an event with a message payload
    pub fn broadcast_message(&self, kind: EventType, message: impl Into<String>) {
        self.broadcast(PortalEvent::with_payload(kind, message));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.broadcast_message(EventType::MemberListModification, "Saved");

        let event = first.recv().await.unwrap();
        assert_eq!(event.kind, EventType::MemberListModification);
        assert_eq!(event.payload.as_deref(), Some("Saved"));
        assert_eq!(second.recv().await.unwrap(), event);
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let bus = EventBus::default();
        bus.broadcast(PortalEvent::new(EventType::UserListModified));
    }
}
