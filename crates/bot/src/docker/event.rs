//! Event domain — engine event streaming, converted to runtime events at the
//! edge so the rest of the bot never sees bollard's wire types.

use std::collections::HashMap;

use bollard::models::{EventMessage, EventMessageTypeEnum};
use futures_util::stream::StreamExt;

use super::client::{DockerClient, DockerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Container,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Start,
    Die,
    Other,
}

/// One lifecycle event as consumed by the event bridge. Produced by the
/// runtime, forwarded at most once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEvent {
    pub kind: EventKind,
    pub action: EventAction,
    pub name: String,
    pub time: i64, // Unix timestamp
}

impl RuntimeEvent {
    /// Human-readable event time for the notification line.
    pub fn time_display(&self) -> String {
        chrono::DateTime::from_timestamp(self.time, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl From<EventMessage> for RuntimeEvent {
    fn from(msg: EventMessage) -> Self {
        let kind = match msg.typ {
            Some(EventMessageTypeEnum::CONTAINER) => EventKind::Container,
            _ => EventKind::Other,
        };
        let action = match msg.action.as_deref() {
            Some("start") => EventAction::Start,
            Some("die") => EventAction::Die,
            _ => EventAction::Other,
        };
        let name = msg
            .actor
            .and_then(|actor| {
                actor
                    .attributes
                    .and_then(|mut attrs| attrs.remove("name"))
                    .or(actor.id)
            })
            .unwrap_or_else(|| "unknown".to_string());
        let time = msg
            .time
            .unwrap_or_else(|| chrono::Utc::now().timestamp());

        Self {
            kind,
            action,
            name,
            time,
        }
    }
}

impl DockerClient {
    /// Stream container lifecycle events from the daemon. Type filtering
    /// happens daemon-side; the bridge still re-checks every field.
    pub fn stream_events(
        &self,
    ) -> impl futures_util::Stream<Item = Result<RuntimeEvent, DockerError>> + '_ {
        use bollard::query_parameters::EventsOptionsBuilder;

        let mut filters = HashMap::new();
        filters.insert("type", vec!["container"]);

        let options = EventsOptionsBuilder::default().filters(&filters).build();

        self.client
            .events(Some(options))
            .map(|r| r.map(RuntimeEvent::from).map_err(DockerError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::EventActor;

    fn container_event(action: &str, name: &str) -> EventMessage {
        let mut attributes = HashMap::new();
        attributes.insert("name".to_string(), name.to_string());
        EventMessage {
            typ: Some(EventMessageTypeEnum::CONTAINER),
            action: Some(action.to_string()),
            actor: Some(EventActor {
                id: Some("deadbeef".to_string()),
                attributes: Some(attributes),
            }),
            time: Some(1700000000),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_start_event() {
        let event = RuntimeEvent::from(container_event("start", "web"));
        assert_eq!(event.kind, EventKind::Container);
        assert_eq!(event.action, EventAction::Start);
        assert_eq!(event.name, "web");
        assert_eq!(event.time, 1700000000);
    }

    #[test]
    fn test_convert_die_event() {
        let event = RuntimeEvent::from(container_event("die", "db"));
        assert_eq!(event.action, EventAction::Die);
    }

    #[test]
    fn test_unrelated_action_maps_to_other() {
        let event = RuntimeEvent::from(container_event("exec_create: /bin/sh", "web"));
        assert_eq!(event.action, EventAction::Other);
    }

    #[test]
    fn test_non_container_type_maps_to_other() {
        let msg = EventMessage {
            typ: Some(EventMessageTypeEnum::NETWORK),
            action: Some("create".to_string()),
            ..Default::default()
        };
        let event = RuntimeEvent::from(msg);
        assert_eq!(event.kind, EventKind::Other);
    }

    #[test]
    fn test_name_falls_back_to_actor_id() {
        let msg = EventMessage {
            typ: Some(EventMessageTypeEnum::CONTAINER),
            action: Some("start".to_string()),
            actor: Some(EventActor {
                id: Some("deadbeef".to_string()),
                attributes: None,
            }),
            ..Default::default()
        };
        let event = RuntimeEvent::from(msg);
        assert_eq!(event.name, "deadbeef");
    }

    #[test]
    fn test_name_falls_back_to_unknown() {
        let event = RuntimeEvent::from(EventMessage::default());
        assert_eq!(event.name, "unknown");
        assert_eq!(event.kind, EventKind::Other);
        assert_eq!(event.action, EventAction::Other);
    }
}
