//! Filter — the pure forwarding decision applied to each dequeued event.

use crate::conf::BotConfig;
use crate::docker::event::{EventAction, EventKind, RuntimeEvent};

#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Forward,
    Drop(DropReason),
}

#[derive(Debug, PartialEq, Eq)]
pub enum DropReason {
    NotContainer,
    UninterestingAction,
    NotificationsOff,
    NotMonitored,
}

/// Decide whether one event is forwarded. Check order mirrors arrival
/// processing: event shape first, then the toggle as read at dequeue time,
/// then the monitored-set scope.
pub fn decide(event: &RuntimeEvent, notifications_on: bool, config: &BotConfig) -> Verdict {
    if event.kind != EventKind::Container {
        return Verdict::Drop(DropReason::NotContainer);
    }
    if !matches!(event.action, EventAction::Start | EventAction::Die) {
        return Verdict::Drop(DropReason::UninterestingAction);
    }
    if !notifications_on {
        return Verdict::Drop(DropReason::NotificationsOff);
    }
    if !config.monitors(&event.name) {
        return Verdict::Drop(DropReason::NotMonitored);
    }
    Verdict::Forward
}
