//! Forward — the long-lived event bridge.
//!
//! Two tasks share a bounded relay: a reader draining the Docker event
//! stream on its own task, and the forwarding loop turning surviving events
//! into chat notifications. Neither ever blocks command handling.

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::StreamExt;
use serenity::all::{ChannelId, Http};
use tracing::{debug, error, info, warn};

use crate::bridge::filter::{self, Verdict};
use crate::bridge::relay::{self, RelayReceiver, RelaySender};
use crate::chunk::format_log_chunks;
use crate::client::DockerOps;
use crate::docker::event::{EventAction, RuntimeEvent};
use crate::state::SharedState;

const INITIAL_RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);
const MAX_RESUBSCRIBE_DELAY: Duration = Duration::from_secs(60);

/// Run the bridge until process shutdown. Spawned once after the chat
/// connection is ready.
pub async fn run(state: SharedState, http: Arc<Http>, channel: ChannelId) {
    info!("Starting container event bridge");
    let (tx, rx) = relay::channel(state.config.event_queue_depth);

    let reader_state = Arc::clone(&state);
    tokio::spawn(read_events(reader_state, tx));

    forward_loop(state, http, channel, rx).await;
}

/// Drain the Docker event stream and offer each event to the relay. The
/// subscription itself is infinite; when it does end the reader logs loudly
/// and resubscribes with capped exponential backoff rather than leaving the
/// bridge silently dead.
async fn read_events(state: SharedState, tx: RelaySender) {
    let mut delay = INITIAL_RESUBSCRIBE_DELAY;
    loop {
        let mut stream = state.docker.stream_events();
        let mut delivered = false;

        while let Some(item) = stream.next().await {
            match item {
                Ok(event) => {
                    delivered = true;
                    if !tx.offer(event) {
                        if tx.is_closed() {
                            info!("Event relay consumer gone; stopping stream reader");
                            return;
                        }
                        warn!("Event relay full; dropping container event");
                    }
                }
                Err(e) => warn!(error = %e, "Error on Docker event stream"),
            }
        }

        if delivered {
            delay = INITIAL_RESUBSCRIBE_DELAY;
        }
        error!(
            "Docker event stream terminated; resubscribing in {:?}",
            delay
        );
        tokio::time::sleep(delay).await;
        delay = (delay * 2).min(MAX_RESUBSCRIBE_DELAY);
    }
}

/// Consume relayed events, apply the forwarding decision, and deliver
/// notifications in arrival order. Every per-event fault is logged and the
/// loop moves on to the next event.
async fn forward_loop(
    state: SharedState,
    http: Arc<Http>,
    channel: ChannelId,
    mut rx: RelayReceiver,
) {
    while let Some(event) = rx.next().await {
        match filter::decide(&event, state.events_enabled(), &state.config) {
            Verdict::Drop(reason) => {
                debug!(name = %event.name, ?reason, "Dropping container event");
            }
            Verdict::Forward => deliver(&state, &http, channel, &event).await,
        }
    }
    info!("Event relay closed; forwarding loop finished");
}

async fn deliver(state: &SharedState, http: &Arc<Http>, channel: ChannelId, event: &RuntimeEvent) {
    if let Err(e) = channel.say(http, notification_line(event)).await {
        warn!(name = %event.name, error = %e, "Failed to send event notification");
    }
    if event.action == EventAction::Die {
        send_trailing_logs(state, http, channel, &event.name).await;
    }
}

/// The single notification line for a forwarded event.
pub(crate) fn notification_line(event: &RuntimeEvent) -> String {
    match event.action {
        EventAction::Start => format!(
            "🟢 Container '{}' started at {}",
            event.name,
            event.time_display()
        ),
        EventAction::Die => format!(
            "🔴 Container '{}' died at {}",
            event.name,
            event.time_display()
        ),
        EventAction::Other => format!(
            "ℹ️ Container '{}' event at {}",
            event.name,
            event.time_display()
        ),
    }
}

/// Best-effort trailing log excerpt after a die event. The container may be
/// gone already; that gets a notice instead of a silent failure.
async fn send_trailing_logs(state: &SharedState, http: &Arc<Http>, channel: ChannelId, name: &str) {
    let tail = state.config.die_log_tail;
    match state.docker.tail_logs(name, tail).await {
        Ok(lines) => {
            let header = format!("Last {} log lines for '{}':", tail, name);
            if let Err(e) = channel.say(http, header).await {
                warn!(name = %name, error = %e, "Failed to send log header");
                return;
            }
            let rendered: Vec<String> = lines.iter().map(|l| l.display()).collect();
            for piece in format_log_chunks(&rendered) {
                if let Err(e) = channel.say(http, piece).await {
                    warn!(name = %name, error = %e, "Failed to send log chunk");
                    return;
                }
            }
        }
        Err(e) if e.is_not_found() => {
            let notice = format!("⚠️ Container '{}' not found for logs (already removed?)", name);
            if let Err(e) = channel.say(http, notice).await {
                warn!(name = %name, error = %e, "Failed to send not-found notice");
            }
        }
        Err(e) => warn!(name = %name, error = %e, "Failed to fetch trailing logs"),
    }
}
