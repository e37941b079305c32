use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::docker::DockerOps;
use crate::conf::BotConfig;

/// Process-wide shared state: the runtime handle, the immutable
/// configuration, and the one mutable bit.
pub struct BotState {
    pub docker: Arc<dyn DockerOps>,
    pub config: BotConfig,
    /// Notification toggle. Relaxed atomics are enough: a toggle racing an
    /// in-flight forward decision may let one stale event through or drop
    /// one, which is tolerated.
    events_enabled: AtomicBool,
}

impl BotState {
    pub fn new(docker: Arc<dyn DockerOps>, config: BotConfig) -> Self {
        let enabled = config.events_enabled;
        Self {
            docker,
            config,
            events_enabled: AtomicBool::new(enabled),
        }
    }

    pub fn events_enabled(&self) -> bool {
        self.events_enabled.load(Ordering::Relaxed)
    }

    /// Flip the notification toggle and return the new value.
    pub fn toggle_events(&self) -> bool {
        !self.events_enabled.fetch_xor(true, Ordering::Relaxed)
    }
}

pub type SharedState = Arc<BotState>;
