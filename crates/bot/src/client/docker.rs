//! Docker trait — abstract interface for the operations the bot needs.
//!
//! `live.rs` provides the real Bollard-backed implementation.
//! `fake.rs` provides a test double.

use std::pin::Pin;

use crate::docker::client::DockerError;
use crate::docker::container::LogLine;
use crate::docker::event::RuntimeEvent;
use crate::docker::inventory::ContainerInfo;

/// Unified async interface over the container runtime.
///
/// Object-safe thanks to `Pin<Box<…>>` returns for the async methods.
/// Implementations must be `Send + Sync` so they can live inside the shared
/// bot state.
pub trait DockerOps: Send + Sync {
    /// List all containers, including stopped ones.
    fn list_containers(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<ContainerInfo>, DockerError>> + Send + '_>>;

    /// Resolve a single container by name.
    fn inspect_container<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ContainerInfo, DockerError>> + Send + 'a>>;

    /// Restart a container with an optional stop timeout (in seconds).
    fn restart_container<'a>(
        &'a self,
        name: &'a str,
        timeout_secs: Option<u32>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), DockerError>> + Send + 'a>>;

    /// Fetch up to `lines` most recent timestamped log lines.
    fn tail_logs<'a>(
        &'a self,
        name: &'a str,
        lines: usize,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogLine>, DockerError>> + Send + 'a>>;

    /// Subscribe to the container lifecycle event stream. The stream is
    /// infinite in normal operation; its end means the subscription died.
    fn stream_events(
        &self,
    ) -> Pin<Box<dyn tokio_stream::Stream<Item = Result<RuntimeEvent, DockerError>> + Send + '_>>;
}
