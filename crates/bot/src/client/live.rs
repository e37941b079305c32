//! Live — implements `DockerOps` for the real Bollard-backed `DockerClient`.

use std::pin::Pin;

use crate::client::docker::DockerOps;
use crate::docker::client::{DockerClient, DockerError};
use crate::docker::container::LogLine;
use crate::docker::event::RuntimeEvent;
use crate::docker::inventory::ContainerInfo;

impl DockerOps for DockerClient {
    fn list_containers(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<ContainerInfo>, DockerError>> + Send + '_>>
    {
        Box::pin(self.list_containers())
    }

    fn inspect_container<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ContainerInfo, DockerError>> + Send + 'a>>
    {
        Box::pin(self.inspect_container(name))
    }

    fn restart_container<'a>(
        &'a self,
        name: &'a str,
        timeout_secs: Option<u32>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), DockerError>> + Send + 'a>> {
        Box::pin(self.restart_container(name, timeout_secs))
    }

    fn tail_logs<'a>(
        &'a self,
        name: &'a str,
        lines: usize,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogLine>, DockerError>> + Send + 'a>>
    {
        Box::pin(self.tail_logs(name, lines))
    }

    fn stream_events(
        &self,
    ) -> Pin<Box<dyn tokio_stream::Stream<Item = Result<RuntimeEvent, DockerError>> + Send + '_>>
    {
        Box::pin(self.stream_events())
    }
}
