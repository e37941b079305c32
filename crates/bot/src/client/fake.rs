//! Fake — test double for Docker operations.
//!
//! Provides a deterministic [`FakeDocker`] that implements [`DockerOps`]
//! using in-memory state. Useful for unit-testing command handlers and the
//! event bridge without a running Docker daemon.

use std::pin::Pin;
use std::sync::Mutex;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::client::docker::DockerOps;
use crate::docker::client::DockerError;
use crate::docker::container::LogLine;
use crate::docker::event::RuntimeEvent;
use crate::docker::inventory::ContainerInfo;

/// A canned container plus its log backlog.
#[derive(Clone, Debug)]
struct FakeEntry {
    info: ContainerInfo,
    logs: Vec<String>,
}

/// Mutable inner state protected by a mutex.
struct Inner {
    containers: Vec<FakeEntry>,
    restart_calls: Vec<String>,
    /// State a container settles into after a restart.
    restart_result: String,
    events_tx: Option<mpsc::UnboundedSender<Result<RuntimeEvent, DockerError>>>,
    events_rx: Option<mpsc::UnboundedReceiver<Result<RuntimeEvent, DockerError>>>,
}

/// A fake Docker client for deterministic testing.
///
/// All methods operate on in-memory state. The seeding methods allow
/// pre-populating containers and logs before running test code; events are
/// injected through [`FakeDocker::push_event`].
pub struct FakeDocker {
    inner: Mutex<Inner>,
}

impl FakeDocker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            inner: Mutex::new(Inner {
                containers: Vec::new(),
                restart_calls: Vec::new(),
                restart_result: "running".to_string(),
                events_tx: Some(tx),
                events_rx: Some(rx),
            }),
        }
    }

    /// Build a container snapshot with sensible filler fields.
    pub fn container(name: &str, state: &str) -> ContainerInfo {
        ContainerInfo {
            id: format!("{name}-id"),
            name: name.to_string(),
            image: "nginx:latest".to_string(),
            state: state.to_string(),
            status: if state == "running" {
                "Up 1 minute".to_string()
            } else {
                format!("Exited ({state})")
            },
            created_at: 1700000000,
        }
    }

    /// Seed a container into the fake store.
    pub fn add_container(&self, info: ContainerInfo) {
        self.lock().containers.push(FakeEntry {
            info,
            logs: Vec::new(),
        });
    }

    /// Seed log lines for an already-added container.
    pub fn add_logs(&self, name: &str, lines: &[&str]) {
        let mut inner = self.lock();
        if let Some(entry) = inner.containers.iter_mut().find(|e| e.info.name == name) {
            entry.logs.extend(lines.iter().map(|l| l.to_string()));
        }
    }

    /// State containers report after `restart_container`.
    pub fn set_restart_result(&self, state: &str) {
        self.lock().restart_result = state.to_string();
    }

    /// Inject one event into the fake stream.
    pub fn push_event(&self, event: RuntimeEvent) {
        if let Some(tx) = &self.lock().events_tx {
            let _ = tx.send(Ok(event));
        }
    }

    /// Terminate the fake event stream, as a dying daemon would.
    pub fn close_events(&self) {
        self.lock().events_tx = None;
    }

    /// Restart calls recorded so far, in order.
    pub fn restart_calls(&self) -> Vec<String> {
        self.lock().restart_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FakeDocker {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerOps for FakeDocker {
    fn list_containers(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<ContainerInfo>, DockerError>> + Send + '_>>
    {
        let infos = self.lock().containers.iter().map(|e| e.info.clone()).collect();
        Box::pin(async move { Ok(infos) })
    }

    fn inspect_container<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ContainerInfo, DockerError>> + Send + 'a>>
    {
        let found = self
            .lock()
            .containers
            .iter()
            .find(|e| e.info.name == name)
            .map(|e| e.info.clone());
        Box::pin(async move {
            found.ok_or_else(|| DockerError::ContainerNotFound(name.to_string()))
        })
    }

    fn restart_container<'a>(
        &'a self,
        name: &'a str,
        _timeout_secs: Option<u32>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), DockerError>> + Send + 'a>> {
        let mut inner = self.lock();
        let result_state = inner.restart_result.clone();
        let found = inner
            .containers
            .iter_mut()
            .find(|e| e.info.name == name)
            .map(|entry| entry.info.state = result_state)
            .is_some();
        if found {
            inner.restart_calls.push(name.to_string());
        }
        Box::pin(async move {
            if found {
                Ok(())
            } else {
                Err(DockerError::ContainerNotFound(name.to_string()))
            }
        })
    }

    fn tail_logs<'a>(
        &'a self,
        name: &'a str,
        lines: usize,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<LogLine>, DockerError>> + Send + 'a>>
    {
        let found = self
            .lock()
            .containers
            .iter()
            .find(|e| e.info.name == name)
            .map(|entry| {
                let skip = entry.logs.len().saturating_sub(lines);
                entry.logs[skip..]
                    .iter()
                    .enumerate()
                    .map(|(i, line)| LogLine {
                        timestamp: 1_700_000_000_000_000_000 + i as i64,
                        content: Bytes::from(line.clone()),
                    })
                    .collect::<Vec<_>>()
            });
        Box::pin(async move {
            found.ok_or_else(|| DockerError::ContainerNotFound(name.to_string()))
        })
    }

    fn stream_events(
        &self,
    ) -> Pin<Box<dyn tokio_stream::Stream<Item = Result<RuntimeEvent, DockerError>> + Send + '_>>
    {
        // The receiver can only be taken once; a second subscription sees an
        // immediately-terminated stream.
        match self.lock().events_rx.take() {
            Some(rx) => Box::pin(UnboundedReceiverStream::new(rx)),
            None => Box::pin(tokio_stream::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::docker::DockerOps;

    #[tokio::test]
    async fn test_inspect_finds_seeded_container() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));

        let info = fake.inspect_container("web").await.unwrap();
        assert_eq!(info.name, "web");
        assert!(info.is_running());
    }

    #[tokio::test]
    async fn test_inspect_unknown_is_not_found() {
        let fake = FakeDocker::new();
        let err = fake.inspect_container("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_restart_records_call_and_flips_state() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "exited"));

        fake.restart_container("web", None).await.unwrap();
        assert_eq!(fake.restart_calls(), vec!["web"]);

        let info = fake.inspect_container("web").await.unwrap();
        assert!(info.is_running());
    }

    #[tokio::test]
    async fn test_tail_logs_bounded_to_last_lines() {
        let fake = FakeDocker::new();
        fake.add_container(FakeDocker::container("web", "running"));
        fake.add_logs("web", &["one", "two", "three"]);

        let lines = fake.tail_logs("web", 2).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content, Bytes::from("two"));
        assert_eq!(lines[1].content, Bytes::from("three"));
    }
}
