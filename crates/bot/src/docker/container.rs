//! Container domain — listing, lookup by name, restart, bounded log tails.

use super::client::{DockerClient, DockerError};
use super::inventory::ContainerInfo;

use bollard::container::LogOutput;
use bollard::query_parameters::{ListContainersOptions, LogsOptions, RestartContainerOptions};
use bytes::Bytes;
use futures_util::stream::StreamExt;

/// One timestamped log line as retrieved from the daemon.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: i64, // Unix nanoseconds
    pub content: Bytes,
}

impl LogLine {
    /// Render for chat output: short timestamp, then the line itself.
    pub fn display(&self) -> String {
        let ts = chrono::DateTime::from_timestamp_nanos(self.timestamp);
        let text = String::from_utf8_lossy(&self.content);
        format!("{} {}", ts.format("%H:%M:%S"), text.trim_end())
    }
}

impl DockerClient {
    pub async fn list_containers(&self) -> Result<Vec<ContainerInfo>, DockerError> {
        let options = Some(ListContainersOptions {
            all: true,
            ..Default::default()
        });
        let containers = self.client.list_containers(options).await?;
        Ok(containers.into_iter().map(|c| c.into()).collect())
    }

    /// Resolve a container by name (the daemon accepts names as well as ids).
    /// A 404 becomes [`DockerError::ContainerNotFound`] so callers can offer
    /// suggestions instead of failing opaquely.
    pub async fn inspect_container(&self, name: &str) -> Result<ContainerInfo, DockerError> {
        let details = self
            .client
            .inspect_container(name, None)
            .await
            .map_err(|e| not_found_or(name, e))?;
        Ok(ContainerInfo::from(details))
    }

    /// Restart a container with an optional timeout (in seconds).
    pub async fn restart_container(
        &self,
        name: &str,
        timeout_secs: Option<u32>,
    ) -> Result<(), DockerError> {
        let options = timeout_secs.map(|t| RestartContainerOptions {
            t: Some(t as i32),
            ..Default::default()
        });

        self.client
            .restart_container(name, options)
            .await
            .map_err(|e| not_found_or(name, e))
    }

    /// Fetch up to `lines` most recent log lines, with timestamps. The tail
    /// bound is applied daemon-side so the response stays small.
    pub async fn tail_logs(&self, name: &str, lines: usize) -> Result<Vec<LogLine>, DockerError> {
        let options = LogsOptions {
            follow: false,
            stdout: true,
            stderr: true,
            since: 0,
            until: 0,
            timestamps: true,
            tail: lines.to_string(),
        };

        let mut stream = self.client.logs(name, Some(options));
        let mut collected = Vec::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(output) => collected.push(convert_log(output)),
                Err(e) => return Err(not_found_or(name, e)),
            }
        }
        Ok(collected)
    }
}

fn not_found_or(name: &str, e: bollard::errors::Error) -> DockerError {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => DockerError::ContainerNotFound(name.to_string()),
        other => DockerError::BollardError(other),
    }
}

/// Converts Bollard's `LogOutput` to a [`LogLine`].
///
/// Docker with `timestamps: true` prepends an RFC3339Nano timestamp like
/// `"2023-01-01T00:00:00.000000000Z message content..."`.
pub(crate) fn convert_log(output: LogOutput) -> LogLine {
    let raw_bytes = match output {
        LogOutput::StdOut { message }
        | LogOutput::StdErr { message }
        | LogOutput::StdIn { message }
        | LogOutput::Console { message } => message,
    };

    let split_idx = raw_bytes.iter().position(|&b| b == b' ');

    let (timestamp, content) = match split_idx {
        Some(idx) => {
            let parsed = std::str::from_utf8(&raw_bytes[..idx])
                .ok()
                .and_then(|ts_str| chrono::DateTime::parse_from_rfc3339(ts_str).ok());
            match parsed {
                Some(dt) => {
                    let ts_nanos = dt
                        .timestamp_nanos_opt()
                        .unwrap_or_else(|| chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
                    let msg_start = idx + 1;
                    let clean_content = if msg_start < raw_bytes.len() {
                        raw_bytes.slice(msg_start..)
                    } else {
                        Bytes::new()
                    };
                    (ts_nanos, clean_content)
                }
                None => (
                    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0),
                    raw_bytes,
                ),
            }
        }
        None => (
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0),
            raw_bytes,
        ),
    };

    LogLine { timestamp, content }
}
