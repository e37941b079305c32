//! Inventory — container snapshots derived from Docker's list and inspect APIs.

use bollard::models::{ContainerInspectResponse, ContainerSummary};
use chrono::DateTime;

/// Point-in-time container information. Always derived on demand from the
/// daemon; commands never hold one across requests.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,   // without leading slash
    pub image: String,
    pub state: String,  // "running", "paused", "exited"
    pub status: String, // "Up 2 hours"
    pub created_at: i64, // Unix timestamp
}

impl ContainerInfo {
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }

    /// Human-readable creation time for chat replies.
    pub fn created_display(&self) -> String {
        DateTime::from_timestamp(self.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl From<ContainerSummary> for ContainerInfo {
    fn from(s: ContainerSummary) -> Self {
        Self {
            id: s.id.unwrap_or_default(),
            name: s
                .names
                .as_deref()
                .and_then(|n| n.first())
                .map(|n| n.trim_start_matches('/'))
                .unwrap_or("unknown")
                .to_string(),
            image: s.image.unwrap_or_default(),
            state: s
                .state
                .map(|st| st.to_string())
                .unwrap_or_else(|| "unknown".into()),
            status: s.status.unwrap_or_default(),
            created_at: s.created.unwrap_or_default(),
        }
    }
}

impl From<ContainerInspectResponse> for ContainerInfo {
    fn from(details: ContainerInspectResponse) -> Self {
        // Inspect returns "Created" as an RFC3339 string, unlike List which
        // returns a Unix timestamp.
        let created_at = details
            .created
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.timestamp())
            .unwrap_or(0);

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status.as_ref())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".into());

        Self {
            id: details.id.unwrap_or_default(),
            name: details
                .name
                .map(|n| n.trim_start_matches('/').to_string())
                .unwrap_or_else(|| "unknown".into()),
            image: details.image.unwrap_or_default(),
            // Status is often empty in Inspect, unlike List; reconstruct it
            // from state.
            status: state.clone(),
            state,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{ContainerState, ContainerStateStatusEnum, ContainerSummaryStateEnum};

    #[test]
    fn test_from_summary_strips_leading_slash() {
        let summary = ContainerSummary {
            id: Some("abc123".to_string()),
            names: Some(vec!["/web".to_string()]),
            image: Some("nginx:latest".to_string()),
            state: Some(ContainerSummaryStateEnum::RUNNING),
            status: Some("Up 2 hours".to_string()),
            created: Some(1700000000),
            ..Default::default()
        };

        let info = ContainerInfo::from(summary);
        assert_eq!(info.name, "web");
        assert_eq!(info.state, "running");
        assert_eq!(info.status, "Up 2 hours");
        assert_eq!(info.created_at, 1700000000);
        assert!(info.is_running());
    }

    #[test]
    fn test_from_summary_missing_fields() {
        let info = ContainerInfo::from(ContainerSummary::default());
        assert_eq!(info.name, "unknown");
        assert_eq!(info.state, "unknown");
        assert!(!info.is_running());
    }

    #[test]
    fn test_from_inspect_parses_rfc3339_created() {
        let details = ContainerInspectResponse {
            id: Some("abc123".to_string()),
            name: Some("/db".to_string()),
            created: Some("2023-01-15T10:30:45.123456789Z".to_string()),
            state: Some(ContainerState {
                status: Some(ContainerStateStatusEnum::EXITED),
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = ContainerInfo::from(details);
        assert_eq!(info.name, "db");
        assert_eq!(info.state, "exited");
        assert!(!info.is_running());

        let expected = DateTime::parse_from_rfc3339("2023-01-15T10:30:45.123456789Z")
            .unwrap()
            .timestamp();
        assert_eq!(info.created_at, expected);
    }

    #[test]
    fn test_from_inspect_malformed_created_falls_back_to_zero() {
        let details = ContainerInspectResponse {
            created: Some("NOT_A_TIMESTAMP".to_string()),
            ..Default::default()
        };
        let info = ContainerInfo::from(details);
        assert_eq!(info.created_at, 0);
    }

    #[test]
    fn test_created_display_formats_timestamp() {
        let info = ContainerInfo {
            id: "1".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            state: "running".to_string(),
            status: "Up".to_string(),
            created_at: 1673778645,
        };
        assert_eq!(info.created_display(), "2023-01-15 10:30:45 UTC");
    }
}
