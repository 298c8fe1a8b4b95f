//! Summary figures for the configuration document.

use crate::models::Project;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "N/A";

/// Aggregates over the document, computed fresh on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigStats {
    pub total_projects: usize,
    pub total_history_entries: usize,
    pub total_mcp_servers: usize,
    /// Size of the configuration file on disk in bytes; 0 if it does not exist.
    pub config_size: u64,
    pub num_startups: u64,
    pub first_start_time: String,
    pub user_email: String,
    pub organization: String,
}

impl ConfigStats {
    /// Compute stats from the document, its materialized projects and the
    /// on-disk size.
    #[must_use]
    pub fn compute(
        document: &Map<String, Value>,
        projects: &BTreeMap<String, Project>,
        config_size: u64,
    ) -> Self {
        let account = document.get("oauthAccount");
        let account_field = |key: &str| {
            account
                .and_then(|a| a.get(key))
                .and_then(Value::as_str)
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };

        Self {
            total_projects: projects.len(),
            total_history_entries: projects.values().map(Project::history_count).sum(),
            total_mcp_servers: projects.values().map(|p| p.mcp_servers.len()).sum(),
            config_size,
            num_startups: document.get("numStartups").and_then(Value::as_u64).unwrap_or(0),
            first_start_time: document
                .get("firstStartTime")
                .and_then(Value::as_str)
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            user_email: account_field("emailAddress"),
            organization: account_field("organizationName"),
        }
    }
}
