//! Issue lookup tool
//!
//! Fetches a single issue and reshapes it into a flat, human-oriented
//! summary with the description markup stripped.

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{clean_description, format_datetime, text_at, UNASSIGNED, UNKNOWN, UNKNOWN_STATUS};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Parameters for the get_jira_issue tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetJiraIssueParams {
    /// JIRA issue key (required)
    /// Examples: "PROJ-123", "KEY-456"
    #[schemars(length(min = 1))]
    pub issue_key: String,
}

/// Result from the get_jira_issue tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJiraIssueResult {
    /// Issue key as returned by JIRA
    pub issue_key: String,

    /// One-line issue summary
    pub summary: String,

    /// Description with tag markup stripped (rich-text bodies stringified)
    pub description: String,

    /// Current status name
    pub status: String,

    /// Assignee display name, or "Unassigned"
    pub assignee: String,

    /// Reporter display name
    pub reporter: String,

    /// Priority name
    pub priority: String,

    /// Issue type name
    pub issue_type: String,

    /// Creation timestamp, human-readable
    pub created: String,

    /// Last update timestamp, human-readable
    pub updated: String,

    /// Browse URL for the issue
    pub url: String,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for GetJiraIssueResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", self.issue_key, self.summary)?;
        writeln!(
            f,
            "Status: {} | Type: {} | Priority: {}",
            self.status, self.issue_type, self.priority
        )?;
        writeln!(f, "Assignee: {} | Reporter: {}", self.assignee, self.reporter)?;
        writeln!(f, "Created: {} | Updated: {}", self.created, self.updated)?;
        write!(f, "{}", self.url)?;
        if !self.description.is_empty() {
            write!(f, "\n\n{}", self.description)?;
        }
        Ok(())
    }
}

/// Implementation of the get_jira_issue tool
pub struct GetJiraIssueTool {
    client: Arc<JiraClient>,
}

impl GetJiraIssueTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the get_jira_issue tool
    #[instrument(skip(self), fields(issue_key = %params.issue_key))]
    pub async fn execute(&self, params: GetJiraIssueParams) -> JiraReaderResult<GetJiraIssueResult> {
        let path = format!("/rest/api/3/issue/{}", params.issue_key);
        let raw = self.client.get(&path, &[]).await?;

        let issue_key = text_at(&raw, "/key", &params.issue_key);
        let url = self.client.browse_url(&issue_key);

        info!("Retrieved issue {}", issue_key);

        Ok(GetJiraIssueResult {
            summary: text_at(&raw, "/fields/summary", ""),
            description: clean_description(raw.pointer("/fields/description")),
            status: text_at(&raw, "/fields/status/name", UNKNOWN_STATUS),
            assignee: text_at(&raw, "/fields/assignee/displayName", UNASSIGNED),
            reporter: text_at(&raw, "/fields/reporter/displayName", UNKNOWN),
            priority: text_at(&raw, "/fields/priority/name", UNKNOWN),
            issue_type: text_at(&raw, "/fields/issuetype/name", UNKNOWN),
            created: format_datetime(&text_at(&raw, "/fields/created", "")),
            updated: format_datetime(&text_at(&raw, "/fields/updated", "")),
            issue_key,
            url,
            raw,
        })
    }
}
