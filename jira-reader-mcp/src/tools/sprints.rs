//! Sprint tools (JIRA Agile API)
//!
//! Listing the sprints of a board and the issues inside one sprint.

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{IssueSummary, Page, SprintSummary};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Parameters for the list_board_sprints tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListBoardSprintsParams {
    /// Board id to list sprints from (required)
    pub board_id: u64,

    /// Filter by sprint state (optional)
    /// Values: "future", "active", "closed"
    pub state: Option<String>,

    /// Starting offset for pagination (optional, server default: 0)
    pub start_at: Option<u32>,

    /// Maximum sprints to return (optional, server default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the list_board_sprints tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBoardSprintsResult {
    /// Board the sprints belong to
    pub board_id: u64,

    /// Total number of matching sprints
    pub total: u64,

    /// Starting offset of this page
    pub start_at: u64,

    /// Page size used by the server
    pub max_results: u64,

    /// Sprints in this page
    pub sprints: Vec<SprintSummary>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for ListBoardSprintsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} sprints on board {} (showing {}-{} of {})",
            self.sprints.len(),
            self.board_id,
            self.start_at,
            self.start_at + self.sprints.len() as u64,
            self.total
        )?;
        for sprint in &self.sprints {
            let window = match (&sprint.start_date, &sprint.end_date) {
                (Some(start), Some(end)) => format!(" {} -> {}", start, end),
                (Some(start), None) => format!(" from {}", start),
                _ => String::new(),
            };
            writeln!(f, "#{} {} [{}]{}", sprint.id, sprint.name, sprint.state, window)?;
        }
        Ok(())
    }
}

/// Implementation of the list_board_sprints tool
pub struct ListBoardSprintsTool {
    client: Arc<JiraClient>,
}

impl ListBoardSprintsTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the list_board_sprints tool
    #[instrument(skip(self), fields(board_id = params.board_id))]
    pub async fn execute(
        &self,
        params: ListBoardSprintsParams,
    ) -> JiraReaderResult<ListBoardSprintsResult> {
        let path = format!("/rest/agile/1.0/board/{}/sprint", params.board_id);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(state) = params.state {
            query.push(("state", state));
        }
        if let Some(start_at) = params.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("maxResults", max_results.to_string()));
        }

        let raw = self.client.get(&path, &query).await?;
        let page = Page::from_value(&raw);

        let sprints: Vec<SprintSummary> = raw
            .pointer("/values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(SprintSummary::from_value).collect())
            .unwrap_or_default();

        info!(
            "Listed {} sprints for board {}",
            sprints.len(),
            params.board_id
        );

        Ok(ListBoardSprintsResult {
            board_id: params.board_id,
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            sprints,
            raw,
        })
    }
}

/// Parameters for the list_sprint_issues tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListSprintIssuesParams {
    /// Sprint id to list issues from (required)
    pub sprint_id: u64,

    /// Starting offset for pagination (optional, server default: 0)
    pub start_at: Option<u32>,

    /// Maximum issues to return (optional, server default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the list_sprint_issues tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSprintIssuesResult {
    /// Sprint the issues belong to
    pub sprint_id: u64,

    /// Total number of issues in the sprint
    pub total: u64,

    /// Starting offset of this page
    pub start_at: u64,

    /// Page size used by the server
    pub max_results: u64,

    /// Issues in this page
    pub issues: Vec<IssueSummary>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for ListSprintIssuesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} issues in sprint {} (showing {}-{} of {})",
            self.issues.len(),
            self.sprint_id,
            self.start_at,
            self.start_at + self.issues.len() as u64,
            self.total
        )?;
        for issue in &self.issues {
            writeln!(
                f,
                "{}: {} [{}, {}]",
                issue.key, issue.summary, issue.status, issue.assignee
            )?;
        }
        Ok(())
    }
}

/// Implementation of the list_sprint_issues tool
pub struct ListSprintIssuesTool {
    client: Arc<JiraClient>,
}

impl ListSprintIssuesTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the list_sprint_issues tool
    #[instrument(skip(self), fields(sprint_id = params.sprint_id))]
    pub async fn execute(
        &self,
        params: ListSprintIssuesParams,
    ) -> JiraReaderResult<ListSprintIssuesResult> {
        let path = format!("/rest/agile/1.0/sprint/{}/issue", params.sprint_id);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start_at) = params.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("maxResults", max_results.to_string()));
        }

        let raw = self.client.get(&path, &query).await?;
        let page = Page::from_value(&raw);

        let issues: Vec<IssueSummary> = raw
            .pointer("/issues")
            .and_then(Value::as_array)
            .map(|issues| {
                issues
                    .iter()
                    .map(|issue| {
                        let key = issue.pointer("/key").and_then(Value::as_str).unwrap_or("");
                        IssueSummary::from_value(issue, self.client.browse_url(key))
                    })
                    .collect()
            })
            .unwrap_or_default();

        info!(
            "Listed {} issues for sprint {}",
            issues.len(),
            params.sprint_id
        );

        Ok(ListSprintIssuesResult {
            sprint_id: params.sprint_id,
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            issues,
            raw,
        })
    }
}
