//! Issue comment retrieval tool

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{CommentSummary, Page};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Parameters for the get_jira_issue_comments tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetIssueCommentsParams {
    /// JIRA issue key or numeric id (required)
    #[schemars(length(min = 1))]
    pub issue_key: String,

    /// Starting offset for pagination (optional, server default: 0)
    pub start_at: Option<u32>,

    /// Maximum comments to return (optional, server default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the get_jira_issue_comments tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetIssueCommentsResult {
    /// Issue key the comments belong to
    pub issue_key: String,

    /// Total number of comments on the issue
    pub total: u64,

    /// Starting offset of this page
    pub start_at: u64,

    /// Page size used by the server
    pub max_results: u64,

    /// Comments in this page
    pub comments: Vec<CommentSummary>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for GetIssueCommentsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} comments on {} (showing {}-{} of {})",
            self.comments.len(),
            self.issue_key,
            self.start_at,
            self.start_at + self.comments.len() as u64,
            self.total
        )?;
        for comment in &self.comments {
            writeln!(f, "[{}] {}: {}", comment.created, comment.author, comment.body)?;
        }
        Ok(())
    }
}

/// Implementation of the get_jira_issue_comments tool
pub struct GetIssueCommentsTool {
    client: Arc<JiraClient>,
}

impl GetIssueCommentsTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the get_jira_issue_comments tool
    #[instrument(skip(self), fields(issue_key = %params.issue_key))]
    pub async fn execute(
        &self,
        params: GetIssueCommentsParams,
    ) -> JiraReaderResult<GetIssueCommentsResult> {
        let path = format!("/rest/api/3/issue/{}/comment", params.issue_key);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start_at) = params.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("maxResults", max_results.to_string()));
        }

        let raw = self.client.get(&path, &query).await?;
        let page = Page::from_value(&raw);

        let comments = raw
            .pointer("/comments")
            .and_then(Value::as_array)
            .map(|comments| comments.iter().map(CommentSummary::from_value).collect())
            .unwrap_or_default();

        info!(
            "Retrieved {} of {} comments for {}",
            page.max_results.min(page.total),
            page.total,
            params.issue_key
        );

        Ok(GetIssueCommentsResult {
            issue_key: params.issue_key,
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            comments,
            raw,
        })
    }
}
