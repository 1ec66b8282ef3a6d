//! JQL search tools
//!
//! `search_jira_issues` passes a caller-supplied JQL string through verbatim;
//! `list_project_issues` scopes the search to one project, optionally
//! appending a caller-supplied JQL tail.

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{IssueSummary, Page};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Fields requested from the search endpoint when the caller names none
pub const DEFAULT_SEARCH_FIELDS: &str = "key,summary,status,assignee,priority,issuetype,updated";

/// Page size used for search calls when the caller names none
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Parameters for the search_jira_issues tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchIssuesParams {
    /// JQL query, passed through verbatim (required)
    /// Examples: "assignee = currentUser() AND status = \"In Progress\""
    #[schemars(length(min = 1))]
    pub jql: String,

    /// Starting offset for pagination (optional, default: 0)
    pub start_at: Option<u32>,

    /// Maximum issues to return (optional, default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,

    /// Comma-separated field list to request (optional)
    /// Default: "key,summary,status,assignee,priority,issuetype,updated"
    pub fields: Option<String>,
}

/// Result from the search_jira_issues tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIssuesResult {
    /// JQL query that was executed
    pub jql: String,

    /// Total number of matching issues
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
impl std::fmt::Display for SearchIssuesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} issues for JQL `{}` (showing {}-{} of {})",
            self.issues.len(),
            self.jql,
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

/// Build the POST body for the search endpoint
///
/// Pagination defaults are applied here, in the request body, never in the
/// query string.
pub(crate) fn search_body(
    jql: &str,
    start_at: Option<u32>,
    max_results: Option<u32>,
    fields: Option<&str>,
) -> Value {
    let fields: Vec<&str> = fields
        .unwrap_or(DEFAULT_SEARCH_FIELDS)
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();

    json!({
        "jql": jql,
        "startAt": start_at.unwrap_or(0),
        "maxResults": max_results.unwrap_or(DEFAULT_PAGE_SIZE),
        "fields": fields,
    })
}

/// JQL for a project-scoped listing
pub(crate) fn project_jql(project_key: &str, jql_tail: Option<&str>) -> String {
    match jql_tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        Some(tail) => format!("project={} {}", project_key, tail),
        None => format!("project={}", project_key),
    }
}

/// Reshape a search response body into issue summaries
fn project_issues(raw: &Value, client: &JiraClient) -> Vec<IssueSummary> {
    raw.pointer("/issues")
        .and_then(Value::as_array)
        .map(|issues| {
            issues
                .iter()
                .map(|issue| {
                    let key = issue.pointer("/key").and_then(Value::as_str).unwrap_or("");
                    IssueSummary::from_value(issue, client.browse_url(key))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Implementation of the search_jira_issues tool
pub struct SearchIssuesTool {
    client: Arc<JiraClient>,
}

impl SearchIssuesTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the search_jira_issues tool
    #[instrument(skip(self), fields(jql = %params.jql))]
    pub async fn execute(&self, params: SearchIssuesParams) -> JiraReaderResult<SearchIssuesResult> {
        let body = search_body(
            &params.jql,
            params.start_at,
            params.max_results,
            params.fields.as_deref(),
        );

        let raw = self.client.post("/rest/api/3/search", &body).await?;
        let page = Page::from_value(&raw);
        let issues = project_issues(&raw, &self.client);

        info!(
            "Search matched {} issues ({} in this page)",
            page.total,
            issues.len()
        );

        Ok(SearchIssuesResult {
            jql: params.jql,
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            issues,
            raw,
        })
    }
}

/// Parameters for the list_project_issues tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListProjectIssuesParams {
    /// Project key to list issues for (required)
    /// Examples: "PROJ"
    #[schemars(length(min = 1))]
    pub project_key: String,

    /// JQL tail appended after the project clause (optional)
    /// Examples: "AND status = \"Done\" ORDER BY updated DESC"
    pub jql_tail: Option<String>,

    /// Starting offset for pagination (optional, default: 0)
    pub start_at: Option<u32>,

    /// Maximum issues to return (optional, default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the list_project_issues tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectIssuesResult {
    /// Project key the listing was scoped to
    pub project_key: String,

    /// JQL query that was executed
    pub jql: String,

    /// Total number of matching issues
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
impl std::fmt::Display for ListProjectIssuesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} issues in project {} (showing {}-{} of {})",
            self.issues.len(),
            self.project_key,
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

/// Implementation of the list_project_issues tool
pub struct ListProjectIssuesTool {
    client: Arc<JiraClient>,
}

impl ListProjectIssuesTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the list_project_issues tool
    #[instrument(skip(self), fields(project_key = %params.project_key))]
    pub async fn execute(
        &self,
        params: ListProjectIssuesParams,
    ) -> JiraReaderResult<ListProjectIssuesResult> {
        let jql = project_jql(&params.project_key, params.jql_tail.as_deref());
        let body = search_body(&jql, params.start_at, params.max_results, None);

        let raw = self.client.post("/rest/api/3/search", &body).await?;
        let page = Page::from_value(&raw);
        let issues = project_issues(&raw, &self.client);

        info!(
            "Project {} listing matched {} issues",
            params.project_key, page.total
        );

        Ok(ListProjectIssuesResult {
            project_key: params.project_key,
            jql,
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            issues,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_jql_without_tail() {
        assert_eq!(project_jql("PROJ", None), "project=PROJ");
        assert_eq!(project_jql("PROJ", Some("")), "project=PROJ");
        assert_eq!(project_jql("PROJ", Some("   ")), "project=PROJ");
    }

    #[test]
    fn test_project_jql_with_tail() {
        assert_eq!(
            project_jql("PROJ", Some(r#"AND status="Done""#)),
            r#"project=PROJ AND status="Done""#
        );
    }

    #[test]
    fn test_search_body_defaults() {
        let body = search_body("project=PROJ", None, None, None);
        assert_eq!(body["jql"], "project=PROJ");
        assert_eq!(body["startAt"], 0);
        assert_eq!(body["maxResults"], 50);

        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field.as_str().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec![
                "key",
                "summary",
                "status",
                "assignee",
                "priority",
                "issuetype",
                "updated"
            ]
        );
    }

    #[test]
    fn test_search_body_explicit_values() {
        let body = search_body("order by created", Some(25), Some(10), Some("key, summary"));
        assert_eq!(body["startAt"], 25);
        assert_eq!(body["maxResults"], 10);
        assert_eq!(body["fields"], serde_json::json!(["key", "summary"]));
    }
}
