//! Project tools
//!
//! Listing projects, fetching one project, and enumerating the statuses each
//! issue type can take within a project.

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{text_at, Page, ProjectSummary, UNKNOWN};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Parameters for the list_jira_projects tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListProjectsParams {
    /// Filter projects by a name/key substring (optional)
    pub query: Option<String>,

    /// Starting offset for pagination (optional, server default: 0)
    pub start_at: Option<u32>,

    /// Maximum projects to return (optional, server default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the list_jira_projects tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectsResult {
    /// Total number of matching projects
    pub total: u64,

    /// Starting offset of this page
    pub start_at: u64,

    /// Page size used by the server
    pub max_results: u64,

    /// Projects in this page
    pub projects: Vec<ProjectSummary>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for ListProjectsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} projects (showing {}-{} of {})",
            self.projects.len(),
            self.start_at,
            self.start_at + self.projects.len() as u64,
            self.total
        )?;
        for project in &self.projects {
            writeln!(
                f,
                "{}: {} (lead: {}, type: {})",
                project.key, project.name, project.lead, project.project_type
            )?;
        }
        Ok(())
    }
}

/// Implementation of the list_jira_projects tool
pub struct ListProjectsTool {
    client: Arc<JiraClient>,
}

impl ListProjectsTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the list_jira_projects tool
    #[instrument(skip(self))]
    pub async fn execute(&self, params: ListProjectsParams) -> JiraReaderResult<ListProjectsResult> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(text) = params.query {
            query.push(("query", text));
        }
        if let Some(start_at) = params.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("maxResults", max_results.to_string()));
        }

        let raw = self.client.get("/rest/api/3/project/search", &query).await?;
        let page = Page::from_value(&raw);

        let projects: Vec<ProjectSummary> = raw
            .pointer("/values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(ProjectSummary::from_value).collect())
            .unwrap_or_default();

        info!("Listed {} projects of {}", projects.len(), page.total);

        Ok(ListProjectsResult {
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            projects,
            raw,
        })
    }
}

/// Parameters for the get_jira_project tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetProjectParams {
    /// Project id or key (required)
    /// Examples: "PROJ", "10001"
    #[schemars(length(min = 1))]
    pub project: String,
}

/// Result from the get_jira_project tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProjectResult {
    /// Numeric project id
    pub id: String,

    /// Project key
    pub key: String,

    /// Project name
    pub name: String,

    /// Browse URL for the project
    pub url: String,

    /// Project lead display name
    pub lead: String,

    /// Component names defined in the project
    pub components: Vec<String>,

    /// Issue type names available in the project
    pub issue_types: Vec<String>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for GetProjectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {} (lead: {})", self.key, self.name, self.lead)?;
        writeln!(f, "Components: {}", join_or_none(&self.components))?;
        writeln!(f, "Issue types: {}", join_or_none(&self.issue_types))?;
        write!(f, "{}", self.url)
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Implementation of the get_jira_project tool
pub struct GetProjectTool {
    client: Arc<JiraClient>,
}

impl GetProjectTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the get_jira_project tool
    #[instrument(skip(self), fields(project = %params.project))]
    pub async fn execute(&self, params: GetProjectParams) -> JiraReaderResult<GetProjectResult> {
        let path = format!("/rest/api/3/project/{}", params.project);
        let raw = self.client.get(&path, &[]).await?;

        let key = text_at(&raw, "/key", &params.project);
        let url = self.client.browse_url(&key);

        let components = name_list(raw.pointer("/components"));
        let issue_types = name_list(raw.pointer("/issueTypes"));

        info!("Retrieved project {}", key);

        Ok(GetProjectResult {
            id: text_at(&raw, "/id", ""),
            name: text_at(&raw, "/name", UNKNOWN),
            lead: text_at(&raw, "/lead/displayName", UNKNOWN),
            key,
            url,
            components,
            issue_types,
            raw,
        })
    }
}

/// Collect the `name` of every entry in an array-valued field
fn name_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.pointer("/name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parameters for the get_project_statuses tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GetProjectStatusesParams {
    /// Project id or key (required)
    #[schemars(length(min = 1))]
    pub project: String,
}

/// Statuses available for one issue type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeStatuses {
    /// Issue type name
    pub name: String,

    /// Status names this issue type can take
    pub statuses: Vec<String>,
}

/// Result from the get_project_statuses tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProjectStatusesResult {
    /// Project the statuses were requested for
    pub project: String,

    /// Per-issue-type status names
    pub issue_types: Vec<IssueTypeStatuses>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for GetProjectStatusesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Statuses for project {}:", self.project)?;
        for issue_type in &self.issue_types {
            writeln!(f, "{}: {}", issue_type.name, issue_type.statuses.join(", "))?;
        }
        Ok(())
    }
}

/// Implementation of the get_project_statuses tool
pub struct GetProjectStatusesTool {
    client: Arc<JiraClient>,
}

impl GetProjectStatusesTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the get_project_statuses tool
    #[instrument(skip(self), fields(project = %params.project))]
    pub async fn execute(
        &self,
        params: GetProjectStatusesParams,
    ) -> JiraReaderResult<GetProjectStatusesResult> {
        let path = format!("/rest/api/3/project/{}/statuses", params.project);
        let raw = self.client.get(&path, &[]).await?;

        // The endpoint returns a bare array of issue types
        let issue_types = raw
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| IssueTypeStatuses {
                        name: text_at(entry, "/name", UNKNOWN),
                        statuses: name_list(entry.pointer("/statuses")),
                    })
                    .collect()
            })
            .unwrap_or_default();

        info!("Retrieved statuses for project {}", params.project);

        Ok(GetProjectStatusesResult {
            project: params.project,
            issue_types,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_list() {
        let value = json!([
            {"id": "1", "name": "Backend"},
            {"id": "2", "name": "Frontend"},
            {"id": "3"}
        ]);
        assert_eq!(name_list(Some(&value)), vec!["Backend", "Frontend"]);
        assert!(name_list(None).is_empty());
    }

    #[test]
    fn test_project_display() {
        let result = GetProjectResult {
            id: "10001".into(),
            key: "PROJ".into(),
            name: "Project X".into(),
            url: "https://x.atlassian.net/browse/PROJ".into(),
            lead: "Jane Doe".into(),
            components: vec!["API".into()],
            issue_types: vec![],
            raw: json!({}),
        };

        let text = result.to_string();
        assert!(text.starts_with("PROJ: Project X"));
        assert!(text.contains("Components: API"));
        assert!(text.contains("Issue types: none"));
    }
}
