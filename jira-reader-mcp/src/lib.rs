//! JIRA Reader MCP Server Library
//!
//! A read-only JIRA integration server using the Model Context Protocol
//! (MCP). Every tool is a stateless translation from a typed input payload
//! to one JIRA REST call, followed by reshaping the JSON response into a
//! human-readable summary plus a structured payload.
//!
//! ## Tools
//!
//! - **Issues**: `get_jira_issue`, `get_jira_issue_comments`
//! - **Projects**: `list_jira_projects`, `get_jira_project`,
//!   `get_project_statuses`
//! - **Search**: `search_jira_issues`, `list_project_issues`
//! - **Agile**: `list_boards`, `list_board_sprints`, `list_sprint_issues`

use crate::config::JiraConfig;
use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::tools::{
    GetIssueCommentsParams, GetIssueCommentsResult, GetIssueCommentsTool, GetJiraIssueParams,
    GetJiraIssueResult, GetJiraIssueTool, GetProjectParams, GetProjectResult,
    GetProjectStatusesParams, GetProjectStatusesResult, GetProjectStatusesTool, GetProjectTool,
    ListBoardSprintsParams, ListBoardSprintsResult, ListBoardSprintsTool, ListBoardsParams,
    ListBoardsResult, ListBoardsTool, ListProjectIssuesParams, ListProjectIssuesResult,
    ListProjectIssuesTool, ListProjectsParams, ListProjectsResult, ListProjectsTool,
    ListSprintIssuesParams, ListSprintIssuesResult, ListSprintIssuesTool, SearchIssuesParams,
    SearchIssuesResult, SearchIssuesTool,
};

use pulseengine_mcp_macros::{mcp_server, mcp_tools};
use std::sync::Arc;
use tracing::{error, info, instrument};

// Re-export modules for external use
pub mod config;
pub mod error;
pub mod jira_client;
pub mod projections;
pub mod tools;

/// JIRA Reader MCP Server
///
/// Main server implementation exposing read-only JIRA tools. Uses the
/// #[mcp_server] macro for automatic MCP infrastructure generation.
#[mcp_server(
    name = "JIRA Reader MCP Server",
    version = "0.1.0",
    description = "Read-only JIRA integration server for issue, project, board, and sprint lookups",
    auth = "disabled"
)]
#[derive(Clone)]
pub struct JiraReaderServer {
    /// Configuration, immutable for the process lifetime
    config: Arc<JiraConfig>,

    /// Tool implementations
    issue_tool: Arc<GetJiraIssueTool>,
    issue_comments_tool: Arc<GetIssueCommentsTool>,
    list_projects_tool: Arc<ListProjectsTool>,
    get_project_tool: Arc<GetProjectTool>,
    project_statuses_tool: Arc<GetProjectStatusesTool>,
    search_tool: Arc<SearchIssuesTool>,
    project_issues_tool: Arc<ListProjectIssuesTool>,
    boards_tool: Arc<ListBoardsTool>,
    sprints_tool: Arc<ListBoardSprintsTool>,
    sprint_issues_tool: Arc<ListSprintIssuesTool>,
}

impl Default for JiraReaderServer {
    fn default() -> Self {
        // The macro requires Default; the server only makes sense with a
        // loaded configuration
        panic!(
            "JiraReaderServer cannot be created with default(). Use JiraReaderServer::new() instead."
        )
    }
}

impl JiraReaderServer {
    /// Create a new JIRA Reader MCP Server from the process environment
    #[instrument]
    pub fn new() -> JiraReaderResult<Self> {
        info!("Initializing JIRA Reader MCP Server");

        let config = JiraConfig::load()?;
        Self::with_config(config)
    }

    /// Create a server with an explicit configuration (used by tests)
    #[instrument(skip(config))]
    pub fn with_config(config: JiraConfig) -> JiraReaderResult<Self> {
        let config = Arc::new(config);
        let client = Arc::new(JiraClient::new(Arc::clone(&config))?);

        info!("JIRA client ready for {}", config.base_url);

        Ok(Self {
            config,
            issue_tool: Arc::new(GetJiraIssueTool::new(Arc::clone(&client))),
            issue_comments_tool: Arc::new(GetIssueCommentsTool::new(Arc::clone(&client))),
            list_projects_tool: Arc::new(ListProjectsTool::new(Arc::clone(&client))),
            get_project_tool: Arc::new(GetProjectTool::new(Arc::clone(&client))),
            project_statuses_tool: Arc::new(GetProjectStatusesTool::new(Arc::clone(&client))),
            search_tool: Arc::new(SearchIssuesTool::new(Arc::clone(&client))),
            project_issues_tool: Arc::new(ListProjectIssuesTool::new(Arc::clone(&client))),
            boards_tool: Arc::new(ListBoardsTool::new(Arc::clone(&client))),
            sprints_tool: Arc::new(ListBoardSprintsTool::new(Arc::clone(&client))),
            sprint_issues_tool: Arc::new(ListSprintIssuesTool::new(client)),
        })
    }

    /// The JIRA base URL this server is bound to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

/// All public methods in this impl block become MCP tools automatically
#[mcp_tools]
impl JiraReaderServer {
    /// Get a JIRA issue by key
    ///
    /// Returns a flat summary (status, assignee, reporter, priority, type,
    /// timestamps, browse URL) with the description markup stripped, plus the
    /// raw JIRA response.
    #[instrument(skip(self))]
    pub async fn get_jira_issue(
        &self,
        params: GetJiraIssueParams,
    ) -> anyhow::Result<GetJiraIssueResult> {
        self.issue_tool.execute(params).await.map_err(|e| {
            error!("get_jira_issue failed: {}", e);
            anyhow::anyhow!("get_jira_issue: {}", e)
        })
    }

    /// Get the comments of a JIRA issue
    ///
    /// One page of comments with author, timestamps, and body text;
    /// rich-text bodies are stringified, not parsed.
    #[instrument(skip(self))]
    pub async fn get_jira_issue_comments(
        &self,
        params: GetIssueCommentsParams,
    ) -> anyhow::Result<GetIssueCommentsResult> {
        self.issue_comments_tool.execute(params).await.map_err(|e| {
            error!("get_jira_issue_comments failed: {}", e);
            anyhow::anyhow!("get_jira_issue_comments: {}", e)
        })
    }

    /// List JIRA projects visible to the configured account
    ///
    /// One page of projects with key, name, lead, and project type. An
    /// optional query filters by name or key substring.
    #[instrument(skip(self))]
    pub async fn list_jira_projects(
        &self,
        params: ListProjectsParams,
    ) -> anyhow::Result<ListProjectsResult> {
        self.list_projects_tool.execute(params).await.map_err(|e| {
            error!("list_jira_projects failed: {}", e);
            anyhow::anyhow!("list_jira_projects: {}", e)
        })
    }

    /// Get a JIRA project by id or key
    ///
    /// Returns the project lead, component names, issue type names, and the
    /// browse URL.
    #[instrument(skip(self))]
    pub async fn get_jira_project(
        &self,
        params: GetProjectParams,
    ) -> anyhow::Result<GetProjectResult> {
        self.get_project_tool.execute(params).await.map_err(|e| {
            error!("get_jira_project failed: {}", e);
            anyhow::anyhow!("get_jira_project: {}", e)
        })
    }

    /// Get the statuses available per issue type in a project
    #[instrument(skip(self))]
    pub async fn get_project_statuses(
        &self,
        params: GetProjectStatusesParams,
    ) -> anyhow::Result<GetProjectStatusesResult> {
        self.project_statuses_tool.execute(params).await.map_err(|e| {
            error!("get_project_statuses failed: {}", e);
            anyhow::anyhow!("get_project_statuses: {}", e)
        })
    }

    /// Search JIRA issues with a JQL query
    ///
    /// The query is passed through verbatim. Pagination defaults to the
    /// first 50 matches; the requested field list is configurable.
    #[instrument(skip(self))]
    pub async fn search_jira_issues(
        &self,
        params: SearchIssuesParams,
    ) -> anyhow::Result<SearchIssuesResult> {
        self.search_tool.execute(params).await.map_err(|e| {
            error!("search_jira_issues failed: {}", e);
            anyhow::anyhow!("search_jira_issues: {}", e)
        })
    }

    /// List the issues of one project
    ///
    /// Runs a search scoped to the project key, optionally extended with a
    /// caller-supplied JQL tail (e.g. `AND status = "Done"`).
    #[instrument(skip(self))]
    pub async fn list_project_issues(
        &self,
        params: ListProjectIssuesParams,
    ) -> anyhow::Result<ListProjectIssuesResult> {
        self.project_issues_tool.execute(params).await.map_err(|e| {
            error!("list_project_issues failed: {}", e);
            anyhow::anyhow!("list_project_issues: {}", e)
        })
    }

    /// List Agile boards
    ///
    /// One page of boards, optionally filtered by type ("scrum", "kanban",
    /// "simple") or name substring.
    #[instrument(skip(self))]
    pub async fn list_boards(&self, params: ListBoardsParams) -> anyhow::Result<ListBoardsResult> {
        self.boards_tool.execute(params).await.map_err(|e| {
            error!("list_boards failed: {}", e);
            anyhow::anyhow!("list_boards: {}", e)
        })
    }

    /// List the sprints of a board
    ///
    /// One page of sprints, optionally filtered by state ("future",
    /// "active", "closed").
    #[instrument(skip(self))]
    pub async fn list_board_sprints(
        &self,
        params: ListBoardSprintsParams,
    ) -> anyhow::Result<ListBoardSprintsResult> {
        self.sprints_tool.execute(params).await.map_err(|e| {
            error!("list_board_sprints failed: {}", e);
            anyhow::anyhow!("list_board_sprints: {}", e)
        })
    }

    /// List the issues in a sprint
    #[instrument(skip(self))]
    pub async fn list_sprint_issues(
        &self,
        params: ListSprintIssuesParams,
    ) -> anyhow::Result<ListSprintIssuesResult> {
        self.sprint_issues_tool.execute(params).await.map_err(|e| {
            error!("list_sprint_issues failed: {}", e);
            anyhow::anyhow!("list_sprint_issues: {}", e)
        })
    }
}
