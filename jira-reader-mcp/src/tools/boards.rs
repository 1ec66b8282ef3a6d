//! Board listing tool (JIRA Agile API)

use crate::error::JiraReaderResult;
use crate::jira_client::JiraClient;
use crate::projections::{BoardSummary, Page};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Parameters for the list_boards tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListBoardsParams {
    /// Filter by board type (optional)
    /// Values: "scrum", "kanban", "simple"
    pub board_type: Option<String>,

    /// Filter boards whose name contains this text (optional)
    pub name: Option<String>,

    /// Starting offset for pagination (optional, server default: 0)
    pub start_at: Option<u32>,

    /// Maximum boards to return (optional, server default: 50)
    #[schemars(range(min = 1, max = 100))]
    pub max_results: Option<u32>,
}

/// Result from the list_boards tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBoardsResult {
    /// Total number of matching boards
    pub total: u64,

    /// Starting offset of this page
    pub start_at: u64,

    /// Page size used by the server
    pub max_results: u64,

    /// Boards in this page
    pub boards: Vec<BoardSummary>,

    /// Original JIRA response
    pub raw: Value,
}

// pulseengine-mcp-macros renders the text content via Display
impl std::fmt::Display for ListBoardsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} boards (showing {}-{} of {})",
            self.boards.len(),
            self.start_at,
            self.start_at + self.boards.len() as u64,
            self.total
        )?;
        for board in &self.boards {
            if board.location.is_empty() {
                writeln!(f, "#{} {} ({})", board.id, board.name, board.board_type)?;
            } else {
                writeln!(
                    f,
                    "#{} {} ({}, {})",
                    board.id, board.name, board.board_type, board.location
                )?;
            }
        }
        Ok(())
    }
}

/// Implementation of the list_boards tool
pub struct ListBoardsTool {
    client: Arc<JiraClient>,
}

impl ListBoardsTool {
    pub fn new(client: Arc<JiraClient>) -> Self {
        Self { client }
    }

    /// Execute the list_boards tool
    #[instrument(skip(self))]
    pub async fn execute(&self, params: ListBoardsParams) -> JiraReaderResult<ListBoardsResult> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(board_type) = params.board_type {
            query.push(("type", board_type));
        }
        if let Some(name) = params.name {
            query.push(("name", name));
        }
        if let Some(start_at) = params.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("maxResults", max_results.to_string()));
        }

        let raw = self.client.get("/rest/agile/1.0/board", &query).await?;
        let page = Page::from_value(&raw);

        let boards: Vec<BoardSummary> = raw
            .pointer("/values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(BoardSummary::from_value).collect())
            .unwrap_or_default();

        info!("Listed {} boards of {}", boards.len(), page.total);

        Ok(ListBoardsResult {
            total: page.total,
            start_at: page.start_at,
            max_results: page.max_results,
            boards,
            raw,
        })
    }
}
