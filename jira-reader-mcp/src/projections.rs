//! Typed projections of JIRA REST responses
//!
//! Each tool reshapes the raw JSON from JIRA into one of these flat,
//! human-oriented structs. Field access is defensive: absent fields collapse
//! to documented fallbacks ("Unassigned", "Unknown status") instead of
//! failing the whole call.

use chrono::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Fallback shown when an issue has no assignee
pub const UNASSIGNED: &str = "Unassigned";

/// Fallback shown when a status name is absent
pub const UNKNOWN_STATUS: &str = "Unknown status";

/// Fallback for any other absent name field
pub const UNKNOWN: &str = "Unknown";

/// Pagination window echoed by every list-shaped JIRA response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub total: u64,
    pub start_at: u64,
    pub max_results: u64,
}

impl Page {
    /// Extract `total`/`startAt`/`maxResults` from a response body
    pub fn from_value(value: &Value) -> Self {
        Self {
            total: u64_at(value, "/total"),
            start_at: u64_at(value, "/startAt"),
            max_results: u64_at(value, "/maxResults"),
        }
    }
}

/// One issue row in a search, project, or sprint issue listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: String,
    pub priority: String,
    pub issue_type: String,
    pub updated: String,
    pub url: String,
}

impl IssueSummary {
    /// Project one entry of an `issues` array
    pub fn from_value(issue: &Value, url: String) -> Self {
        Self {
            key: text_at(issue, "/key", UNKNOWN),
            summary: text_at(issue, "/fields/summary", ""),
            status: text_at(issue, "/fields/status/name", UNKNOWN_STATUS),
            assignee: text_at(issue, "/fields/assignee/displayName", UNASSIGNED),
            priority: text_at(issue, "/fields/priority/name", UNKNOWN),
            issue_type: text_at(issue, "/fields/issuetype/name", UNKNOWN),
            updated: format_datetime(&text_at(issue, "/fields/updated", "")),
            url,
        }
    }
}

/// One comment on an issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: String,
    pub author: String,
    pub created: String,
    pub updated: String,
    pub body: String,
}

impl CommentSummary {
    /// Project one entry of a `comments` array
    pub fn from_value(comment: &Value) -> Self {
        Self {
            id: text_at(comment, "/id", ""),
            author: text_at(comment, "/author/displayName", UNKNOWN),
            created: format_datetime(&text_at(comment, "/created", "")),
            updated: format_datetime(&text_at(comment, "/updated", "")),
            body: comment
                .pointer("/body")
                .map(text_or_json)
                .unwrap_or_default(),
        }
    }
}

/// One project row in a project listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub key: String,
    pub name: String,
    pub lead: String,
    pub project_type: String,
}

impl ProjectSummary {
    /// Project one entry of a `values` array from /project/search
    pub fn from_value(project: &Value) -> Self {
        Self {
            id: text_at(project, "/id", ""),
            key: text_at(project, "/key", UNKNOWN),
            name: text_at(project, "/name", UNKNOWN),
            lead: text_at(project, "/lead/displayName", UNKNOWN),
            project_type: text_at(project, "/projectTypeKey", UNKNOWN),
        }
    }
}

/// One board row from the Agile API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: u64,
    pub name: String,
    pub board_type: String,
    pub location: String,
}

impl BoardSummary {
    /// Project one entry of a `values` array from /board
    pub fn from_value(board: &Value) -> Self {
        Self {
            id: u64_at(board, "/id"),
            name: text_at(board, "/name", UNKNOWN),
            board_type: text_at(board, "/type", UNKNOWN),
            location: text_at(board, "/location/displayName", ""),
        }
    }
}

/// One sprint row from the Agile API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintSummary {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub complete_date: Option<String>,
}

impl SprintSummary {
    /// Project one entry of a `values` array from /board/{id}/sprint
    pub fn from_value(sprint: &Value) -> Self {
        Self {
            id: u64_at(sprint, "/id"),
            name: text_at(sprint, "/name", UNKNOWN),
            state: text_at(sprint, "/state", UNKNOWN),
            start_date: opt_text_at(sprint, "/startDate").map(|d| format_datetime(&d)),
            end_date: opt_text_at(sprint, "/endDate").map(|d| format_datetime(&d)),
            complete_date: opt_text_at(sprint, "/completeDate").map(|d| format_datetime(&d)),
        }
    }
}

/// String at a JSON pointer, or the fallback when absent or not a string
pub fn text_at(value: &Value, pointer: &str, fallback: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// String at a JSON pointer, or None when absent or not a string
pub fn opt_text_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Unsigned integer at a JSON pointer, or 0 when absent
pub fn u64_at(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}

/// Clean an issue description field
///
/// Plain-string descriptions get their angle-bracket tag markup stripped and
/// whitespace trimmed. Rich-text documents (ADF) are not parsed, only
/// stringified. Absent descriptions collapse to an empty string.
pub fn clean_description(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => strip_tags(text),
        Some(other) => other.to_string(),
    }
}

/// A string field that may be plain text or an ADF document
pub fn text_or_json(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Remove `<...>` tag markup and trim surrounding whitespace
pub fn strip_tags(input: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
    tag.replace_all(input, "").trim().to_string()
}

/// Render a JIRA timestamp human-readably, passing it through on parse failure
///
/// JIRA emits "2024-01-05T12:34:56.000+0100" style timestamps; the browse UI
/// shows minutes precision, so that is what the summaries carry.
pub fn format_datetime(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
