//! Tools module for the JIRA Reader MCP Server
//!
//! Contains all the MCP tools that expose read-only JIRA operations.

pub mod boards;
pub mod issue_comments;
pub mod issue_details;
pub mod projects;
pub mod search_issues;
pub mod sprints;

pub use boards::*;
pub use issue_comments::*;
pub use issue_details::*;
pub use projects::*;
pub use search_issues::*;
pub use sprints::*;
