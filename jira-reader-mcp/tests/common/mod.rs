//! Common utilities for JIRA Reader MCP integration tests
//!
//! Every test runs against a wiremock server standing in for JIRA; no real
//! instance is contacted.

use jira_reader_mcp::config::JiraConfig;
use jira_reader_mcp::jira_client::JiraClient;
use std::sync::Arc;
use wiremock::MockServer;

#[allow(dead_code)]
pub const TEST_EMAIL: &str = "bot@example.com";

#[allow(dead_code)]
pub const TEST_TOKEN: &str = "secret-token";

/// Start a mock JIRA instance and a client pointed at it
#[allow(dead_code)]
pub async fn mock_jira() -> (MockServer, Arc<JiraClient>) {
    let server = MockServer::start().await;
    let config = Arc::new(JiraConfig::new(server.uri(), TEST_EMAIL, TEST_TOKEN).unwrap());
    let client = Arc::new(JiraClient::new(config).unwrap());
    (server, client)
}
