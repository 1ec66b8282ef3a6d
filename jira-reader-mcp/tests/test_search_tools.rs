//! Integration tests for search_jira_issues and list_project_issues
mod common;

use common::mock_jira;
use jira_reader_mcp::error::JiraReaderError;
use jira_reader_mcp::tools::{
    ListProjectIssuesParams, ListProjectIssuesTool, SearchIssuesParams, SearchIssuesTool,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn search_response() -> serde_json::Value {
    json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 1,
        "issues": [
            {
                "key": "PROJ-1",
                "fields": {
                    "summary": "Fix the login flow",
                    "status": {"name": "In Progress"},
                    "assignee": {"displayName": "Jane Doe"},
                    "priority": {"name": "High"},
                    "issuetype": {"name": "Bug"},
                    "updated": "2024-01-05T12:00:00.000+0000"
                }
            }
        ]
    })
}

#[tokio::test]
async fn test_search_applies_body_defaults() {
    let (server, client) = mock_jira().await;

    // Pagination and field defaults live in the POST body, never the query
    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .and(body_json(json!({
            "jql": "assignee = currentUser()",
            "startAt": 0,
            "maxResults": 50,
            "fields": ["key", "summary", "status", "assignee", "priority", "issuetype", "updated"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .mount(&server)
        .await;

    let tool = SearchIssuesTool::new(client);
    let result = tool
        .execute(SearchIssuesParams {
            jql: "assignee = currentUser()".to_string(),
            start_at: None,
            max_results: None,
            fields: None,
        })
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].key, "PROJ-1");
    assert_eq!(result.issues[0].status, "In Progress");
    assert_eq!(result.issues[0].url, format!("{}/browse/PROJ-1", server.uri()));
}

#[tokio::test]
async fn test_search_passes_explicit_values_through() {
    let (server, client) = mock_jira().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .and(body_json(json!({
            "jql": "order by created",
            "startAt": 25,
            "maxResults": 10,
            "fields": ["key", "summary"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 25,
            "maxResults": 10,
            "total": 0,
            "issues": []
        })))
        .mount(&server)
        .await;

    let tool = SearchIssuesTool::new(client);
    let result = tool
        .execute(SearchIssuesParams {
            jql: "order by created".to_string(),
            start_at: Some(25),
            max_results: Some(10),
            fields: Some("key, summary".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(result.start_at, 25);
    assert!(result.issues.is_empty());
}

#[tokio::test]
async fn test_project_issues_jql_without_tail() {
    let (server, client) = mock_jira().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .and(body_json(json!({
            "jql": "project=PROJ",
            "startAt": 0,
            "maxResults": 50,
            "fields": ["key", "summary", "status", "assignee", "priority", "issuetype", "updated"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .mount(&server)
        .await;

    let tool = ListProjectIssuesTool::new(client);
    let result = tool
        .execute(ListProjectIssuesParams {
            project_key: "PROJ".to_string(),
            jql_tail: None,
            start_at: None,
            max_results: None,
        })
        .await
        .unwrap();

    assert_eq!(result.project_key, "PROJ");
    assert_eq!(result.jql, "project=PROJ");
    assert_eq!(result.issues.len(), 1);
}

#[tokio::test]
async fn test_project_issues_jql_with_tail() {
    let (server, client) = mock_jira().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .and(body_json(json!({
            "jql": "project=PROJ AND status=\"Done\"",
            "startAt": 0,
            "maxResults": 50,
            "fields": ["key", "summary", "status", "assignee", "priority", "issuetype", "updated"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 0,
            "issues": []
        })))
        .mount(&server)
        .await;

    let tool = ListProjectIssuesTool::new(client);
    let result = tool
        .execute(ListProjectIssuesParams {
            project_key: "PROJ".to_string(),
            jql_tail: Some("AND status=\"Done\"".to_string()),
            start_at: None,
            max_results: None,
        })
        .await
        .unwrap();

    assert_eq!(result.jql, "project=PROJ AND status=\"Done\"");
}

#[tokio::test]
async fn test_search_server_error_surfaces_body() {
    let (server, client) = mock_jira().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/search"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"errorMessages":["Field 'bogus' does not exist"]}"#),
        )
        .mount(&server)
        .await;

    let tool = SearchIssuesTool::new(client);
    let err = tool
        .execute(SearchIssuesParams {
            jql: "bogus = 1".to_string(),
            start_at: None,
            max_results: None,
            fields: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, JiraReaderError::Upstream { status: 400, .. }));
    assert!(err.to_string().contains("Field 'bogus' does not exist"));
}
