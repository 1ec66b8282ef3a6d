//! Integration tests for the project tools
mod common;

use common::mock_jira;
use jira_reader_mcp::tools::{
    GetProjectParams, GetProjectStatusesParams, GetProjectStatusesTool, GetProjectTool,
    ListProjectsParams, ListProjectsTool,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_projects() {
    let (server, client) = mock_jira().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/search"))
        .and(query_param_is_missing("query"))
        .and(query_param_is_missing("startAt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 2,
            "values": [
                {
                    "id": "10001",
                    "key": "PROJ",
                    "name": "Project X",
                    "lead": {"displayName": "Jane Doe"},
                    "projectTypeKey": "software"
                },
                {
                    "id": "10002",
                    "key": "OPS",
                    "name": "Operations"
                }
            ]
        })))
        .mount(&server)
        .await;

    let tool = ListProjectsTool::new(client);
    let result = tool
        .execute(ListProjectsParams {
            query: None,
            start_at: None,
            max_results: None,
        })
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.projects.len(), 2);
    assert_eq!(result.projects[0].key, "PROJ");
    assert_eq!(result.projects[0].lead, "Jane Doe");
    assert_eq!(result.projects[0].project_type, "software");
    // Defensive defaults when fields are absent
    assert_eq!(result.projects[1].lead, "Unknown");
}

#[tokio::test]
async fn test_list_projects_query_passthrough() {
    let (server, client) = mock_jira().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/search"))
        .and(query_param("query", "ops"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0,
            "maxResults": 5,
            "total": 0,
            "values": []
        })))
        .mount(&server)
        .await;

    let tool = ListProjectsTool::new(client);
    let result = tool
        .execute(ListProjectsParams {
            query: Some("ops".to_string()),
            start_at: None,
            max_results: Some(5),
        })
        .await
        .unwrap();

    assert_eq!(result.max_results, 5);
    assert!(result.projects.is_empty());
}

#[tokio::test]
async fn test_get_project() {
    let (server, client) = mock_jira().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/PROJ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10001",
            "key": "PROJ",
            "name": "Project X",
            "lead": {"displayName": "Jane Doe"},
            "components": [
                {"id": "1", "name": "API"},
                {"id": "2", "name": "Web"}
            ],
            "issueTypes": [
                {"id": "3", "name": "Bug"},
                {"id": "4", "name": "Task"}
            ]
        })))
        .mount(&server)
        .await;

    let tool = GetProjectTool::new(client);
    let result = tool
        .execute(GetProjectParams {
            project: "PROJ".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.id, "10001");
    assert_eq!(result.key, "PROJ");
    assert_eq!(result.name, "Project X");
    assert_eq!(result.lead, "Jane Doe");
    assert_eq!(result.components, vec!["API", "Web"]);
    assert_eq!(result.issue_types, vec!["Bug", "Task"]);
    assert_eq!(result.url, format!("{}/browse/PROJ", server.uri()));
}

#[tokio::test]
async fn test_get_project_statuses() {
    let (server, client) = mock_jira().await;

    // This endpoint returns a bare array, not an object
    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/PROJ/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Bug",
                "statuses": [
                    {"name": "To Do"},
                    {"name": "In Progress"},
                    {"name": "Done"}
                ]
            },
            {
                "name": "Epic",
                "statuses": [{"name": "Open"}]
            }
        ])))
        .mount(&server)
        .await;

    let tool = GetProjectStatusesTool::new(client);
    let result = tool
        .execute(GetProjectStatusesParams {
            project: "PROJ".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.project, "PROJ");
    assert_eq!(result.issue_types.len(), 2);
    assert_eq!(result.issue_types[0].name, "Bug");
    assert_eq!(
        result.issue_types[0].statuses,
        vec!["To Do", "In Progress", "Done"]
    );
    assert_eq!(result.issue_types[1].statuses, vec!["Open"]);
}
