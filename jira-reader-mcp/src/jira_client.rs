//! JIRA REST client
//!
//! Thin wrapper around reqwest that installs the standard JIRA headers and
//! performs exactly one HTTP request per call. Non-2xx responses surface as
//! errors carrying the status code, status text, and raw body; no retries.

use crate::config::JiraConfig;
use crate::error::{JiraReaderError, JiraReaderResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// JIRA REST client shared by every tool
///
/// Stateless apart from the immutable configuration; cloning is cheap and
/// concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    config: Arc<JiraConfig>,
}

/// Build the Basic authorization header value from the account credentials
///
/// Pure function of the configuration; the encoded credential never changes
/// for the process lifetime, so it is computed once and installed as a
/// default header.
pub fn basic_auth_value(config: &JiraConfig) -> String {
    let credential = format!("{}:{}", config.account_email, config.api_token);
    format!("Basic {}", BASE64.encode(credential))
}

impl JiraClient {
    /// Create a new JIRA client with the given configuration
    ///
    /// No connection is attempted here; the first tool invocation issues the
    /// first request.
    pub fn new(config: Arc<JiraConfig>) -> JiraReaderResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&basic_auth_value(&config)).map_err(|e| {
            JiraReaderError::config(format!("Credentials contain invalid header bytes: {}", e))
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| JiraReaderError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Issue a GET request to a JIRA REST path
    ///
    /// Query parameters are appended only when supplied; absent optional
    /// arguments never appear in the query string, leaving defaults to the
    /// server.
    #[instrument(skip(self))]
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> JiraReaderResult<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {} ({} query params)", url, query.len());

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        Self::read_json(response).await
    }

    /// Issue a POST request with a JSON body to a JIRA REST path
    #[instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: &Value) -> JiraReaderResult<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        Self::read_json(response).await
    }

    /// Check the status and parse the body, or surface the failure verbatim
    async fn read_json(response: reqwest::Response) -> JiraReaderResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JiraReaderError::upstream(status, body));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| JiraReaderError::parse(format!("Invalid JSON from JIRA: {}", e)))?;
        Ok(value)
    }

    /// Browse URL for an issue or project key
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.config.base_url, key)
    }

    /// The configured JIRA base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
