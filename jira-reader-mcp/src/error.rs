//! Error types and handling for the JIRA Reader MCP Server
//!
//! Provides structured error types that map to MCP JSON-RPC error codes
//! and converts errors from dependencies into MCP-compatible errors.

use serde_json::Value;
use thiserror::Error;

/// Custom error types for the JIRA Reader MCP Server
#[derive(Debug, Error)]
pub enum JiraReaderError {
    /// Configuration errors (-32001)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network errors (-32003)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx responses from the JIRA REST API
    #[error("JIRA returned HTTP {status} {status_text}: {body}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Response body could not be parsed as JSON
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Internal server errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl JiraReaderError {
    /// Get the MCP JSON-RPC error code for this error
    pub fn error_code(&self) -> i32 {
        match self {
            JiraReaderError::Configuration { .. } => -32001,
            JiraReaderError::Network { .. } => -32003,
            // Statuses the host is likely to branch on keep their own codes
            JiraReaderError::Upstream { status, .. } => match status {
                401 => -32002,
                403 => -32004,
                404 => -32005,
                429 => -32007,
                _ => -32008,
            },
            JiraReaderError::Parse { .. } => -32603,
            JiraReaderError::Internal { .. } => -32603,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            JiraReaderError::Configuration { .. } => "configuration",
            JiraReaderError::Network { .. } => "network",
            JiraReaderError::Upstream { .. } => "upstream",
            JiraReaderError::Parse { .. } => "parse",
            JiraReaderError::Internal { .. } => "internal",
        }
    }

    /// Get additional error data for MCP error responses
    pub fn error_data(&self) -> Option<Value> {
        let mut data = serde_json::Map::new();
        data.insert(
            "category".to_string(),
            Value::String(self.category().to_string()),
        );

        match self {
            JiraReaderError::Upstream {
                status,
                status_text,
                body,
            } => {
                data.insert("status".to_string(), Value::Number((*status).into()));
                data.insert(
                    "status_text".to_string(),
                    Value::String(status_text.clone()),
                );
                data.insert("body".to_string(), Value::String(body.clone()));
                Some(Value::Object(data))
            }
            _ => Some(Value::Object(data)),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        JiraReaderError::Configuration {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        JiraReaderError::Network {
            message: message.into(),
        }
    }

    /// Create an upstream error from an HTTP status and the raw response body
    pub fn upstream(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        JiraReaderError::Upstream {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            body: body.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        JiraReaderError::Parse {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        JiraReaderError::Internal {
            message: message.into(),
        }
    }
}

/// Convert from reqwest errors to JiraReaderError
impl From<reqwest::Error> for JiraReaderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JiraReaderError::parse(format!("Failed to decode response: {}", err))
        } else if err.is_builder() {
            JiraReaderError::internal(format!("Failed to build request: {}", err))
        } else {
            JiraReaderError::network(err.to_string())
        }
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for JiraReaderError {
    fn from(err: serde_json::Error) -> Self {
        JiraReaderError::parse(format!("JSON error: {}", err))
    }
}

/// Result type alias for JIRA Reader MCP operations
pub type JiraReaderResult<T> = Result<T, JiraReaderError>;
