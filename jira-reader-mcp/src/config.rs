//! Configuration management for the JIRA Reader MCP Server
//!
//! Reads the three required secrets from the process environment, optionally
//! seeding the environment from a KEY=VALUE file first. Existing environment
//! values always take precedence over seeded ones.

use crate::error::{JiraReaderError, JiraReaderResult};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

/// Environment variable holding the JIRA instance base URL
pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";

/// Environment variable holding the Atlassian account email
pub const ENV_ACCOUNT_EMAIL: &str = "JIRA_ACCOUNT_EMAIL";

/// Environment variable holding the API token paired with the account email
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Environment variable naming an optional seed file (defaults to ./.env)
pub const ENV_SEED_FILE: &str = "JIRA_ENV_FILE";

/// Immutable configuration for the JIRA Reader MCP Server
///
/// Constructed once at startup and shared by reference; never re-read or
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// JIRA instance URL, e.g. "https://yourcompany.atlassian.net"
    pub base_url: String,

    /// Atlassian account email used for HTTP Basic authentication
    pub account_email: String,

    /// API token paired with the account email
    pub api_token: String,
}

impl JiraConfig {
    /// Build a configuration from explicit values, validating them
    pub fn new(
        base_url: impl Into<String>,
        account_email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> JiraReaderResult<Self> {
        let config = Self {
            // Endpoint templates all start with '/', so a trailing slash
            // on the base URL would produce '//' in every request path
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_email: account_email.into(),
            api_token: api_token.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Optionally seeds the environment first from a KEY=VALUE file: the path
    /// in `JIRA_ENV_FILE` if set, otherwise `.env` in the working directory.
    /// A missing seed file is not an error; only missing required variables
    /// are. Seeding never overwrites variables already present.
    pub fn load() -> JiraReaderResult<Self> {
        Self::seed_environment();

        let mut missing = Vec::new();
        let base_url = Self::required_var(ENV_BASE_URL, &mut missing);
        let account_email = Self::required_var(ENV_ACCOUNT_EMAIL, &mut missing);
        let api_token = Self::required_var(ENV_API_TOKEN, &mut missing);

        if !missing.is_empty() {
            return Err(JiraReaderError::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let config = Self::new(base_url, account_email, api_token)?;
        info!("Configuration loaded for JIRA instance: {}", config.base_url);
        Ok(config)
    }

    /// Pre-populate the environment from a KEY=VALUE file, if one exists
    fn seed_environment() {
        match env::var(ENV_SEED_FILE) {
            Ok(path) => {
                if dotenv::from_path(&path).is_ok() {
                    debug!("Seeded environment from {}", path);
                } else {
                    debug!("Seed file {} not readable, skipping", path);
                }
            }
            Err(_) => {
                if dotenv::dotenv().is_ok() {
                    debug!("Seeded environment from .env");
                }
            }
        }
    }

    /// Read a required variable, recording its name if absent or empty
    fn required_var(name: &'static str, missing: &mut Vec<&'static str>) -> String {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> JiraReaderResult<()> {
        if self.base_url.is_empty() {
            return Err(JiraReaderError::config(format!(
                "JIRA base URL is required. Set the {} environment variable.",
                ENV_BASE_URL
            )));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(JiraReaderError::config(format!(
                "JIRA base URL must start with http:// or https://. Got: {}",
                self.base_url
            )));
        }

        if self.account_email.is_empty() {
            return Err(JiraReaderError::config("Account email cannot be empty"));
        }

        if self.api_token.is_empty() {
            return Err(JiraReaderError::config("API token cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clear_jira_env() {
        env::remove_var(ENV_BASE_URL);
        env::remove_var(ENV_ACCOUNT_EMAIL);
        env::remove_var(ENV_API_TOKEN);
        env::remove_var(ENV_SEED_FILE);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config =
            JiraConfig::new("https://test.atlassian.net/", "bot@example.com", "token").unwrap();
        assert_eq!(config.base_url, "https://test.atlassian.net");
    }

    #[test]
    fn test_validation_rejects_bad_scheme() {
        assert!(JiraConfig::new("not-a-url", "bot@example.com", "token").is_err());
        assert!(JiraConfig::new("ftp://x", "bot@example.com", "token").is_err());
        assert!(JiraConfig::new("https://x", "", "token").is_err());
        assert!(JiraConfig::new("https://x", "bot@example.com", "").is_err());
    }

    #[test]
    #[serial]
    fn test_load_enumerates_missing_variables() {
        clear_jira_env();
        env::set_var(ENV_BASE_URL, "https://test.atlassian.net");

        let err = JiraConfig::load().unwrap_err();
        let message = err.to_string();
        assert!(!message.contains(ENV_BASE_URL));
        assert!(message.contains(ENV_ACCOUNT_EMAIL));
        assert!(message.contains(ENV_API_TOKEN));

        clear_jira_env();
    }

    #[test]
    #[serial]
    fn test_load_treats_empty_as_missing() {
        clear_jira_env();
        env::set_var(ENV_BASE_URL, "https://test.atlassian.net");
        env::set_var(ENV_ACCOUNT_EMAIL, "  ");
        env::set_var(ENV_API_TOKEN, "token");

        let err = JiraConfig::load().unwrap_err();
        assert!(err.to_string().contains(ENV_ACCOUNT_EMAIL));

        clear_jira_env();
    }

    #[test]
    #[serial]
    fn test_seed_file_does_not_overwrite_environment() {
        clear_jira_env();

        let mut seed = tempfile::NamedTempFile::new().unwrap();
        writeln!(seed, "# comment line").unwrap();
        writeln!(seed).unwrap();
        writeln!(seed, "{}=https://seeded.atlassian.net", ENV_BASE_URL).unwrap();
        writeln!(seed, "{}=seeded@example.com", ENV_ACCOUNT_EMAIL).unwrap();
        writeln!(seed, "{}=seeded-token", ENV_API_TOKEN).unwrap();
        seed.flush().unwrap();

        env::set_var(ENV_SEED_FILE, seed.path());
        // Pre-existing value must win over the seeded one
        env::set_var(ENV_ACCOUNT_EMAIL, "real@example.com");

        let config = JiraConfig::load().unwrap();
        assert_eq!(config.base_url, "https://seeded.atlassian.net");
        assert_eq!(config.account_email, "real@example.com");
        assert_eq!(config.api_token, "seeded-token");

        clear_jira_env();
    }

    #[test]
    #[serial]
    fn test_missing_seed_file_is_not_fatal() {
        clear_jira_env();
        env::set_var(ENV_SEED_FILE, "/nonexistent/path/to/.env");
        env::set_var(ENV_BASE_URL, "https://test.atlassian.net");
        env::set_var(ENV_ACCOUNT_EMAIL, "bot@example.com");
        env::set_var(ENV_API_TOKEN, "token");

        assert!(JiraConfig::load().is_ok());

        clear_jira_env();
    }
}
