use std::time::Duration;

use thiserror::Error;

use crate::common::EnvProvider;

pub const DEFAULT_API_URL: &str = "https://www.commont.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTHOR: &str = "Anonymous";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API URL '{value}': {message}")]
    InvalidApiUrl { value: String, message: String },

    #[error("Invalid timeout '{value}': expected a whole number of seconds")]
    InvalidTimeout { value: String },

    #[error("No project given: pass --project or set COMMONT_PROJECT_ID")]
    MissingProject,
}

/// Settings shared by the library's HTTP layer and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub project_id: Option<String>,
    pub author: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            project_id: None,
            author: DEFAULT_AUTHOR.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// - `COMMONT_API_URL`: service base URL
    /// - `COMMONT_PROJECT_ID`: default project
    /// - `COMMONT_AUTHOR`, then `USER`: default author name
    /// - `COMMONT_TIMEOUT_SECS`: HTTP timeout
    pub fn from_env(env: &impl EnvProvider) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let api_url = env.get_var("COMMONT_API_URL").unwrap_or(defaults.api_url);
        let project_id = env
            .get_var("COMMONT_PROJECT_ID")
            .filter(|id| !id.trim().is_empty());
        let author = env
            .get_var("COMMONT_AUTHOR")
            .or_else(|| env.get_var("USER"))
            .unwrap_or(defaults.author);
        let timeout = match env.get_var("COMMONT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?,
            ),
            None => defaults.timeout,
        };

        Config {
            api_url,
            project_id,
            author,
            timeout,
        }
        .validated()
    }

    /// Replace the base URL when one is given explicitly.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self.validated()
    }

    /// The explicit project, else the configured one.
    pub fn project(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        explicit
            .or_else(|| self.project_id.clone())
            .ok_or(ConfigError::MissingProject)
    }

    /// The explicit author, else the configured one.
    pub fn author(&self, explicit: Option<String>) -> String {
        explicit.unwrap_or_else(|| self.author.clone())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        reqwest::Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            value: self.api_url.clone(),
            message: e.to_string(),
        })?;
        Ok(self)
    }
}
