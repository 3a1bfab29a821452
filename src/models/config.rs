//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Main application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key sent as `x-api-key`; absence is reported by the connection probe
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the Messages API endpoint under test
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for every probe request
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,

    /// Explicit .env file location; the current directory is used otherwise
    #[serde(default)]
    pub env_file: Option<PathBuf>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            anthropic_version: default_anthropic_version(),
            env_file: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(redact_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("anthropic_version", &self.anthropic_version)
            .field("env_file", &self.env_file)
            .field("enable_color", &self.enable_color)
            .field("verbose", &self.verbose)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Key prefix safe to print: at most the first 10 characters
    pub fn api_key_preview(&self) -> Option<String> {
        self.api_key.as_deref().map(redact_key)
    }

    /// Validate the configuration and return any errors.
    ///
    /// A missing API key is not a configuration error.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::config("API base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {}", self.base_url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::config(format!(
                "API base URL must use http or https: {}",
                self.base_url
            )));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::config(format!("API base URL must have a host: {}", self.base_url)));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::config("Model name cannot be empty"));
        }

        if self.anthropic_version.trim().is_empty() {
            return Err(AppError::config("anthropic-version header value cannot be empty"));
        }

        Ok(())
    }

    /// Merge process environment variables into this configuration
    pub fn merge_from_env(&mut self) {
        self.merge_from_lookup(|key| std::env::var(key).ok());
    }

    /// Merge values from an arbitrary variable source; empty values count as unset
    pub fn merge_from_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(api_key) = get(crate::env_vars::API_KEY) {
            self.api_key = Some(api_key);
        }

        if let Some(base_url) = get(crate::env_vars::BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(model) = get(crate::env_vars::MODEL) {
            self.model = model;
        }

        if let Some(version) = get(crate::env_vars::ANTHROPIC_VERSION) {
            self.anthropic_version = version;
        }

        // https://no-color.org: any non-empty value disables color
        if get(crate::env_vars::NO_COLOR).is_some() {
            self.enable_color = false;
        }
    }
}

fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(10).collect();
    format!("{}...", prefix)
}

// Default value functions for serde
fn default_base_url() -> String {
    crate::defaults::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    crate::defaults::DEFAULT_MODEL.to_string()
}

fn default_anthropic_version() -> String {
    crate::defaults::DEFAULT_ANTHROPIC_VERSION.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
