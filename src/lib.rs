//! Skills Compatibility Tester
//!
//! Probes an Anthropic Messages API endpoint, official or third-party, for
//! progressively advanced capabilities: basic messages, the beta namespace,
//! skill listing, the code execution tool and the full skills workflow.

pub mod app;
pub mod checker;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use checker::{CheckOutcome, CompatibilityChecker};
pub use client::{AnthropicClient, ClientProvider, HttpClientProvider, MessagesApi};
pub use error::{AppError, Result};
pub use models::{Config, Guidance, ProbeName, ProbeResults};
pub use output::{ColoredFormatter, OutputFormatter, OutputFormatterFactory, PlainFormatter, ReportSink};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
    pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const DEFAULT_ENV_FILE: &str = ".env";
}

/// Environment variables read into the configuration
pub mod env_vars {
    pub const API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const BASE_URL: &str = "ANTHROPIC_BASE_URL";
    pub const MODEL: &str = "ANTHROPIC_MODEL";
    pub const ANTHROPIC_VERSION: &str = "ANTHROPIC_VERSION";
    pub const NO_COLOR: &str = "NO_COLOR";
}
