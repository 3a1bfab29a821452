//! Main application orchestration and execution

use crate::{
    checker::{CheckOutcome, CompatibilityChecker},
    cli::Cli,
    client::HttpClientProvider,
    config::{display_config_summary, load_config},
    error::Result,
    logging::LoggerFactory,
    output::{OutputFormatterFactory, StdoutSink},
    BUILD_TIME, GIT_COMMIT, PKG_NAME, VERSION,
};
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the configuration, then run the checklist and print the report.
    ///
    /// Only configuration problems are returned as errors; probe failures are
    /// part of the outcome.
    pub async fn run(self) -> Result<CheckOutcome> {
        let loaded = load_config(self.cli.clone())?;
        let config = loaded.config;

        let factory = LoggerFactory::new(config.clone());
        let app_logger = factory.create_logger("APP");
        let check_logger = Arc::new(factory.create_logger("CHECK"));
        let http_logger = Arc::new(factory.create_logger("HTTP"));

        if config.debug {
            eprintln!("{} v{} ({} {})", PKG_NAME, VERSION, GIT_COMMIT, BUILD_TIME);
            eprintln!("Debug mode enabled");
            eprintln!("\nConfiguration Summary:");
            eprintln!("{}", display_config_summary(&config));
            eprintln!("{}", self.cli.get_config_summary());
        }

        app_logger
            .info("Configuration loaded")
            .field("env_file", loaded.env_file.as_ref().map(|path| path.display().to_string()))
            .field("base_url", &config.base_url)
            .field("model", &config.model)
            .field("has_api_key", config.has_api_key())
            .log()
            .await;

        let provider = HttpClientProvider::new(&config, http_logger);
        let formatter = OutputFormatterFactory::create_formatter(config.enable_color);
        let mut checker = CompatibilityChecker::new(provider, config, formatter, Box::new(StdoutSink), check_logger);

        let outcome = checker.run().await;

        app_logger
            .info("Checklist finished")
            .field("halted", outcome.is_halted())
            .field("passed", outcome.results().passed_count())
            .field("total", outcome.results().total_count())
            .log()
            .await;

        Ok(outcome)
    }
}
