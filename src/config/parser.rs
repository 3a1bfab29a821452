//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};
use std::path::PathBuf;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

/// Parsed configuration plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// .env file that was loaded, if any
    pub env_file: Option<PathBuf>,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<LoadedConfig> {
        let env_file = EnvManager::load_env_file(self.cli.env_file.as_deref())?;

        let mut config = Config::default();
        config.merge_from_env();
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(LoadedConfig { config, env_file })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref base_url) = self.cli.base_url {
            config.base_url = base_url.clone();
        }

        if let Some(ref model) = self.cli.model {
            config.model = model.clone();
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only settings
        config.env_file = self.cli.env_file.clone();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<LoadedConfig> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Base URL: {}", config.base_url));
    summary.push(format!("Model: {}", config.model));
    summary.push(format!("anthropic-version: {}", config.anthropic_version));
    summary.push(format!(
        "API key: {}",
        config.api_key_preview().unwrap_or_else(|| "(not set)".to_string())
    ));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests here touch process-wide environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for (var, _, _) in EnvManager::get_supported_env_vars() {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("empty.env");
        std::fs::write(&env_file, "").unwrap();

        let cli = Cli::parse_from([
            "test",
            "--env-file",
            env_file.to_str().unwrap(),
            "--base-url",
            "http://127.0.0.1:9",
            "--model",
            "glm-4.6",
            "--no-color",
            "--verbose",
        ]);
        let loaded = ConfigParser::new(cli).parse().unwrap();

        assert!(loaded.env_file.is_none());
        assert_eq!(loaded.config.base_url, "http://127.0.0.1:9");
        assert_eq!(loaded.config.model, "glm-4.6");
        assert!(!loaded.config.enable_color);
        assert!(loaded.config.verbose);
        assert!(!loaded.config.debug);
    }

    #[test]
    fn test_env_file_supplies_api_key() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(
            &env_file,
            "ANTHROPIC_API_KEY=sk-ant-from-file\nANTHROPIC_MODEL=claude-sonnet-4-5\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["test", "--env-file", env_file.to_str().unwrap()]);
        let loaded = load_config(cli).unwrap();

        assert_eq!(loaded.env_file.as_deref(), Some(env_file.as_path()));
        assert_eq!(loaded.config.api_key.as_deref(), Some("sk-ant-from-file"));
        assert_eq!(loaded.config.model, "claude-sonnet-4-5");

        clear_env();
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("empty.env");
        std::fs::write(&env_file, "").unwrap();

        std::env::set_var("ANTHROPIC_MODEL", "from-env");
        let cli = Cli::parse_from([
            "test",
            "--env-file",
            env_file.to_str().unwrap(),
            "--model",
            "from-cli",
        ]);
        let loaded = load_config(cli).unwrap();
        assert_eq!(loaded.config.model, "from-cli");

        clear_env();
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("empty.env");
        std::fs::write(&env_file, "").unwrap();

        let cli = Cli::parse_from([
            "test",
            "--env-file",
            env_file.to_str().unwrap(),
            "--base-url",
            "not a url",
        ]);
        assert!(load_config(cli).is_err());
    }

    #[test]
    fn test_missing_explicit_env_file_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("typo.env");

        let cli = Cli::parse_from(["test", "--env-file", env_file.to_str().unwrap()]);
        let error = load_config(cli).unwrap_err();
        assert!(error.to_string().contains("Env file not found"));
    }

    #[test]
    fn test_config_summary() {
        let config = Config::default();
        let summary = display_config_summary(&config);

        assert!(summary.contains("Base URL: https://api.anthropic.com"));
        assert!(summary.contains("API key: (not set)"));
        assert!(summary.contains("Model:"));
    }
}
