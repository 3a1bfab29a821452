//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// Skills Compatibility Tester - checks whether an API endpoint supports Claude Skills
///
/// Running without arguments executes the full checklist using ANTHROPIC_API_KEY
/// from the environment or a .env file in the current directory.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "skills-compat-tester")]
#[command(version, about, long_about = None)]
#[command(after_help = crate::config::EnvManager::display_env_help())]
pub struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Override the API base URL (default: ANTHROPIC_BASE_URL or https://api.anthropic.com)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the model used by every probe (default: ANTHROPIC_MODEL)
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command-line overrides:\n");
        if let Some(ref env_file) = self.env_file {
            summary.push_str(&format!("  Env file: {}\n", env_file.display()));
        }
        if let Some(ref base_url) = self.base_url {
            summary.push_str(&format!("  Base URL: {}\n", base_url));
        }
        if let Some(ref model) = self.model {
            summary.push_str(&format!("  Model: {}\n", model));
        }
        summary.push_str(&format!("  Colored output: {}\n", !self.no_color));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["skills-compat-tester"]);
        assert!(cli.env_file.is_none());
        assert!(cli.base_url.is_none());
        assert!(cli.model.is_none());
        assert!(!cli.no_color);
        assert!(!cli.verbose);
        assert!(!cli.debug);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "skills-compat-tester",
            "--env-file",
            "/tmp/custom.env",
            "--base-url",
            "https://open.bigmodel.cn/api/anthropic",
            "--model",
            "glm-4.6",
            "--no-color",
            "--verbose",
            "--debug",
        ]);

        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/custom.env")));
        assert_eq!(cli.base_url.as_deref(), Some("https://open.bigmodel.cn/api/anthropic"));
        assert_eq!(cli.model.as_deref(), Some("glm-4.6"));
        assert!(cli.no_color && cli.verbose && cli.debug);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["skills-compat-tester", "--count", "3"]).is_err());
    }

    #[test]
    fn test_config_summary() {
        let cli = Cli::parse_from(["skills-compat-tester", "--model", "glm-4.6"]);
        let summary = cli.get_config_summary();
        assert!(summary.contains("Model: glm-4.6"));
        assert!(summary.contains("Colored output: true"));
        assert!(!summary.contains("Base URL"));
    }
}
