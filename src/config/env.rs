//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load a .env file.
    ///
    /// Uses `explicit` when given, otherwise `.env` in the current directory.
    /// Only the implicit `.env` is optional; an explicit path must exist.
    /// Variables already set in the process environment are not overridden.
    /// Returns the path that was loaded, or `None` when there was no file.
    pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(AppError::config(format!("Env file not found: {}", path.display())));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(crate::defaults::DEFAULT_ENV_FILE);
                if !path.exists() {
                    return Ok(None);
                }
                path
            }
        };

        dotenv::from_path(&path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        Ok(Some(path))
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (crate::env_vars::API_KEY, "API key sent as x-api-key", "sk-ant-api03-..."),
            (crate::env_vars::BASE_URL, "Base URL of the API under test", crate::defaults::DEFAULT_BASE_URL),
            (crate::env_vars::MODEL, "Model used by every probe", crate::defaults::DEFAULT_MODEL),
            (crate::env_vars::ANTHROPIC_VERSION, "anthropic-version header", crate::defaults::DEFAULT_ANTHROPIC_VERSION),
            (crate::env_vars::NO_COLOR, "Disable colored output when set", "1"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_explicit_env_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("typo.env");

        let error = EnvManager::load_env_file(Some(&missing)).unwrap_err();
        assert!(matches!(error, AppError::Config(_)));
        assert!(error.to_string().contains("Env file not found"));
        assert!(error.to_string().contains("typo.env"));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_empty_explicit_env_file_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.env");
        std::fs::write(&path, "").unwrap();

        let loaded = EnvManager::load_env_file(Some(&path)).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_explicit_env_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("probe.env");
        std::fs::write(&path, "SKILLS_COMPAT_ENV_TEST_VALUE=from-file\n").unwrap();

        let loaded = EnvManager::load_env_file(Some(&path)).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(std::env::var("SKILLS_COMPAT_ENV_TEST_VALUE").unwrap(), "from-file");
    }

    #[test]
    fn test_env_file_does_not_override_process_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("override.env");
        std::fs::write(&path, "SKILLS_COMPAT_ENV_TEST_KEEP=from-file\n").unwrap();

        std::env::set_var("SKILLS_COMPAT_ENV_TEST_KEEP", "from-process");
        EnvManager::load_env_file(Some(&path)).unwrap();
        assert_eq!(std::env::var("SKILLS_COMPAT_ENV_TEST_KEEP").unwrap(), "from-process");
        std::env::remove_var("SKILLS_COMPAT_ENV_TEST_KEEP");
    }

    #[test]
    fn test_get_supported_env_vars() {
        let vars = EnvManager::get_supported_env_vars();

        assert_eq!(vars.len(), 5);
        assert!(vars.iter().any(|(name, _, _)| *name == "ANTHROPIC_API_KEY"));
        assert!(vars.iter().any(|(name, _, _)| *name == "ANTHROPIC_BASE_URL"));
        assert!(vars.iter().any(|(name, _, _)| *name == "ANTHROPIC_MODEL"));
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();

        assert!(help.contains("Supported Environment Variables:"));
        assert!(help.contains("ANTHROPIC_API_KEY"));
        assert!(help.contains("Configuration Priority"));
        assert!(help.contains("Command-line arguments"));
    }
}
