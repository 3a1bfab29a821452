//! Error handling for the skills compatibility tester

use thiserror::Error;

/// Custom error types for the compatibility tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP transport errors that are not connectivity or timeouts
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Non-success response from the remote API
    #[error("API error (HTTP {status}, {kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    /// Parsing errors (URLs, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Client binding version errors
    #[error("Version error: {0}")]
    Version(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new API error from a response status and decoded error body
    pub fn api<K: Into<String>, M: Into<String>>(status: u16, kind: K, message: M) -> Self {
        Self::Api {
            status,
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new version error
    pub fn version<S: Into<String>>(message: S) -> Self {
        Self::Version(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::Api { .. } => "API",
            Self::Parse(_) => "PARSE",
            Self::Version(_) => "VERSION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get exit code for this error type.
    ///
    /// Only startup errors reach the process exit; probe failures are
    /// reported as text and the run still exits with 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) => 1,
            Self::Network(_) | Self::HttpRequest(_) | Self::Api { .. } => 2,
            Self::Timeout(_) => 3,
            Self::Version(_) => 4,
            Self::Internal(_) => 99,
        }
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server says the requested path or resource does not exist.
    ///
    /// This is how an unsupported API surface shows up over HTTP: the route is
    /// unknown (404), the method is not routed (405), or the body carries a
    /// `not_found_error`.
    pub fn is_missing_endpoint(&self) -> bool {
        match self {
            Self::Api { status, kind, .. } => {
                *status == 404 || *status == 405 || kind == "not_found_error"
            }
            _ => false,
        }
    }

    /// True when the server rejected the request because of the named parameter
    pub fn mentions_parameter(&self, parameter: &str) -> bool {
        match self {
            Self::Api { status, message, .. } => {
                matches!(*status, 400 | 422)
                    && message.to_lowercase().contains(&parameter.to_lowercase())
            }
            _ => false,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) | Self::Api { .. } => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Version(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(format!("I/O error: {}", error))
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<semver::Error> for AppError {
    fn from(error: semver::Error) -> Self {
        Self::version(format!("Invalid semantic version: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::network(error.to_string())
        } else if error.is_decode() {
            Self::parse(format!("Response decode error: {}", error))
        } else {
            Self::http_request(error.to_string())
        }
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("x").category(), "CONFIG");
        assert_eq!(AppError::network("x").category(), "NETWORK");
        assert_eq!(AppError::api(404, "not_found_error", "x").category(), "API");
        assert_eq!(AppError::version("x").category(), "VERSION");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("x").exit_code(), 1);
        assert_eq!(AppError::api(500, "api_error", "x").exit_code(), 2);
        assert_eq!(AppError::timeout("x").exit_code(), 3);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_api_error_display() {
        let error = AppError::api(400, "invalid_request_error", "container: Extra inputs are not permitted");
        assert_eq!(
            error.to_string(),
            "API error (HTTP 400, invalid_request_error): container: Extra inputs are not permitted"
        );
        assert_eq!(error.status(), Some(400));
        assert_eq!(AppError::network("down").status(), None);
    }

    #[test]
    fn test_missing_endpoint_classification() {
        assert!(AppError::api(404, "not_found_error", "Not Found").is_missing_endpoint());
        assert!(AppError::api(405, "unknown", "Method Not Allowed").is_missing_endpoint());
        assert!(AppError::api(400, "not_found_error", "no such route").is_missing_endpoint());
        assert!(!AppError::api(400, "invalid_request_error", "bad").is_missing_endpoint());
        assert!(!AppError::network("connection refused").is_missing_endpoint());
    }

    #[test]
    fn test_parameter_rejection_classification() {
        let rejected = AppError::api(400, "invalid_request_error", "Container: extra inputs are not permitted");
        assert!(rejected.mentions_parameter("container"));
        assert!(!rejected.mentions_parameter("tools"));

        let unprocessable = AppError::api(422, "invalid_request_error", "unknown field `container`");
        assert!(unprocessable.mentions_parameter("container"));

        // Server errors mentioning the parameter are not a rejection of it
        let server = AppError::api(500, "api_error", "container service unavailable");
        assert!(!server.mentions_parameter("container"));
    }

    #[test]
    fn test_format_for_console_plain() {
        let error = AppError::config("API base URL must use http or https");
        assert_eq!(
            error.format_for_console(false),
            "[CONFIG] Configuration error: API base URL must use http or https"
        );
    }

    #[test]
    fn test_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(AppError::from(json_error), AppError::Parse(_)));

        let semver_error = semver::Version::parse("not-a-version").unwrap_err();
        assert!(matches!(AppError::from(semver_error), AppError::Version(_)));

        let url_error = url::Url::parse("::nope").unwrap_err();
        assert!(matches!(AppError::from(url_error), AppError::Parse(_)));
    }
}
