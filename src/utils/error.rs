use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Render,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::HttpClientError(_) => ErrorCategory::Network,
            ScrapeError::IoError(_) => ErrorCategory::Io,
            ScrapeError::RenderError { .. } => ErrorCategory::Render,
            ScrapeError::ConfigError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 抓取失敗在 fetcher 內已降級，能走到這裡的只有 client 建立失敗
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Render => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::HttpClientError(_) => {
                "Could not set up the HTTP client for scraping".to_string()
            }
            ScrapeError::IoError(e) => format!("Could not write the report: {}", e),
            ScrapeError::RenderError { message } => {
                format!("Could not build the PDF report: {}", message)
            }
            ScrapeError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ScrapeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ScrapeError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the user agent and timeout settings, then retry",
            ErrorCategory::Io => "Make sure the output directory exists and is writable",
            ErrorCategory::Render => "Re-run with --verbose and check the scraped records",
            ErrorCategory::Configuration => {
                "Fix the listed setting (URL templates need a {page} placeholder)"
            }
        }
    }

    /// Exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_critical() {
        let err = ScrapeError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("read-only"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let missing = ScrapeError::MissingConfigError {
            field: "sites".to_string(),
        };
        let invalid = ScrapeError::InvalidConfigValueError {
            field: "scraper.pages".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.exit_code(), 1);
        assert_eq!(
            invalid.to_string(),
            "Invalid value '0' for 'scraper.pages': Value must be at least 1"
        );
    }
}
