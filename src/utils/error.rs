use crate::domain::model::Part;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Fetching '{locator}' returned HTTP {status}")]
    FetchStatusError { locator: String, status: u16 },

    #[error("Input '{locator}' is not valid UTF-8 text")]
    InvalidUtf8Error { locator: String },

    #[error("Unknown application: {name}")]
    UnknownApplicationError { name: String },

    #[error("Unknown day: {name}")]
    UnknownDayError { name: String },

    #[error("Application '{application}' failed to initialize: {message}")]
    ApplicationError { application: String, message: String },

    #[error("Mount of part {part} did not complete: {message}")]
    MountTaskError { part: Part, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Application,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HarnessError {
    pub fn application(application: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::ApplicationError {
            application: application.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::ConfigError { .. }
            | HarnessError::ConfigValidationError { .. }
            | HarnessError::MissingConfigError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::UnknownApplicationError { .. }
            | HarnessError::UnknownDayError { .. }
            | HarnessError::UrlError(_) => ErrorCategory::Configuration,
            HarnessError::HttpError(_) | HarnessError::FetchStatusError { .. } => {
                ErrorCategory::Network
            }
            HarnessError::IoError(_) | HarnessError::InvalidUtf8Error { .. } => {
                ErrorCategory::Input
            }
            HarnessError::ApplicationError { .. } => ErrorCategory::Application,
            HarnessError::SerializationError(_) | HarnessError::MountTaskError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Application => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarnessError::IoError(_) => "Check that the input file exists and is readable",
            HarnessError::HttpError(_) => "Check network connectivity and the input base URL",
            HarnessError::FetchStatusError { .. } => {
                "Check that the input is published at the configured URL"
            }
            HarnessError::InvalidUtf8Error { .. } => "Re-save the input file as UTF-8 text",
            HarnessError::UnknownApplicationError { .. } => {
                "Use --list-applications to see the registered applications"
            }
            HarnessError::UnknownDayError { .. } => {
                "Check the --day names against the [[days]] entries in the config"
            }
            HarnessError::ApplicationError { .. } => {
                "The solver rejected its input; check the input file for this part"
            }
            HarnessError::MountTaskError { .. } => "The solver panicked; run with --verbose",
            HarnessError::SerializationError(_) => "Report this as a bug",
            _ => "Review the configuration file and fix the reported field",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not download puzzle input: {}", self),
            ErrorCategory::Input => format!("Could not read puzzle input: {}", self),
            ErrorCategory::Application => format!("Solver failed: {}", self),
            ErrorCategory::System => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
