use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Expected HTTP {expected}, got {actual} (body: {body})")]
    UnexpectedStatusError {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    #[error("Assertion failed: {message}")]
    AssertionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Filesystem,
    Network,
    Authentication,
    Assertion,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FoodyError {
    pub fn assertion(message: impl Into<String>) -> Self {
        FoodyError::AssertionError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FoodyError::HttpError(_) => ErrorCategory::Network,
            FoodyError::IoError(_) => ErrorCategory::Filesystem,
            FoodyError::SerializationError(_) => ErrorCategory::Data,
            FoodyError::ConfigError { .. }
            | FoodyError::MissingConfigError { .. }
            | FoodyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FoodyError::AuthenticationError { .. } => ErrorCategory::Authentication,
            FoodyError::UnexpectedStatusError { .. } | FoodyError::AssertionError { .. } => {
                ErrorCategory::Assertion
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Assertion | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Filesystem => ErrorSeverity::Medium,
            ErrorCategory::Network | ErrorCategory::Authentication => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FoodyError::HttpError(e) if e.is_timeout() => {
                "The Food API did not answer in time".to_string()
            }
            FoodyError::HttpError(e) if e.is_connect() => {
                "Could not connect to the Food API".to_string()
            }
            FoodyError::AuthenticationError { message } => {
                format!("Login was rejected: {}", message)
            }
            FoodyError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }

    /// 程式結束碼：1 檢查失敗，2 設定或檔案問題，3 網路或登入問題
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the --config file and command line flags (base URL, username, password)"
            }
            ErrorCategory::Filesystem => {
                "Check that the --config file is readable and the --report directory is writable"
            }
            ErrorCategory::Network => "Verify the base URL and that the service is reachable",
            ErrorCategory::Authentication => {
                "Verify the username and password against the Food API user store"
            }
            ErrorCategory::Assertion => {
                "Inspect the failing check in the report; the service behaviour changed"
            }
            ErrorCategory::Data => "The service returned a payload that is not valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, FoodyError>;
