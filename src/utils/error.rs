use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    ApiStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::ApiError(_) | TrackerError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            TrackerError::CsvError(_)
            | TrackerError::SerializationError(_)
            | TrackerError::ProcessingError { .. } => ErrorCategory::Data,
            TrackerError::IoError(_) => ErrorCategory::Io,
            TrackerError::ConfigError { .. }
            | TrackerError::MissingConfigError { .. }
            | TrackerError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Transient by nature; the next scheduled run may succeed.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TrackerError::ApiError(_) => {
                "Check network connectivity and that the API endpoint is reachable".to_string()
            }
            TrackerError::ApiStatusError { status, .. } => match status {
                401 | 403 => "Check GITHUB_TOKEN; the API rejected the request or rate-limited it"
                    .to_string(),
                404 => "Check the configured repository/formula name".to_string(),
                _ => "The API may be temporarily unavailable; rerun later".to_string(),
            },
            TrackerError::CsvError(_) => {
                "Inspect the history CSV file for manual edits or corruption".to_string()
            }
            TrackerError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            TrackerError::SerializationError(_) => {
                "The API response did not match the expected shape; check for API changes"
                    .to_string()
            }
            TrackerError::ConfigError { .. } | TrackerError::MissingConfigError { .. } => {
                "Review the CLI flags and config file; see --help".to_string()
            }
            TrackerError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value supplied for '{}'", field)
            }
            TrackerError::ProcessingError { .. } => {
                "The API payload was missing expected data; check for API changes".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Failed to reach a statistics API: {}", self),
            ErrorCategory::Data => format!("Failed to process API data: {}", self),
            ErrorCategory::Io => format!("Failed to read or write history files: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
