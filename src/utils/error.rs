use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecuritelError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid IMEI '{input}': {reason}")]
    InvalidImei { input: String, reason: String },

    #[error("Unexpected response from verification service (HTTP {status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Protocol,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SecuritelError {
    pub fn invalid_imei(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidImei {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::System,
            Self::SerializationError(_) | Self::UnexpectedResponse { .. } => {
                ErrorCategory::Protocol
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidImei { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidImei { .. } => ErrorSeverity::Low,
            // the backend may come back; worth a retry
            Self::ApiError(_) => ErrorSeverity::Medium,
            Self::UnexpectedResponse { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::UnexpectedResponse { .. }
            | Self::SerializationError(_)
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "The verification service did not answer in time".to_string()
            }
            Self::ApiError(_) => "Could not reach the verification service".to_string(),
            Self::IoError(e) => format!("A file could not be read or written: {}", e),
            Self::SerializationError(_) => {
                "The verification service sent a reply that could not be read".to_string()
            }
            Self::ConfigValidationError { field, message } => {
                format!("Setting '{}' is not valid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is not valid: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Setting '{}' is required", field),
            Self::InvalidImei { reason, .. } => format!("The IMEI is not valid: {}", reason),
            Self::UnexpectedResponse { status, .. } => {
                format!("The verification service failed (HTTP {})", status)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the API endpoint and your network connection, then try again"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and command-line flags"
            }
            ErrorCategory::Input => "Enter exactly 15 digits, as printed on the device or by dialing *#06#",
            ErrorCategory::Protocol => {
                "Make sure the API endpoint points at a SecuriTel backend"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SecuritelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_imei_is_low_severity_input_error() {
        let err = SecuritelError::invalid_imei("123", "expected 15 digits, got 3");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("'123'"));
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = SecuritelError::UnexpectedResponse {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_retryable());

        let err = SecuritelError::UnexpectedResponse {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let missing_file = SecuritelError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        assert_eq!(missing_file.severity(), ErrorSeverity::Critical);
        assert_eq!(missing_file.exit_code(), 3);

        let outage = SecuritelError::UnexpectedResponse {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(outage.exit_code(), 2);

        assert_eq!(SecuritelError::invalid_imei("1", "too short").exit_code(), 1);
        assert_eq!(
            SecuritelError::MissingConfigError {
                field: "api.endpoint".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = SecuritelError::MissingConfigError {
            field: "api.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.user_friendly_message(), "Setting 'api.endpoint' is required");
    }
}
