use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Performance mark '{name}' does not exist")]
    MissingMark { name: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Diagnostics,
    Rendering,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序結束碼，任何失敗都不會回傳 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl GridError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GridError::IoError(_) => ErrorCategory::Io,
            GridError::SerializationError(_) | GridError::CsvError(_) => ErrorCategory::Data,
            GridError::TomlError(_)
            | GridError::ConfigValidationError { .. }
            | GridError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GridError::MissingMark { .. } => ErrorCategory::Diagnostics,
            GridError::RenderError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 量測失敗不影響畫面，只是少一筆紀錄
            ErrorCategory::Diagnostics => ErrorSeverity::Low,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GridError::IoError(_) => "Check that the output directory exists and is writable",
            GridError::SerializationError(_) | GridError::CsvError(_) => {
                "The report could not be encoded; try a different output format"
            }
            GridError::TomlError(_) => "Fix the TOML syntax in the configuration file",
            GridError::ConfigValidationError { .. } | GridError::InvalidConfigValueError { .. } => {
                "Review the configuration values and run again"
            }
            GridError::MissingMark { .. } => {
                "A measure was requested before its start mark; dispatch a reorder first"
            }
            GridError::RenderError { .. } => "Retry with the plain rendering strategy",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GridError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            GridError::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mark_is_low_severity() {
        let err = GridError::MissingMark {
            name: "reversePokemon-start".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Diagnostics);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("reversePokemon-start"));
        assert_ne!(err.severity().exit_code(), 0);
    }

    #[test]
    fn test_every_severity_exits_non_zero() {
        let codes: Vec<i32> = [
            ErrorSeverity::Low,
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ]
        .into_iter()
        .map(ErrorSeverity::exit_code)
        .collect();
        assert_eq!(codes, vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_toml_and_validation_errors_are_configuration() {
        let parse = toml::from_str::<toml::Table>("[data").unwrap_err();
        assert_eq!(GridError::from(parse).category(), ErrorCategory::Configuration);

        let err = GridError::ConfigValidationError {
            field: "masonry".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.recovery_suggestion(), "Review the configuration values and run again");
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = GridError::InvalidConfigValueError {
            field: "data.count".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "Configuration problem in 'data.count': Value must be at least 1"
        );
    }
}
