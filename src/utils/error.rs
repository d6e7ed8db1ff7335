use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourError {
    #[error("Value out of range for {field}: {value} ({reason})")]
    InvalidRange {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input for {field}: {value} ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Template {template_id} already has slots on {}", format_dates(.dates))]
    Conflict {
        template_id: String,
        dates: Vec<NaiveDate>,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Slot store error: {message}")]
    StoreError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TourError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Conflict,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

fn format_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl TourError {
    pub fn invalid_range(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        TourError::InvalidRange {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        TourError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TourError::InvalidRange { .. } | TourError::InvalidInput { .. } => {
                ErrorCategory::Request
            }
            TourError::Conflict { .. } => ErrorCategory::Conflict,
            TourError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            TourError::StoreError { .. }
            | TourError::IoError(_)
            | TourError::SerializationError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::High,
            ErrorCategory::Conflict => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TourError::InvalidRange { field, .. } => {
                format!("Check that {} is inside the supported calendar range", field)
            }
            TourError::InvalidInput { field, .. } => format!("Correct the value of {}", field),
            TourError::Conflict { .. } => {
                "Retry with skip-existing enabled or remove the conflicting dates".to_string()
            }
            TourError::ConfigValidationError { field, .. } => {
                format!("Fix '{}' in the configuration file", field)
            }
            TourError::StoreError { .. } => "Verify the slot store is reachable".to_string(),
            TourError::IoError(_) => "Make sure the file exists and is readable".to_string(),
            TourError::SerializationError(_) => "Make sure the file contains valid JSON".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TourError::Conflict { dates, .. } => format!(
                "{} requested date(s) already have a slot: {}",
                dates.len(),
                format_dates(dates)
            ),
            other => other.to_string(),
        }
    }
}
