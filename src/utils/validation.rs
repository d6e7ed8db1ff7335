use crate::utils::error::{Result, TourError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TourError::invalid_range(
            field_name,
            value,
            format!("value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(TourError::invalid_input(
            field_name,
            value,
            format!("value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TourError::invalid_input(
            field_name,
            value,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Config checks report as configuration errors rather than request errors.
pub fn config_error(field: &str, message: impl Into<String>) -> TourError {
    TourError::ConfigValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}
