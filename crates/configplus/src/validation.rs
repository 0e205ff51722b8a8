//! Validation trait and helpers for configuration hooks

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values
///
/// Validation either succeeds silently or fails with a `ConfigError` naming
/// the offending field.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Helper function to validate value is within an inclusive range
pub fn validate_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Helper function to validate an integer is at least `min`
pub fn validate_min(field: impl Into<String>, value: i64, min: i64) -> Result<()> {
    if value < min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

/// Unprivileged TCP port (1024..=65535)
pub fn validate_port(field: impl Into<String>, value: i64) -> Result<()> {
    validate_range(field, value as f64, 1024.0, 65535.0)
}

/// Map `validator` derive failures onto [`ConfigError::ValidationError`]
pub(crate) fn from_validation_errors(
    scope: &str,
    errors: validator::ValidationErrors,
) -> ConfigError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", field, reasons)
        })
        .collect();
    fields.sort();

    ConfigError::ValidationError {
        field: scope.to_string(),
        message: fields.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_valid() {
        assert!(validate_range("OPENAI_TEMPERATURE", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range("OPENAI_TEMPERATURE", 2.0, 0.0, 2.0).is_ok());
    }

    #[test]
    fn test_range_invalid() {
        let err = validate_range("OPENAI_TEMPERATURE", 2.5, 0.0, 2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "OPENAI_TEMPERATURE must be between 0 and 2, got 2.5"
        );
    }

    #[test]
    fn test_min() {
        assert!(validate_min("WORKERS", 1, 1).is_ok());
        assert!(validate_min("WORKERS", 0, 1).is_err());
    }

    #[test]
    fn test_port() {
        assert!(validate_port("PORT", 8000).is_ok());
        assert!(validate_port("PORT", 80).is_err());
        assert!(validate_port("PORT", 70000).is_err());
    }
}
