//! Error types for configuration loading and validation

pub mod format;

use std::path::PathBuf;
use thiserror::Error;

pub use format::ErrorFormatter;

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while resolving, loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is unset and has no default
    #[error("missing required env var `{var}`")]
    MissingVar { var: String },

    /// Raw environment string could not be converted by the requested caster
    #[error("Failed to cast env var `{var}` value '{value}' to {target}: {message}")]
    CastError {
        var: String,
        value: String,
        target: &'static str,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// IO error
    #[error("Failed to read configuration file: {path}\n{source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error with context
    #[error("Failed to parse YAML configuration{location}:\n{message}\n{context}")]
    YamlError {
        location: String,
        message: String,
        context: String,
    },

    /// Value out of valid range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid integer value
    #[error("{field} must be at least {min}, got {value}")]
    InvalidInteger { field: String, value: i64, min: i64 },

    /// Generic validation error
    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl ConfigError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a YAML error from serde_yaml::Error
    pub fn from_yaml_error(err: serde_yaml::Error, content: &str, path: Option<&str>) -> Self {
        let context = extract_yaml_context(&err, content);
        Self::YamlError {
            location: path.map(|p| format!(" in {}", p)).unwrap_or_default(),
            message: err.to_string(),
            context,
        }
    }

    /// Name of the variable, file or field the error is about
    pub fn subject(&self) -> String {
        match self {
            Self::MissingVar { var } | Self::CastError { var, .. } => var.clone(),
            Self::FileNotFound { path } | Self::IoError { path, .. } => {
                path.display().to_string()
            }
            Self::YamlError { location, .. } => location.trim_start_matches(" in ").to_string(),
            Self::OutOfRange { field, .. }
            | Self::InvalidInteger { field, .. }
            | Self::ValidationError { field, .. } => field.clone(),
        }
    }
}

/// Extract a few lines of context around the failing YAML line
fn extract_yaml_context(err: &serde_yaml::Error, content: &str) -> String {
    let Some(loc) = err.location() else {
        return String::new();
    };

    let line_num = loc.line();
    let lines: Vec<&str> = content.lines().collect();
    if line_num == 0 || line_num > lines.len() {
        return String::new();
    }

    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            if num == line_num {
                format!("→ {:3} | {}", num, line)
            } else {
                format!("  {:3} | {}", num, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
