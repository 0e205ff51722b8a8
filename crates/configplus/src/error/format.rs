//! Error formatting with colors and context for terminal output

use crate::error::ConfigError;
use std::fmt;
use yansi::Paint;

/// Format a configuration error for humans
pub struct ErrorFormatter {
    error: ConfigError,
    use_colors: bool,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new(error: ConfigError) -> Self {
        Self {
            error,
            use_colors: supports_color(),
        }
    }

    /// Create a formatter that never emits ANSI sequences
    pub fn plain(error: ConfigError) -> Self {
        Self {
            error,
            use_colors: false,
        }
    }

    /// Format the error with colors and context
    pub fn format(&self) -> String {
        if self.use_colors {
            self.format_colored()
        } else {
            self.format_plain()
        }
    }

    /// Borrow the wrapped error
    pub fn error(&self) -> &ConfigError {
        &self.error
    }

    fn format_colored(&self) -> String {
        match &self.error {
            ConfigError::MissingVar { var } => {
                format!(
                    "{} missing required env var {}",
                    Paint::red("✗").bold(),
                    Paint::cyan(var)
                )
            }
            ConfigError::CastError {
                var,
                value,
                target,
                message,
            } => {
                let value_str = format!("'{}'", value);
                format!(
                    "{} Cannot cast {} value {} to {}\n  {}: {}",
                    Paint::red("✗").bold(),
                    Paint::cyan(var),
                    Paint::yellow(&value_str),
                    Paint::green(target),
                    Paint::new("Reason").bold(),
                    message
                )
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                let value_str = format!("{}", value);
                format!(
                    "{} {} must be between {} and {}, got {}",
                    Paint::red("✗").bold(),
                    Paint::cyan(field),
                    Paint::green(min),
                    Paint::green(max),
                    Paint::red(&value_str)
                )
            }
            ConfigError::ValidationError { field, message } => {
                format!(
                    "{} {}: {}",
                    Paint::red("✗").bold(),
                    Paint::cyan(field),
                    message
                )
            }
            ConfigError::FileNotFound { path } => {
                let path_str = path.display().to_string();
                format!(
                    "{} Configuration file not found: {}",
                    Paint::red("✗").bold(),
                    Paint::yellow(&path_str)
                )
            }
            _ => self.format_plain(),
        }
    }

    fn format_plain(&self) -> String {
        self.error.to_string()
    }
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

impl fmt::Display for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl From<ConfigError> for ErrorFormatter {
    fn from(error: ConfigError) -> Self {
        Self::new(error)
    }
}
