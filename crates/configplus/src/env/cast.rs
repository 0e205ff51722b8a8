//! Casting raw environment strings into typed values

use crate::{error::ConfigError, value::ConfigValue, Result};
use camino::Utf8PathBuf;

/// Tokens that read as `false`; anything else reads as `true`
const FALSY: &[&str] = &["false", "0", "no", ""];

/// Conversion applied to a raw environment string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cast {
    /// Keep the raw string
    #[default]
    Str,
    Bool,
    Int,
    Float,
    /// Wrap as a path without touching the filesystem
    Path,
}

impl Cast {
    pub fn target_name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Path => "path",
        }
    }

    /// Convert `raw`, read from variable `var`
    pub fn apply(self, var: &str, raw: &str) -> Result<ConfigValue> {
        match self {
            Self::Str => Ok(ConfigValue::Str(raw.to_string())),
            Self::Bool => Ok(ConfigValue::Bool(parse_bool(raw))),
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(ConfigValue::Int)
                .map_err(|e| self.error(var, raw, e.to_string())),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(ConfigValue::Float)
                .map_err(|e| self.error(var, raw, e.to_string())),
            Self::Path => Ok(ConfigValue::Path(Utf8PathBuf::from(raw))),
        }
    }

    fn error(self, var: &str, raw: &str, message: String) -> ConfigError {
        ConfigError::CastError {
            var: var.to_string(),
            value: raw.to_string(),
            target: self.target_name(),
            message,
        }
    }
}

/// Permissive boolean: only the explicit falsy tokens give `false`
pub fn parse_bool(value: &str) -> bool {
    let lower = value.to_lowercase();
    !FALSY.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_parsing() {
        for falsy in ["false", "False", "FALSE", "0", "no", "No", ""] {
            assert!(!parse_bool(falsy), "{falsy:?} should be false");
        }
        for truthy in ["true", "True", "1", "yes", "anything", "off"] {
            assert!(parse_bool(truthy), "{truthy:?} should be true");
        }
    }

    #[test]
    fn test_int_cast() {
        assert_eq!(Cast::Int.apply("PORT", "42").unwrap(), ConfigValue::Int(42));
        assert_eq!(Cast::Int.apply("PORT", " 8080 ").unwrap(), ConfigValue::Int(8080));
    }

    #[test]
    fn test_int_cast_error() {
        let err = Cast::Int.apply("PORT", "eighty").unwrap_err();
        match err {
            ConfigError::CastError { var, value, target, .. } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "eighty");
                assert_eq!(target, "int");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(Cast::Int.apply("PORT", "").is_err());
        assert!(Cast::Int.apply("PORT", "1.5").is_err());
    }

    #[test]
    fn test_float_cast() {
        assert_eq!(Cast::Float.apply("T", "0.7").unwrap(), ConfigValue::Float(0.7));
        assert_eq!(Cast::Float.apply("T", "2").unwrap(), ConfigValue::Float(2.0));
        assert!(Cast::Float.apply("T", "warm").is_err());
    }

    #[test]
    fn test_path_cast_does_not_require_existence() {
        let value = Cast::Path.apply("DATA_DIR", "/definitely/not/here").unwrap();
        assert_eq!(value.as_path().unwrap().as_str(), "/definitely/not/here");
    }

    #[test]
    fn test_str_cast_is_identity() {
        assert_eq!(Cast::Str.apply("X", " raw ").unwrap(), ConfigValue::from(" raw "));
    }
}
