//! Environment variable resolution
//!
//! A variable is declared with [`env`] and resolved once:
//!
//! ```no_run
//! use configplus::{env, Cast};
//!
//! let port = env("DATABASE_PORT").cast(Cast::Int).default(5432).resolve()?;
//! let password = env("DATABASE_PASSWORD").resolve()?; // required
//! let log_file = env("LOG_FILE").cast(Cast::Path).optional().resolve()?;
//! # Ok::<(), configplus::ConfigError>(())
//! ```

pub mod cast;
pub mod source;

pub use cast::{parse_bool, Cast};
pub use source::{EnvSource, MapEnv, ProcessEnv};

use crate::{error::ConfigError, mask::mask_if_secret, value::ConfigValue, Result};
use tracing::debug;

/// Start declaring the environment variable `name`
pub fn env(name: impl Into<String>) -> EnvVar {
    EnvVar::new(name)
}

/// Declaration of a single environment variable
#[derive(Debug, Clone, PartialEq)]
pub struct EnvVar {
    name: String,
    cast: Cast,
    default: Option<ConfigValue>,
    required: bool,
}

impl EnvVar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cast: Cast::Str,
            default: None,
            required: true,
        }
    }

    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Value used when the variable is unset
    ///
    /// Typed defaults are used as-is. A string default is run through the
    /// caster, so `.cast(Cast::Int).default("8080")` yields `Int(8080)`.
    pub fn default(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Resolve to `Null` instead of failing when unset without a default
    pub fn optional(self) -> Self {
        self.required(false)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<ConfigValue> {
        self.resolve_in(&ProcessEnv)
    }

    /// Resolve against an explicit source
    pub fn resolve_in(&self, source: &dyn EnvSource) -> Result<ConfigValue> {
        let value = match source.var_os(&self.name) {
            Some(raw) => {
                let raw = raw.into_string().map_err(|raw| ConfigError::CastError {
                    var: self.name.clone(),
                    value: raw.to_string_lossy().into_owned(),
                    target: self.cast.target_name(),
                    message: "value is not valid unicode".to_string(),
                })?;
                self.cast.apply(&self.name, &raw)?
            }
            None => match &self.default {
                Some(ConfigValue::Str(raw)) if self.cast != Cast::Str => {
                    self.cast.apply(&self.name, raw)?
                }
                Some(default) => default.clone(),
                None if self.required => {
                    return Err(ConfigError::MissingVar {
                        var: self.name.clone(),
                    })
                }
                None => ConfigValue::Null,
            },
        };

        debug!(
            var = %self.name,
            cast = self.cast.target_name(),
            value = %mask_if_secret(&self.name, &value),
            "resolved env var"
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENV_LOCK;

    fn source() -> MapEnv {
        MapEnv::new()
            .with("TEST_STRING", "hello")
            .with("TEST_INT", "42")
            .with("TEST_BOOL_TRUE", "true")
            .with("TEST_BOOL_FALSE", "false")
            .with("TEST_PATH", "/tmp/test")
    }

    #[test]
    fn test_string_passthrough() {
        let value = env("TEST_STRING").resolve_in(&source()).unwrap();
        assert_eq!(value, ConfigValue::from("hello"));
    }

    #[test]
    fn test_typed_casts() {
        let src = source();
        assert_eq!(
            env("TEST_INT").cast(Cast::Int).resolve_in(&src).unwrap(),
            ConfigValue::Int(42)
        );
        assert_eq!(
            env("TEST_BOOL_TRUE").cast(Cast::Bool).resolve_in(&src).unwrap(),
            ConfigValue::Bool(true)
        );
        assert_eq!(
            env("TEST_BOOL_FALSE").cast(Cast::Bool).resolve_in(&src).unwrap(),
            ConfigValue::Bool(false)
        );
        assert_eq!(
            env("TEST_PATH").cast(Cast::Path).resolve_in(&src).unwrap(),
            ConfigValue::path("/tmp/test")
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = env("MISSING_VAR")
            .default("default_value")
            .resolve_in(&MapEnv::new())
            .unwrap();
        assert_eq!(value, ConfigValue::from("default_value"));
    }

    #[test]
    fn test_typed_default_passes_through() {
        let value = env("DATABASE_PORT")
            .cast(Cast::Int)
            .default(5432)
            .resolve_in(&MapEnv::new())
            .unwrap();
        assert_eq!(value, ConfigValue::Int(5432));

        // a typed default is never re-cast, even when it disagrees with the caster
        let value = env("RATIO")
            .cast(Cast::Int)
            .default(0.5)
            .resolve_in(&MapEnv::new())
            .unwrap();
        assert_eq!(value, ConfigValue::Float(0.5));
    }

    #[test]
    fn test_string_default_is_cast() {
        let value = env("PORT")
            .cast(Cast::Int)
            .default("8080")
            .resolve_in(&MapEnv::new())
            .unwrap();
        assert_eq!(value, ConfigValue::Int(8080));

        let value = env("DATA_DIR")
            .cast(Cast::Path)
            .default("./data")
            .resolve_in(&MapEnv::new())
            .unwrap();
        assert_eq!(value, ConfigValue::path("./data"));

        assert!(env("PORT")
            .cast(Cast::Int)
            .default("eighty")
            .resolve_in(&MapEnv::new())
            .is_err());
    }

    #[test]
    fn test_env_wins_over_default() {
        let value = env("TEST_INT")
            .cast(Cast::Int)
            .default(7)
            .resolve_in(&source())
            .unwrap();
        assert_eq!(value, ConfigValue::Int(42));
    }

    #[test]
    fn test_missing_required() {
        let err = env("MISSING_REQUIRED_VAR")
            .resolve_in(&MapEnv::new())
            .unwrap_err();
        assert!(err.to_string().contains("missing required env var"));
        assert!(err.to_string().contains("MISSING_REQUIRED_VAR"));
    }

    #[test]
    fn test_optional_resolves_null() {
        let value = env("MISSING_VAR").optional().resolve_in(&MapEnv::new()).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_cast_error_propagates() {
        let src = MapEnv::new().with("WORKERS", "four");
        let err = env("WORKERS").cast(Cast::Int).resolve_in(&src).unwrap_err();
        assert!(matches!(err, ConfigError::CastError { .. }));
        assert!(err.to_string().contains("WORKERS"));
    }

    #[test]
    fn test_empty_string_is_present() {
        let src = MapEnv::new().with("FLAG", "");
        let value = env("FLAG").cast(Cast::Bool).default(true).resolve_in(&src).unwrap();
        assert_eq!(value, ConfigValue::Bool(false));
    }

    #[test]
    fn test_process_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var("CONFIGPLUS_TEST_PROCESS", "99");
        let value = env("CONFIGPLUS_TEST_PROCESS").cast(Cast::Int).resolve().unwrap();
        assert_eq!(value, ConfigValue::Int(99));
        std::env::remove_var("CONFIGPLUS_TEST_PROCESS");

        assert!(env("CONFIGPLUS_TEST_PROCESS").resolve().is_err());
    }

    #[test]
    fn test_bool_casting_variations() {
        let _lock = ENV_LOCK.lock().unwrap();
        let cases = [
            ("false", false),
            ("False", false),
            ("FALSE", false),
            ("0", false),
            ("no", false),
            ("No", false),
            ("", false),
            ("true", true),
            ("True", true),
            ("1", true),
            ("yes", true),
            ("anything", true),
        ];

        for (raw, expected) in cases {
            std::env::set_var("CONFIGPLUS_BOOL_TEST", raw);
            let value = env("CONFIGPLUS_BOOL_TEST").cast(Cast::Bool).resolve().unwrap();
            assert_eq!(value, ConfigValue::Bool(expected), "failed for {raw:?}");
        }
        std::env::remove_var("CONFIGPLUS_BOOL_TEST");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value_is_cast_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var("CONFIGPLUS_BAD_PATH", OsStr::from_bytes(b"/srv/\xff/data"));
        let result = env("CONFIGPLUS_BAD_PATH").cast(Cast::Path).resolve();
        std::env::remove_var("CONFIGPLUS_BAD_PATH");

        match result {
            Err(ConfigError::CastError { var, target, message, .. }) => {
                assert_eq!(var, "CONFIGPLUS_BAD_PATH");
                assert_eq!(target, Cast::Path.target_name());
                assert!(message.contains("unicode"));
            }
            other => panic!("expected a cast error, got {other:?}"),
        }
    }
}
