//! Typed configuration from environment variables and YAML documents
//!
//! This crate provides two loader styles sharing one presentation layer:
//! - [`EnvConfig`]: values declared with [`env`], cast and resolved eagerly
//! - [`YamlConfig`]: a parsed YAML tree plus attributes derived by a hook
//! - Grouped, boxed summaries with name-based secret masking
//!
//! # Example
//!
//! ```no_run
//! use configplus::{env, Cast, ConfigDefinition, EnvConfig, Validate};
//!
//! let config = EnvConfig::builder("InfraConfig")
//!     .env(env("PORT").cast(Cast::Int).default(8000))
//!     .env(env("ENABLE_CORS").cast(Cast::Bool).default(true))
//!     .env(env("SECRET_JWT_KEY"))
//!     .build()?;
//!
//! config.validate()?;
//! assert!(config.has("PORT"));
//! println!("{}", config.render());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod definition;
pub mod env;
pub mod error;
pub mod loader;
pub mod mask;
pub mod registry;
pub mod render;
pub mod validation;
pub mod value;

// Re-export main types for convenience
pub use definition::ConfigDefinition;
pub use env::{env, Cast, EnvSource, EnvVar, MapEnv, ProcessEnv};
pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{EnvConfig, EnvConfigBuilder, YamlConfig, YamlConfigBuilder};
pub use mask::{is_secret, mask_if_secret, MASK};
pub use registry::{Registry, RegistryKind};
pub use value::ConfigValue;

/// Trait for config validation
pub use validation::Validate;

// Serializes tests that read or write the process environment
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
