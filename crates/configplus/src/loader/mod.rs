//! Configuration loaders
//!
//! - [`env::EnvConfig`]: attributes resolved from environment variables
//! - [`yaml::YamlConfig`]: attributes derived from a YAML document

pub mod env;
pub mod file;
pub mod formats;
pub mod yaml;

pub use env::{EnvConfig, EnvConfigBuilder, Validator};
pub use yaml::{PostInit, YamlConfig, YamlConfigBuilder};
