//! Environment-backed configuration definitions
//!
//! Attributes are declared in order on an [`EnvConfigBuilder`] and resolved
//! eagerly by [`EnvConfigBuilder::build`]. After that the values never touch
//! the environment again.

use crate::definition::ConfigDefinition;
use crate::env::{EnvSource, EnvVar, ProcessEnv};
use crate::error::{ConfigError, Result};
use crate::registry::{Registry, RegistryKind};
use crate::validation::Validate;
use crate::value::ConfigValue;
use camino::Utf8Path;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Validation hook run by [`EnvConfig::validate`]
pub type Validator = Arc<dyn Fn(&EnvConfig) -> Result<()> + Send + Sync>;

enum Declaration {
    Var(String, EnvVar),
    Value(String, ConfigValue),
}

/// Builder for an [`EnvConfig`]
///
/// # Example
///
/// ```no_run
/// use configplus::{env, Cast, ConfigError, EnvConfig};
///
/// let config = EnvConfig::builder("RuntimeConfig")
///     .env(env("DATABASE_HOST").default("localhost"))
///     .env(env("DATABASE_PORT").cast(Cast::Int).default(5432))
///     .env(env("DATABASE_PASSWORD"))
///     .validator(|cfg| {
///         let port = cfg.require_int("DATABASE_PORT")?;
///         configplus::validation::validate_port("DATABASE_PORT", port)
///     })
///     .build()?;
///
/// println!("{config}");
/// # Ok::<(), ConfigError>(())
/// ```
pub struct EnvConfigBuilder {
    name: String,
    declarations: Vec<Declaration>,
    source: Box<dyn EnvSource + Send + Sync>,
    validators: Vec<Validator>,
}

impl EnvConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            source: Box::new(ProcessEnv),
            validators: Vec::new(),
        }
    }

    /// Declare attribute `attr` resolved from `var`
    pub fn var(mut self, attr: impl Into<String>, var: EnvVar) -> Self {
        self.declarations.push(Declaration::Var(attr.into(), var));
        self
    }

    /// Declare an attribute named after its environment variable
    pub fn env(self, var: EnvVar) -> Self {
        let attr = var.name().to_string();
        self.var(attr, var)
    }

    /// Declare a literal attribute that does not come from the environment
    pub fn value(mut self, attr: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.declarations
            .push(Declaration::Value(attr.into(), value.into()));
        self
    }

    /// Read variables from `source` instead of the process environment
    pub fn source(mut self, source: impl EnvSource + Send + Sync + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Append a validation hook; hooks run in the order they were added
    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&EnvConfig) -> Result<()> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(f));
        self
    }

    /// Resolve every declaration in order, failing on the first error
    pub fn build(self) -> Result<EnvConfig> {
        let mut registry = Registry::new(RegistryKind::Env);

        for declaration in self.declarations {
            match declaration {
                Declaration::Var(attr, var) => {
                    let value = var.resolve_in(self.source.as_ref())?;
                    registry.set(attr, value);
                }
                Declaration::Value(attr, value) => registry.set(attr, value),
            }
        }

        debug!(config = %self.name, attributes = registry.len(), "loaded env config");

        Ok(EnvConfig {
            name: self.name,
            registry,
            validators: self.validators,
        })
    }
}

/// A configuration whose attributes were resolved from the environment
#[derive(Clone)]
pub struct EnvConfig {
    name: String,
    registry: Registry,
    validators: Vec<Validator>,
}

impl EnvConfig {
    pub fn builder(name: impl Into<String>) -> EnvConfigBuilder {
        EnvConfigBuilder::new(name)
    }

    /// Value of any declared attribute
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.registry.get(name)
    }

    /// Value of `name`, or `default` when it was never declared
    pub fn get_or(&self, name: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get(name).cloned().unwrap_or_else(|| default.into())
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Overwrite or add an attribute; later renders and validations see it
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.registry.set(name, value);
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ConfigValue::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ConfigValue::as_float)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ConfigValue::as_bool)
    }

    pub fn get_path(&self, name: &str) -> Option<&Utf8Path> {
        self.get(name).and_then(ConfigValue::as_path)
    }

    /// Integer attribute for validation hooks
    pub fn require_int(&self, name: &str) -> Result<i64> {
        self.get_int(name)
            .ok_or_else(|| ConfigError::validation(name, "expected an integer value"))
    }

    /// Numeric attribute for validation hooks
    pub fn require_float(&self, name: &str) -> Result<f64> {
        self.get_float(name)
            .ok_or_else(|| ConfigError::validation(name, "expected a numeric value"))
    }
}

impl ConfigDefinition for EnvConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Validate for EnvConfig {
    /// The base definition has no constraints of its own; every registered hook runs in turn
    fn validate(&self) -> Result<()> {
        for validator in &self.validators {
            validator(self)?;
        }
        debug!(config = %self.name, hooks = self.validators.len(), "env config valid");
        Ok(())
    }
}

impl fmt::Display for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("name", &self.name)
            .field("attributes", &self.registry.len())
            .field("validators", &self.validators.len())
            .finish()
    }
}
