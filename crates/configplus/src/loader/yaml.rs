//! YAML-backed configuration definitions
//!
//! The document is parsed once into a raw tree that stays private and
//! read-only. A post-init hook derives the named attributes that make up the
//! visible registry; dotted lookups always go to the raw tree.

use crate::definition::ConfigDefinition;
use crate::error::{ConfigError, Result};
use crate::loader::{file, formats};
use crate::registry::{Registry, RegistryKind};
use crate::validation::from_validation_errors;
use crate::value::ConfigValue;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Hook that derives attributes from the freshly parsed document
pub type PostInit = Arc<dyn Fn(&mut YamlConfig) -> Result<()> + Send + Sync>;

/// Builder for a [`YamlConfig`]
///
/// # Example
///
/// ```no_run
/// use configplus::{ConfigError, YamlConfig};
///
/// let config = YamlConfig::builder("UiConfig")
///     .post_init(|cfg| {
///         let theme = cfg.get_or("display.theme", "light");
///         cfg.set("theme", theme);
///         let filters = cfg.get_or("filters", Vec::<String>::new());
///         cfg.set("filters", filters);
///         Ok(())
///     })
///     .load("config.yaml")?;
///
/// println!("{config}");
/// # Ok::<(), ConfigError>(())
/// ```
pub struct YamlConfigBuilder {
    name: String,
    post_init: Option<PostInit>,
}

impl YamlConfigBuilder {
    pub fn post_init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut YamlConfig) -> Result<()> + Send + Sync + 'static,
    {
        self.post_init = Some(Arc::new(f));
        self
    }

    /// Read, parse and post-process the document at `path`
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<YamlConfig> {
        let (config_path, content) = file::read_document(path.as_ref())?;
        let raw = formats::yaml::parse_with_path(&content, path.as_ref().to_str())?;

        let mut config = YamlConfig {
            name: self.name,
            config_path,
            raw,
            registry: Registry::new(RegistryKind::Yaml),
        };

        if let Some(post_init) = self.post_init {
            post_init(&mut config)?;
        }

        debug!(
            config = %config.name,
            path = %config.config_path.display(),
            attributes = config.registry.len(),
            "loaded yaml config"
        );
        Ok(config)
    }
}

/// A configuration derived from one YAML document
#[derive(Clone)]
pub struct YamlConfig {
    name: String,
    config_path: PathBuf,
    raw: Value,
    registry: Registry,
}

impl YamlConfig {
    pub fn builder(name: impl Into<String>) -> YamlConfigBuilder {
        YamlConfigBuilder {
            name: name.into(),
            post_init: None,
        }
    }

    /// Load without a post-init hook; only dotted lookups are available
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder("YamlConfig").load(path)
    }

    /// Absolute path of the source document
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The parsed document
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Nested lookup such as `database.host` or `features.0.name`
    ///
    /// Subtrees convert to `List`/`Map` values. See [`node`](Self::node) for
    /// the untouched YAML node.
    pub fn get(&self, dotted: &str) -> Option<ConfigValue> {
        self.node(dotted).map(ConfigValue::from)
    }

    /// Raw YAML node at `dotted`
    ///
    /// Mapping segments match string keys, sequence segments match indices.
    pub fn node(&self, dotted: &str) -> Option<&Value> {
        let mut current = &self.raw;
        for segment in dotted.split('.') {
            current = match current {
                Value::Mapping(map) => map.get(segment)?,
                Value::Sequence(seq) => seq.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        trace!(path = dotted, "yaml lookup hit");
        Some(current)
    }

    /// Converted value at `dotted`, or `default` when any segment is missing
    pub fn get_or(&self, dotted: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get(dotted).unwrap_or_else(|| default.into())
    }

    /// Whether `dotted` exists, even if it holds `null`
    pub fn has(&self, dotted: &str) -> bool {
        self.node(dotted).is_some()
    }

    /// Deserialize the subtree at `dotted` into `T`
    pub fn extract<T: DeserializeOwned>(&self, dotted: &str) -> Result<T> {
        let node = self
            .node(dotted)
            .ok_or_else(|| ConfigError::validation(dotted, "section not found"))?;
        serde_yaml::from_value(node.clone())
            .map_err(|e| ConfigError::validation(dotted, e.to_string()))
    }

    /// [`extract`](Self::extract) followed by the type's `validator` rules
    pub fn extract_validated<T>(&self, dotted: &str) -> Result<T>
    where
        T: DeserializeOwned + validator::Validate,
    {
        let value: T = self.extract(dotted)?;
        value
            .validate()
            .map_err(|e| from_validation_errors(dotted, e))?;
        Ok(value)
    }

    /// Derived attribute by name
    pub fn attr(&self, name: &str) -> Option<&ConfigValue> {
        self.registry.get(name)
    }

    /// Set a derived attribute
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.registry.set(name, value);
    }
}

impl ConfigDefinition for YamlConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn source_path(&self) -> Option<&Path> {
        Some(&self.config_path)
    }
}

impl fmt::Display for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlConfig")
            .field("name", &self.name)
            .field("config_path", &self.config_path)
            .field("attributes", &self.registry.len())
            .finish()
    }
}
