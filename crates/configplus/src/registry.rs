//! Ordered attribute registry
//!
//! Every configuration definition records its attributes here in declaration
//! order. The registry keeps all of them (so `get`/`has` can still see
//! lowercase or private helpers) and exposes only the data entries through
//! [`Registry::to_dict`] and [`Registry::visible`].

use crate::value::ConfigValue;
use std::collections::BTreeMap;

/// Framework-owned names on YAML definitions that never show up as data
pub const RESERVED_YAML_NAMES: &[&str] = &["config_path", "raw_config", "logger"];

/// Which visibility rule applies to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryKind {
    /// Only `UPPER_SNAKE_CASE` names are data
    #[default]
    Env,
    /// Any non-private name except [`RESERVED_YAML_NAMES`]
    Yaml,
}

impl RegistryKind {
    /// Apply the filtering rules to a single name
    pub fn is_visible(self, name: &str) -> bool {
        if name.is_empty() || name.starts_with('_') {
            return false;
        }
        match self {
            Self::Env => is_upper_snake(name),
            Self::Yaml => !RESERVED_YAML_NAMES.contains(&name),
        }
    }
}

/// `DATABASE_PORT`, `API_V2_URL` yes; `lower_value`, `Mixed_Case`, `___` no
fn is_upper_snake(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && name.chars().any(|c| c.is_ascii_uppercase())
}

/// Named values of one configuration definition, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    kind: RegistryKind,
    entries: Vec<(String, ConfigValue)>,
}

impl Registry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Insert a value, or overwrite it in place if the name already exists
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove an attribute, returning its last value
    pub fn remove(&mut self, name: &str) -> Option<ConfigValue> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Look up any attribute, visible or not
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All attributes including hidden ones
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Data attributes only, in declaration order
    pub fn visible(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        let kind = self.kind;
        self.iter().filter(move |(n, _)| kind.is_visible(n))
    }

    /// Snapshot of the data attributes keyed by name
    pub fn to_dict(&self) -> BTreeMap<String, ConfigValue> {
        self.visible()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect()
    }

    /// Number of data attributes
    pub fn len(&self) -> usize {
        self.visible().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
