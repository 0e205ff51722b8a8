//! Value model shared by environment- and YAML-backed configurations

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single configuration value
///
/// Scalars come from environment casting or YAML scalars, `List` and `Map`
/// only from YAML subtrees. Maps keep document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(Utf8PathBuf),
    List(Vec<ConfigValue>),
    #[serde(serialize_with = "serialize_entries")]
    Map(Vec<(String, ConfigValue)>),
}

fn serialize_entries<S>(entries: &[(String, ConfigValue)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}

impl ConfigValue {
    /// Build a path value from any std path
    ///
    /// Non UTF-8 paths are converted lossily.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Utf8PathBuf::from_path_buf(path) {
            Ok(p) => Self::Path(p),
            Err(p) => Self::Path(Utf8PathBuf::from(p.to_string_lossy().into_owned())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats and integers both read as `f64`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, ConfigValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a map value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for ConfigValue {
    /// Natural string form, with collections abbreviated to their size
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{}", s),
            Self::Path(p) => write!(f, "{}", p),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(entries) => write!(f, "{{{} keys}}", entries.len()),
        }
    }
}

impl From<&serde_yaml::Value> for ConfigValue {
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s.clone()),
            Value::Sequence(seq) => Self::List(seq.iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (yaml_key(k), Self::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(&tagged.value),
        }
    }
}

impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        Self::from(&value)
    }
}

/// Mapping keys are rendered through their scalar text
fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        other => ConfigValue::from(other).to_string(),
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u16> for ConfigValue {
    fn from(i: u16) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Utf8PathBuf> for ConfigValue {
    fn from(p: Utf8PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Utf8Path> for ConfigValue {
    fn from(p: &Utf8Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<PathBuf> for ConfigValue {
    fn from(p: PathBuf) -> Self {
        Self::path(p)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
