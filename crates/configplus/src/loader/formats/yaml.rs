//! YAML format parser

use crate::{error::ConfigError, Result};
use serde_yaml::Value;

/// Parse a YAML document into its raw tree
pub fn parse(content: &str) -> Result<Value> {
    parse_with_path(content, None)
}

/// Parse a YAML document with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml_error(e, content, path))
}
