//! Grouped, masked, boxed summaries of a configuration
//!
//! Output layout:
//!
//! ```text
//! Config Path: /srv/app/config.yaml        (YAML definitions only)
//! ╔══════════════════════════════════════════════════╗
//! ║                   RUNTIMECONFIG                  ║
//! ╚══════════════════════════════════════════════════╝
//!
//! ▶ DATABASE
//!   DATABASE_HOST     = localhost
//!   DATABASE_PASSWORD = ***hidden***
//!
//! ════════════════════════════════════════════════════
//! ```

use crate::mask::mask_if_secret;
use crate::registry::Registry;
use crate::value::ConfigValue;
use camino::Utf8Path;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Component, Path, PathBuf};

/// Narrowest inner width of the title box
const MIN_BOX_WIDTH: usize = 50;

const GROUP_MARKER: &str = "▶";

/// Display cluster of a name: everything before the first underscore
pub fn group_key(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// Visible entries clustered by [`group_key`], alphabetical at both levels
pub fn grouped_items(registry: &Registry) -> BTreeMap<String, Vec<(String, ConfigValue)>> {
    let mut groups: BTreeMap<String, Vec<(String, ConfigValue)>> = BTreeMap::new();
    for (name, value) in registry.visible() {
        groups
            .entry(group_key(name).to_string())
            .or_default()
            .push((name.to_string(), value.clone()));
    }
    for entries in groups.values_mut() {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
    groups
}

/// Text shown for one attribute: masked, paths made absolute, collections counted
pub fn display_value(name: &str, value: &ConfigValue) -> String {
    match mask_if_secret(name, value).as_ref() {
        ConfigValue::Path(path) => resolve_path(path),
        other => other.to_string(),
    }
}

/// Render the full summary block
pub fn render(title: &str, registry: &Registry, source: Option<&Path>) -> String {
    let mut out = String::new();

    if let Some(source) = source {
        let _ = writeln!(out, "Config Path: {}", source.display());
    }

    let title = title.to_uppercase();
    let width = MIN_BOX_WIDTH.max(console::measure_text_width(&title) + 4);
    let _ = writeln!(out, "╔{}╗", "═".repeat(width));
    let _ = writeln!(out, "║{}║", center(&title, width));
    let _ = writeln!(out, "╚{}╝", "═".repeat(width));

    let groups = grouped_items(registry);
    let name_width = groups
        .values()
        .flatten()
        .map(|(name, _)| console::measure_text_width(name))
        .max()
        .unwrap_or(0);

    for (key, entries) in &groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", GROUP_MARKER, key.to_uppercase());
        for (name, value) in entries {
            let pad = name_width.saturating_sub(console::measure_text_width(name));
            let _ = writeln!(
                out,
                "  {}{} = {}",
                name,
                " ".repeat(pad),
                display_value(name, value)
            );
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", "═".repeat(width + 2));
    out
}

fn center(text: &str, width: usize) -> String {
    let len = console::measure_text_width(text);
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Absolute, canonical form of a path; falls back to lexical cleanup when it doesn't exist
fn resolve_path(path: &Utf8Path) -> String {
    let path = path.as_std_path();
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical.display().to_string();
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize(&absolute).display().to_string()
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MASK;
    use crate::registry::RegistryKind;
    use pretty_assertions::assert_eq;

    fn sample() -> Registry {
        let mut registry = Registry::new(RegistryKind::Env);
        registry.set("DATABASE_HOST", "localhost");
        registry.set("DATABASE_PORT", 5432);
        registry.set("API_ENDPOINT", "https://api.example.com");
        registry.set("SECRET_API_KEY", "secret123456789");
        registry.set("API_TIMEOUT", 30);
        registry
    }

    #[test]
    fn test_group_key() {
        assert_eq!(group_key("DATABASE_HOST"), "DATABASE");
        assert_eq!(group_key("SINGLE"), "SINGLE");
        assert_eq!(group_key("database_host"), "database");
    }

    #[test]
    fn test_grouped_items() {
        let groups = grouped_items(&sample());
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["API", "DATABASE", "SECRET"]);

        let api: Vec<&str> = groups["API"].iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(api, vec!["API_ENDPOINT", "API_TIMEOUT"]);
    }

    #[test]
    fn test_render_structure_and_masking() {
        let text = render("SampleConfig", &sample(), None);
        assert!(text.contains("╔"));
        assert!(text.contains("╚"));
        assert!(text.contains("SAMPLECONFIG"));
        assert!(text.contains("▶ DATABASE"));
        assert!(text.contains("▶ API"));
        assert!(text.contains("localhost"));
        assert!(text.contains("5432"));
        assert!(!text.contains("secret123456789"));
        assert!(text.contains(MASK));
        assert!(!text.contains("Config Path:"));
    }

    #[test]
    fn test_render_aligns_equals() {
        let text = render("SampleConfig", &sample(), None);
        let columns: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("  "))
            .map(|l| l.find(" = ").unwrap())
            .collect();
        assert_eq!(columns.len(), 5);
        assert!(columns.iter().all(|c| *c == columns[0]));
    }

    #[test]
    fn test_render_deterministic_order() {
        let mut registry = Registry::new(RegistryKind::Env);
        registry.set("ZZZ_LAST", "z");
        registry.set("AAA_FIRST", "a");
        registry.set("MMM_MIDDLE", "m");

        let text = render("UnsortedConfig", &registry, None);
        let aaa = text.find("AAA_FIRST").unwrap();
        let mmm = text.find("MMM_MIDDLE").unwrap();
        let zzz = text.find("ZZZ_LAST").unwrap();
        assert!(aaa < mmm && mmm < zzz);
        assert_eq!(text, render("UnsortedConfig", &registry, None));
    }

    #[test]
    fn test_display_value_collections() {
        let list = ConfigValue::from(vec![1, 2]);
        assert_eq!(display_value("features", &list), "[2 items]");
        let map = ConfigValue::Map(vec![("a".to_string(), ConfigValue::Int(1))]);
        assert_eq!(display_value("database_config", &map), "{1 keys}");
    }

    #[test]
    fn test_display_value_path_is_absolute() {
        let value = ConfigValue::path("relative/../data");
        let shown = display_value("DATA_DIR", &value);
        assert!(Path::new(&shown).is_absolute());
        assert!(shown.ends_with("data"));
        assert!(!shown.contains(".."));
    }

    #[test]
    fn test_render_with_source_prefix() {
        let text = render("AppConfig", &sample(), Some(Path::new("/etc/app.yaml")));
        assert!(text.starts_with("Config Path: /etc/app.yaml"));
    }

    #[test]
    fn test_render_empty() {
        let registry = Registry::new(RegistryKind::Env);
        let text = render("EmptyConfig", &registry, None);
        assert!(text.contains("EMPTYCONFIG"));
        assert!(!text.contains(GROUP_MARKER));
    }
}
