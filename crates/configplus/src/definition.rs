//! Behaviour shared by every configuration definition

use crate::registry::Registry;
use crate::render;
use crate::value::ConfigValue;
use std::collections::BTreeMap;
use std::path::Path;

/// A named bundle of settings backed by a [`Registry`]
///
/// Both loader styles implement this, so the dict view, grouping and the
/// rendered summary are computed the same way for each of them, always from
/// the current registry state.
pub trait ConfigDefinition {
    /// Definition name, used as the summary title
    fn name(&self) -> &str;

    fn registry(&self) -> &Registry;

    /// File the definition was read from, if any
    fn source_path(&self) -> Option<&Path> {
        None
    }

    fn to_dict(&self) -> BTreeMap<String, ConfigValue> {
        self.registry().to_dict()
    }

    fn grouped_items(&self) -> BTreeMap<String, Vec<(String, ConfigValue)>> {
        render::grouped_items(self.registry())
    }

    fn render(&self) -> String {
        render::render(self.name(), self.registry(), self.source_path())
    }
}
