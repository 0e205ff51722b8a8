//! Name-based secret masking for rendered output
//!
//! Classification only ever looks at the attribute name. A secret value is
//! replaced wholesale, so no part of it leaks regardless of length.

use crate::value::ConfigValue;
use std::borrow::Cow;

/// Redaction marker shown in place of secret values
pub const MASK: &str = "***hidden***";

/// Name fragments that mark an attribute as sensitive (matched case-insensitively)
pub const SECRET_KEYWORDS: &[&str] = &[
    "SECRET",
    "KEY",
    "PASSWORD",
    "PASSWD",
    "TOKEN",
    "CREDENTIAL",
    "APIKEY",
];

/// Whether an attribute name is considered sensitive
pub fn is_secret(name: &str) -> bool {
    let upper = name.to_uppercase();
    SECRET_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

/// Replace `value` with [`MASK`] when `name` is sensitive
///
/// `Null` is never secret and passes through unchanged.
pub fn mask_if_secret<'a>(name: &str, value: &'a ConfigValue) -> Cow<'a, ConfigValue> {
    if value.is_null() || !is_secret(name) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(ConfigValue::Str(MASK.to_string()))
    }
}
