//! Shared string utilities for pattern rendering.

use std::path::Path;

/// Schema marker for "any single name segment".
pub const WILDCARD: &str = "[any]";

/// Derive the generated class name from a schema path (its file stem).
///
/// `config/PropertyNames.xml` -> `PropertyNames`
pub fn class_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Replace every wildcard marker with a backend-native equivalent.
pub fn replace_wildcard(name: &str, replacement: &str) -> String {
    name.replace(WILDCARD, replacement)
}

/// Replace every `.` separator with `escaped` (e.g. `\.` for regex patterns).
pub fn escape_dots(name: &str, escaped: &str) -> String {
    name.replace('.', escaped)
}
