use propgen_core::{escape_dots, replace_wildcard};

/// `^Section\.name$`, for use inside a `@"..."` literal.
pub fn pattern(section: &str, name: &str) -> String {
    let name = replace_wildcard(&escape_dots(name, r"\."), r"[^\s]+");
    format!(r"^{}\.{}$", section, name)
}
