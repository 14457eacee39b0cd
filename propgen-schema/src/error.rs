use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for propgen-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "PropertyNames.xml");
/// ctx.unknown_class_error("proxy", Some(span));
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Byte offset of a 1-based row/column position.
    pub fn offset_of(&self, row: u32, col: u32) -> Option<usize> {
        let line_start = if row <= 1 {
            0
        } else {
            self.src
                .match_indices('\n')
                .nth(row as usize - 2)
                .map(|(i, _)| i + 1)?
        };
        let line = &self.src[line_start..];
        let within = line
            .char_indices()
            .nth(col.saturating_sub(1) as usize)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        Some(line_start + within)
    }

    /// Create an XML syntax error.
    pub fn xml_error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Xml {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an unknown class error.
    pub fn unknown_class_error(&self, name: impl Into<String>, span: SourceSpan) -> Box<Error> {
        Box::new(Error::UnknownClass {
            src: self.named_source(),
            span: Some(span),
            name: name.into(),
        })
    }

    /// Create a class cycle error from the chain of classes being expanded.
    pub fn class_cycle_error(&self, chain: &[String], name: &str, span: SourceSpan) -> Box<Error> {
        let mut path: Vec<&str> = chain.iter().map(String::as_str).collect();
        path.push(name);
        Box::new(Error::ClassCycle {
            src: self.named_source(),
            span: Some(span),
            name: name.to_string(),
            chain: path.join(" -> "),
        })
    }

    /// Create a missing attribute error.
    pub fn missing_attribute_error(
        &self,
        element: impl Into<String>,
        attribute: impl Into<String>,
        span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::MissingAttribute {
            src: self.named_source(),
            span: Some(span),
            element: element.into(),
            attribute: attribute.into(),
        })
    }

    /// Create an invalid boolean error.
    pub fn invalid_bool_error(
        &self,
        attribute: impl Into<String>,
        value: impl Into<String>,
        span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::InvalidBool {
            src: self.named_source(),
            span: Some(span),
            attribute: attribute.into(),
            value: value.into(),
        })
    }

    /// Create an error for a schema without a `<properties>` root.
    pub fn missing_root_error(&self) -> Box<Error> {
        Box::new(Error::MissingRoot {
            src: self.named_source(),
        })
    }

    /// Create an error for a `<property>` that has no enclosing section.
    pub fn property_outside_section_error(&self, span: SourceSpan) -> Box<Error> {
        Box::new(Error::PropertyOutsideSection {
            src: self.named_source(),
            span: Some(span),
        })
    }

    /// Create a config parse error from a toml error.
    pub fn config_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: self.named_source(),
            span,
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(propgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot derive a class name from '{path}'")]
    #[diagnostic(
        code(propgen::invalid_path),
        help("the schema file name (without extension) names the generated class")
    )]
    InvalidPath { path: PathBuf },

    #[error("malformed schema: {message}")]
    #[diagnostic(code(propgen::xml))]
    Xml {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("unknown property class '{name}'")]
    #[diagnostic(
        code(propgen::unknown_class),
        help("declare a <class name='{name}'> element before referencing it")
    )]
    UnknownClass {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("property class '{name}' is expanded recursively ({chain})")]
    #[diagnostic(code(propgen::class_cycle))]
    ClassCycle {
        #[source_code]
        src: NamedSource<String>,
        #[label("expansion starts here")]
        span: Option<SourceSpan>,
        name: String,
        chain: String,
    },

    #[error("<{element}> is missing the '{attribute}' attribute")]
    #[diagnostic(code(propgen::missing_attribute))]
    MissingAttribute {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        element: String,
        attribute: String,
    },

    #[error("invalid value '{value}' for '{attribute}'")]
    #[diagnostic(code(propgen::invalid_bool), help("use 'true' or 'false'"))]
    InvalidBool {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a boolean")]
        span: Option<SourceSpan>,
        attribute: String,
        value: String,
    },

    #[error("schema has no <properties> element")]
    #[diagnostic(code(propgen::missing_root))]
    MissingRoot {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("<property> must be declared inside a <section>")]
    #[diagnostic(code(propgen::property_outside_section))]
    PropertyOutsideSection {
        #[source_code]
        src: NamedSource<String>,
        #[label("no open section")]
        span: Option<SourceSpan>,
    },

    #[error("failed to parse propgen.toml")]
    #[diagnostic(code(propgen::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not find {marker} in '{start}' or any parent directory")]
    #[diagnostic(
        code(propgen::project_root),
        help("create {marker} at the project root or pass --root")
    )]
    ProjectRootNotFound { start: PathBuf, marker: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_line() {
        let ctx = SourceContext::new("<a>\n<b/>\n", "t.xml");
        assert_eq!(ctx.offset_of(1, 1), Some(0));
        assert_eq!(ctx.offset_of(1, 2), Some(1));
    }

    #[test]
    fn test_offset_of_later_line() {
        let ctx = SourceContext::new("<a>\n<b/>\n", "t.xml");
        assert_eq!(ctx.offset_of(2, 1), Some(4));
        assert_eq!(ctx.offset_of(2, 3), Some(6));
    }

    #[test]
    fn test_offset_of_past_end() {
        let ctx = SourceContext::new("<a>", "t.xml");
        assert_eq!(ctx.offset_of(5, 1), None);
    }

    #[test]
    fn test_class_cycle_chain() {
        let ctx = SourceContext::new("", "t.xml");
        let err = ctx.class_cycle_error(&["a".to_string(), "b".to_string()], "a", 0.into());
        match *err {
            Error::ClassCycle { chain, name, .. } => {
                assert_eq!(chain, "a -> b -> a");
                assert_eq!(name, "a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
