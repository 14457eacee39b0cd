//! Attribute access shared by the class table and the event stream.

use miette::SourceSpan;

use crate::{Result, SourceContext};

/// Attributes of one schema element, in document order.
#[derive(Debug, Clone)]
pub(crate) struct Attributes {
    entries: Vec<(String, String)>,
    span: SourceSpan,
}

impl Attributes {
    pub(crate) fn new(span: SourceSpan) -> Self {
        Self {
            entries: Vec::new(),
            span,
        }
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn span(&self) -> SourceSpan {
        self.span
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub(crate) fn require(&self, ctx: &SourceContext, element: &str, key: &str) -> Result<String> {
        self.owned(key)
            .ok_or_else(|| ctx.missing_attribute_error(element, key, self.span))
    }

    /// Read a boolean attribute, `default` when absent.
    pub(crate) fn flag(&self, ctx: &SourceContext, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => parse_bool(value)
                .ok_or_else(|| ctx.invalid_bool_error(key, value, self.span)),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        let mut attrs = Attributes::new(SourceSpan::from(0..4));
        for (k, v) in pairs {
            attrs.push(*k, *v);
        }
        attrs
    }

    #[test]
    fn test_flag_defaults_when_absent() {
        let ctx = SourceContext::new("", "t.xml");
        assert!(!attrs(&[]).flag(&ctx, "deprecated", false).unwrap());
        assert!(attrs(&[]).flag(&ctx, "deprecated", true).unwrap());
    }

    #[test]
    fn test_flag_is_case_insensitive() {
        let ctx = SourceContext::new("", "t.xml");
        assert!(attrs(&[("noCmdLine", "TRUE")]).flag(&ctx, "noCmdLine", false).unwrap());
        assert!(!attrs(&[("noCmdLine", "False")]).flag(&ctx, "noCmdLine", true).unwrap());
    }

    #[test]
    fn test_flag_rejects_garbage() {
        let ctx = SourceContext::new("", "t.xml");
        assert!(attrs(&[("deprecated", "yes")]).flag(&ctx, "deprecated", false).is_err());
    }

    #[test]
    fn test_require_missing() {
        let ctx = SourceContext::new("", "t.xml");
        let err = attrs(&[]).require(&ctx, "section", "name").unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }
}
