//! Property classes: reusable groups of property suffixes.
//!
//! The class table is built by a tree pre-pass over the whole schema before
//! any property events are streamed. It is immutable afterwards and shared by
//! reference with the stream.

use indexmap::IndexMap;
use miette::SourceSpan;
use roxmltree::{Document, Node};

use crate::{Result, SourceContext, attrs::Attributes};

/// One suffix declared inside a `<class>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTemplate {
    /// Suffix appended to the referencing property name.
    pub name: String,
    /// Nested class reference, expanded recursively.
    pub class: Option<String>,
    pub deprecated: bool,
    /// Replacement, relative to the referencing property.
    pub deprecated_by: Option<String>,
}

/// A named, reusable group of property suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyClass {
    pub name: String,
    /// The referencing property is never emitted itself, only its expansions.
    pub prefix_only: bool,
    /// Suffixes in declaration order.
    pub children: Vec<SuffixTemplate>,
}

/// Lookup from class name to [`PropertyClass`], in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: IndexMap<String, PropertyClass>,
}

impl ClassTable {
    /// Build the table from every `<class>` element in the schema.
    pub fn build(source: &SourceContext) -> Result<Self> {
        let doc = Document::parse(source.src()).map_err(|e| {
            let pos = e.pos();
            let span = source
                .offset_of(pos.row, pos.col)
                .map(SourceSpan::from);
            source.xml_error(e.to_string(), span)
        })?;

        let mut classes = IndexMap::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("class")) {
            let class = parse_class(source, node)?;
            tracing::trace!(class = %class.name, suffixes = class.children.len(), "class declared");
            if let Some(previous) = classes.insert(class.name.clone(), class) {
                tracing::warn!(class = %previous.name, "property class declared twice, keeping the last one");
            }
        }

        tracing::debug!(classes = classes.len(), "class table built");
        Ok(Self { classes })
    }

    /// Look up a class by name.
    pub fn get(&self, name: &str) -> Option<&PropertyClass> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate classes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyClass> {
        self.classes.values()
    }
}

fn parse_class(source: &SourceContext, node: Node<'_, '_>) -> Result<PropertyClass> {
    let attrs = attributes(node);
    let name = attrs.require(source, "class", "name")?;
    let prefix_only = attrs.flag(source, "prefix-only", false)?;

    let mut children = Vec::new();
    for suffix in node.children().filter(|c| c.has_tag_name("suffix")) {
        let attrs = attributes(suffix);
        // Bare <suffix/> elements carry nothing to expand.
        if attrs.is_empty() {
            continue;
        }
        children.push(SuffixTemplate {
            name: attrs.require(source, "suffix", "name")?,
            class: attrs.owned("class"),
            deprecated: attrs.flag(source, "deprecated", false)?,
            deprecated_by: attrs.owned("deprecatedBy"),
        });
    }

    Ok(PropertyClass {
        name,
        prefix_only,
        children,
    })
}

fn attributes(node: Node<'_, '_>) -> Attributes {
    let mut attrs = Attributes::new(SourceSpan::from(node.range()));
    for attr in node.attributes() {
        attrs.push(attr.name(), attr.value());
    }
    attrs
}
