//! Streaming walk over `<properties>`, producing [`PropertyEvent`]s.
//!
//! Events are produced in declaration order with class expansions inlined at
//! the point of reference, so consumers never buffer or reorder.

use std::collections::VecDeque;

use miette::SourceSpan;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    ClassTable, PropertyEvent, Result, Section, SourceContext, SuffixTemplate, attrs::Attributes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// Before the `<properties>` element.
    BeforeRoot,
    /// Inside `<properties>`.
    InRoot,
    /// `Done` has been queued or an error was returned.
    Finished,
}

#[derive(Debug)]
struct OpenSection {
    name: String,
    properties: usize,
}

/// A property node, either declared in a section or synthesized from a suffix.
#[derive(Debug, Clone)]
struct PropertyNode {
    name: Option<String>,
    class: Option<String>,
    deprecated: bool,
    deprecated_by: Option<String>,
}

impl From<&SuffixTemplate> for PropertyNode {
    fn from(suffix: &SuffixTemplate) -> Self {
        Self {
            name: Some(suffix.name.clone()),
            class: suffix.class.clone(),
            deprecated: suffix.deprecated,
            deprecated_by: suffix.deprecated_by.clone(),
        }
    }
}

/// Iterator of property events over a schema source.
///
/// The first error ends the stream.
pub struct PropertyStream<'a> {
    source: &'a SourceContext,
    classes: &'a ClassTable,
    reader: Reader<&'a [u8]>,
    state: StreamState,
    class_depth: usize,
    section: Option<OpenSection>,
    pending: VecDeque<PropertyEvent>,
}

impl<'a> PropertyStream<'a> {
    pub fn new(source: &'a SourceContext, classes: &'a ClassTable) -> Self {
        Self {
            source,
            classes,
            reader: Reader::from_str(source.src()),
            state: StreamState::BeforeRoot,
            class_depth: 0,
            section: None,
            pending: VecDeque::new(),
        }
    }

    /// Read one XML event, queueing whatever property events it produces.
    fn advance(&mut self) -> Result<()> {
        let start = self.reader.buffer_position() as usize;
        let event = self.reader.read_event();
        let end = self.reader.buffer_position() as usize;
        let span = SourceSpan::from(start..end);

        match event {
            Ok(Event::Start(element)) => self.open_element(&element, span, false),
            Ok(Event::Empty(element)) => self.open_element(&element, span, true),
            Ok(Event::End(element)) => self.close_element(element.name().as_ref()),
            Ok(Event::Eof) => self.finish(),
            Ok(_) => Ok(()),
            Err(e) => Err(self.source.xml_error(e.to_string(), Some(span))),
        }
    }

    fn open_element(&mut self, element: &BytesStart<'_>, span: SourceSpan, empty: bool) -> Result<()> {
        let name = element.name();
        let name = name.as_ref();

        if self.state == StreamState::BeforeRoot {
            if name == b"properties" {
                self.state = StreamState::InRoot;
                if empty {
                    return self.finish();
                }
            }
            return Ok(());
        }

        // Class bodies were consumed by the class table pre-pass.
        if self.class_depth > 0 {
            if !empty {
                self.class_depth += 1;
            }
            return Ok(());
        }

        match name {
            b"class" => {
                if !empty {
                    self.class_depth = 1;
                }
                Ok(())
            }
            b"section" => {
                let attrs = self.attributes(element, span)?;
                self.open_section(&attrs)?;
                if empty {
                    self.close_section();
                }
                Ok(())
            }
            b"property" => {
                let attrs = self.attributes(element, span)?;
                self.property(&attrs)
            }
            other => {
                tracing::debug!(element = %String::from_utf8_lossy(other), "ignoring element");
                Ok(())
            }
        }
    }

    fn close_element(&mut self, name: &[u8]) -> Result<()> {
        if self.state != StreamState::InRoot {
            return Ok(());
        }
        if self.class_depth > 0 {
            self.class_depth -= 1;
            return Ok(());
        }
        match name {
            b"section" => {
                self.close_section();
                Ok(())
            }
            b"properties" => self.finish(),
            _ => Ok(()),
        }
    }

    fn open_section(&mut self, attrs: &Attributes) -> Result<()> {
        // Sections never nest; a new one closes the previous.
        self.close_section();

        let name = attrs.require(self.source, "section", "name")?;
        let no_cmd_line = attrs.flag(self.source, "noCmdLine", false)?;
        tracing::debug!(section = %name, command_line = !no_cmd_line, "section opened");

        self.pending
            .push_back(PropertyEvent::SectionStart(Section::new(&name, !no_cmd_line)));
        self.section = Some(OpenSection {
            name,
            properties: 0,
        });
        Ok(())
    }

    fn close_section(&mut self) {
        if let Some(section) = self.section.take() {
            tracing::debug!(
                section = %section.name,
                properties = section.properties,
                "section closed"
            );
            self.pending.push_back(PropertyEvent::SectionEnd);
        }
    }

    fn property(&mut self, attrs: &Attributes) -> Result<()> {
        let Some(section) = self.section.as_ref() else {
            return Err(self.source.property_outside_section_error(attrs.span()));
        };
        let node = PropertyNode {
            name: attrs.owned("name"),
            class: attrs.owned("class"),
            deprecated: attrs.flag(self.source, "deprecated", false)?,
            deprecated_by: attrs.owned("deprecatedBy"),
        };

        let before = self.pending.len();
        let mut visiting = Vec::new();
        let mut expanded = VecDeque::new();
        expand(
            &Expansion {
                source: self.source,
                classes: self.classes,
                section: &section.name,
                span: attrs.span(),
            },
            node,
            &mut visiting,
            &mut expanded,
        )?;
        self.pending.append(&mut expanded);

        let added = self.pending.len() - before;
        if let Some(section) = self.section.as_mut() {
            section.properties += added;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match self.state {
            StreamState::BeforeRoot => Err(self.source.missing_root_error()),
            StreamState::InRoot => {
                self.close_section();
                self.pending.push_back(PropertyEvent::Done);
                self.state = StreamState::Finished;
                Ok(())
            }
            StreamState::Finished => Ok(()),
        }
    }

    fn attributes(&self, element: &BytesStart<'_>, span: SourceSpan) -> Result<Attributes> {
        let mut attrs = Attributes::new(span);
        for attr in element.attributes() {
            let attr = attr.map_err(|e| self.source.xml_error(e.to_string(), Some(span)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| self.source.xml_error(e.to_string(), Some(span)))?;
            attrs.push(key, value);
        }
        Ok(attrs)
    }
}

impl Iterator for PropertyStream<'_> {
    type Item = Result<PropertyEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.state == StreamState::Finished {
                return None;
            }
            if let Err(e) = self.advance() {
                self.state = StreamState::Finished;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

/// Fixed inputs of one property expansion.
struct Expansion<'a> {
    source: &'a SourceContext,
    classes: &'a ClassTable,
    section: &'a str,
    span: SourceSpan,
}

/// Expand `node` into property events, recursing through class references.
///
/// `visiting` holds the classes on the current expansion path.
fn expand(
    ctx: &Expansion<'_>,
    node: PropertyNode,
    visiting: &mut Vec<String>,
    out: &mut VecDeque<PropertyEvent>,
) -> Result<()> {
    if let Some(class_name) = node.class.as_deref() {
        if visiting.iter().any(|c| c == class_name) {
            return Err(ctx
                .source
                .class_cycle_error(visiting, class_name, ctx.span));
        }
        let class = ctx
            .classes
            .get(class_name)
            .ok_or_else(|| ctx.source.unknown_class_error(class_name, ctx.span))?;

        visiting.push(class.name.clone());
        for suffix in &class.children {
            let child = match node.name.as_deref() {
                None => PropertyNode::from(suffix),
                Some(prefix) => PropertyNode {
                    name: Some(format!("{prefix}.{}", suffix.name)),
                    class: suffix.class.clone(),
                    deprecated: suffix.deprecated,
                    // Relative to the instantiation site, not the class.
                    deprecated_by: suffix
                        .deprecated_by
                        .as_ref()
                        .map(|target| format!("{}.{prefix}.{target}", ctx.section)),
                },
            };
            expand(ctx, child, visiting, out)?;
        }
        visiting.pop();

        if class.prefix_only {
            return Ok(());
        }
    }

    let Some(name) = node.name else {
        return Err(ctx
            .source
            .missing_attribute_error("property", "name", ctx.span));
    };

    let event = if let Some(replacement) = node.deprecated_by {
        PropertyEvent::DeprecatedWithReplacement { name, replacement }
    } else if node.deprecated {
        PropertyEvent::DeprecatedProperty { name }
    } else {
        PropertyEvent::Property { name }
    };
    tracing::trace!(section = ctx.section, event = event.kind(), "property");
    out.push_back(event);
    Ok(())
}
