//! Normalized events produced by walking a property schema.

/// A top-level grouping of properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// Listed in the command-line catalogue (`noCmdLine` not set).
    pub command_line: bool,
}

impl Section {
    pub fn new(name: impl Into<String>, command_line: bool) -> Self {
        Self {
            name: name.into(),
            command_line,
        }
    }
}

/// One step of the property stream.
///
/// Property names are relative to the open section; class expansions are
/// already inlined and deprecation targets already qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEvent {
    SectionStart(Section),
    Property {
        name: String,
    },
    DeprecatedProperty {
        name: String,
    },
    DeprecatedWithReplacement {
        name: String,
        replacement: String,
    },
    SectionEnd,
    Done,
}

impl PropertyEvent {
    /// Short event name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyEvent::SectionStart(_) => "section-start",
            PropertyEvent::Property { .. } => "property",
            PropertyEvent::DeprecatedProperty { .. } => "deprecated-property",
            PropertyEvent::DeprecatedWithReplacement { .. } => "deprecated-with-replacement",
            PropertyEvent::SectionEnd => "section-end",
            PropertyEvent::Done => "done",
        }
    }

    /// The property name, for the three property events.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            PropertyEvent::Property { name }
            | PropertyEvent::DeprecatedProperty { name }
            | PropertyEvent::DeprecatedWithReplacement { name, .. } => Some(name),
            _ => None,
        }
    }
}
