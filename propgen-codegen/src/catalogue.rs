//! Per-run bookkeeping shared by every backend.

use propgen_schema::Section;

/// Which sections a backend emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionFilter {
    /// Every section.
    #[default]
    All,
    /// Only the listed sections; others are dropped from both tables.
    Only(Vec<String>),
}

impl SectionFilter {
    /// Build an allow-list.
    pub fn only<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(sections.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, section: &str) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Only(names) => names.iter().any(|n| n == section),
        }
    }
}

/// Tracks the open section and accumulates the two output catalogues:
/// every emitted section (for the table of tables) and the command-line
/// eligible ones.
#[derive(Debug, Default)]
pub struct Catalogue {
    filter: SectionFilter,
    current: Option<String>,
    sections: Vec<String>,
    command_line: Vec<String>,
}

impl Catalogue {
    pub fn new(filter: SectionFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Record a new section. Returns `false` when the backend drops it.
    pub fn open_section(&mut self, section: &Section) -> bool {
        self.current = None;
        if !self.filter.allows(&section.name) {
            tracing::trace!(section = %section.name, "section filtered out");
            return false;
        }

        self.sections.push(section.name.clone());
        if section.command_line {
            self.command_line.push(section.name.clone());
        }
        self.current = Some(section.name.clone());
        true
    }

    /// The open section, if it is emitted.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Close the open section, returning it if it was emitted.
    pub fn close_section(&mut self) -> Option<String> {
        self.current.take()
    }

    /// Emitted sections in declaration order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Emitted, command-line eligible sections in declaration order.
    pub fn command_line_names(&self) -> &[String] {
        &self.command_line
    }
}
