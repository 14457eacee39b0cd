//! The emitter contract every backend implements.

use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_schema::{PropertyEvent, Section};

use crate::SectionFilter;

/// A backend-specific consumer of the property event stream.
///
/// Lifecycle: `start_files`, then any number of sections
/// (`new_section`, `property`*, `close_section`), then `close_files` and
/// `relocate`. `cleanup` may be called at any point and must remove every
/// file created by `start_files`; it is a no-op if nothing was created and
/// safe to call repeatedly.
pub trait Emitter {
    /// Backend identifier (e.g. "cpp", "java").
    fn id(&self) -> &'static str;

    /// Create the output files in the staging directory.
    fn start_files(&mut self) -> Result<()>;

    /// A section opens.
    fn new_section(&mut self, section: &Section) -> Result<()>;

    /// A property of the open section. `name` is relative to the section.
    fn property(&mut self, name: &str, deprecated: bool, deprecated_by: Option<&str>)
    -> Result<()>;

    /// The open section closes.
    fn close_section(&mut self) -> Result<()>;

    /// Write the catalogues and close the files.
    fn close_files(&mut self) -> Result<()>;

    /// Delete any staged files.
    fn cleanup(&mut self) -> Result<()>;

    /// Move finished files below `root`, replacing existing ones.
    fn relocate(&mut self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Route one stream event to the matching call.
    ///
    /// `Done` closes the files.
    fn dispatch(&mut self, event: &PropertyEvent) -> Result<()> {
        match event {
            PropertyEvent::SectionStart(section) => self.new_section(section),
            PropertyEvent::Property { name } => self.property(name, false, None),
            PropertyEvent::DeprecatedProperty { name } => self.property(name, true, None),
            PropertyEvent::DeprecatedWithReplacement { name, replacement } => {
                self.property(name, true, Some(replacement))
            }
            PropertyEvent::SectionEnd => self.close_section(),
            PropertyEvent::Done => self.close_files(),
        }
    }
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn start_files(&mut self) -> Result<()> {
        (**self).start_files()
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        (**self).new_section(section)
    }

    fn property(
        &mut self,
        name: &str,
        deprecated: bool,
        deprecated_by: Option<&str>,
    ) -> Result<()> {
        (**self).property(name, deprecated, deprecated_by)
    }

    fn close_section(&mut self) -> Result<()> {
        (**self).close_section()
    }

    fn close_files(&mut self) -> Result<()> {
        (**self).close_files()
    }

    fn cleanup(&mut self) -> Result<()> {
        (**self).cleanup()
    }

    fn relocate(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        (**self).relocate(root)
    }
}

/// Construction options shared by the bundled backends.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Generated class name, also the output file stem.
    pub class_name: String,
    /// Schema file name quoted in the banner.
    pub input_file: String,
    /// Where files are written until the run succeeds.
    pub staging_dir: PathBuf,
    /// Destination directory relative to the project root.
    pub destination: PathBuf,
    /// Sections this backend emits.
    pub sections: SectionFilter,
}

impl EmitterOptions {
    pub fn new(
        class_name: impl Into<String>,
        input_file: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            input_file: input_file.into(),
            staging_dir: PathBuf::from("."),
            destination: destination.into(),
            sections: SectionFilter::All,
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_sections(mut self, sections: SectionFilter) -> Self {
        self.sections = sections;
        self
    }
}

/// The `//` banner at the top of every generated file.
///
/// Carries no timestamp so regenerating an unchanged schema is byte-identical.
pub fn banner(input_file: &str) -> String {
    format!(
        "// Generated by propgen from file {}\n\
         //\n\
         // IMPORTANT: Do not edit this file -- any edits made here will be lost!\n",
        input_file
    )
}
