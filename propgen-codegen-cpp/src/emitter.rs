use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_codegen::{Artifact, Catalogue, Emitter, EmitterOptions, banner};
use propgen_schema::Section;

use crate::render;

/// Default destination, relative to the project root.
pub const DESTINATION: &str = "cpp/src/Ice";

const HEADER: &str = "h";
const SOURCE: &str = "cpp";

/// Writes `<Class>.h` and `<Class>.cpp`.
///
/// The header declares one `PropertyArray` per section; the source defines
/// the per-section `Property` arrays and the two lookup tables.
pub struct CppEmitter {
    options: EmitterOptions,
    artifact: Artifact,
    catalogue: Catalogue,
}

impl CppEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        let artifact = Artifact::new(&options.class_name, &options.staging_dir);
        let catalogue = Catalogue::new(options.sections.clone());
        Self {
            options,
            artifact,
            catalogue,
        }
    }

    /// Options with the default destination.
    pub fn default_options(class_name: &str, input_file: &str) -> EmitterOptions {
        EmitterOptions::new(class_name, input_file, DESTINATION)
    }
}

impl Emitter for CppEmitter {
    fn id(&self) -> &'static str {
        "cpp"
    }

    fn start_files(&mut self) -> Result<()> {
        let banner = banner(&self.options.input_file);
        let class_name = &self.options.class_name;

        self.artifact.create(HEADER)?;
        self.artifact.create(SOURCE)?;
        self.artifact
            .write(HEADER, &render::header_preamble(&banner, class_name))?;
        self.artifact
            .write(SOURCE, &render::source_preamble(&banner, class_name))
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        if !self.catalogue.open_section(section) {
            return Ok(());
        }
        self.artifact
            .write(HEADER, &render::header_section(&section.name))?;
        self.artifact
            .write(SOURCE, &render::source_section_open(&section.name))
    }

    fn property(
        &mut self,
        name: &str,
        deprecated: bool,
        deprecated_by: Option<&str>,
    ) -> Result<()> {
        let Some(section) = self.catalogue.current() else {
            return Ok(());
        };
        let line = render::source_property(section, name, deprecated, deprecated_by);
        self.artifact.write(SOURCE, &line)
    }

    fn close_section(&mut self) -> Result<()> {
        let Some(section) = self.catalogue.close_section() else {
            return Ok(());
        };
        let text = render::source_section_close(&self.options.class_name, &section);
        self.artifact.write(SOURCE, &text)
    }

    fn close_files(&mut self) -> Result<()> {
        self.artifact.write(HEADER, &render::header_postamble())?;
        let tables = render::source_tables(
            &self.options.class_name,
            self.catalogue.sections(),
            self.catalogue.command_line_names(),
        );
        self.artifact.write(SOURCE, &tables)?;
        self.artifact.close()
    }

    fn cleanup(&mut self) -> Result<()> {
        self.artifact.discard()
    }

    fn relocate(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        let dest = root.join(&self.options.destination);
        tracing::debug!(backend = "cpp", dest = %dest.display(), "relocating");
        self.artifact.relocate(&dest)
    }
}
