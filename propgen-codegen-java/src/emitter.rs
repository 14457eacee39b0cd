use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_codegen::{Artifact, Catalogue, Emitter, EmitterOptions, banner, builder::CodeBuilder};
use propgen_core::{escape_dots, replace_wildcard};
use propgen_schema::Section;

/// Default destination, relative to the project root.
pub const DESTINATION: &str = "java/src/IceInternal";

const EXT: &str = "java";

/// Writes `<Class>.java`, a final class of `Property[]` tables whose
/// patterns are Java regular expressions.
pub struct JavaEmitter {
    options: EmitterOptions,
    artifact: Artifact,
    catalogue: Catalogue,
}

impl JavaEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            artifact: Artifact::new(&options.class_name, &options.staging_dir),
            catalogue: Catalogue::new(options.sections.clone()),
            options,
        }
    }

    /// Options with the default destination.
    pub fn default_options(class_name: &str, input_file: &str) -> EmitterOptions {
        EmitterOptions::new(class_name, input_file, DESTINATION)
    }
}

/// Pattern as it appears inside a Java string literal: dots and the
/// wildcard are escaped twice, once for the regex and once for the literal.
pub fn pattern(section: &str, name: &str) -> String {
    let name = replace_wildcard(&escape_dots(name, "\\\\."), "[^\\\\s]+");
    format!("{}\\\\.{}", section, name)
}

impl Emitter for JavaEmitter {
    fn id(&self) -> &'static str {
        "java"
    }

    fn start_files(&mut self) -> Result<()> {
        let preamble = format!(
            "{}\npackage IceInternal;\n\npublic final class {}\n{{\n",
            banner(&self.options.input_file),
            self.options.class_name
        );
        self.artifact.create(EXT)?;
        tracing::trace!(backend = "java", class = %self.options.class_name, "started");
        self.artifact.write(EXT, &preamble)
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        if !self.catalogue.open_section(section) {
            return Ok(());
        }
        let text = CodeBuilder::default()
            .indent()
            .line(&format!(
                "public static final Property {}Props[] =",
                section.name
            ))
            .line("{")
            .build();
        self.artifact.write(EXT, &text)
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
        let replacement = deprecated_by.map_or_else(|| "null".to_string(), |by| format!("\"{by}\""));
        let line = format!(
            "        new Property(\"{}\", {}, {}),\n",
            pattern(section, name),
            deprecated,
            replacement
        );
        self.artifact.write(EXT, &line)
    }

    fn close_section(&mut self) -> Result<()> {
        if self.catalogue.close_section().is_none() {
            return Ok(());
        }
        self.artifact.write(EXT, "        null\n    };\n\n")
    }

    fn close_files(&mut self) -> Result<()> {
        let tables = CodeBuilder::default()
            .blank()
            .indent()
            .line("public static final Property[] validProps[] =")
            .block_with_close("{", "};", |b| {
                b.each(self.catalogue.sections(), |b, s| {
                    b.line(&format!("{}Props,", s))
                })
                .line("null")
            })
            .blank()
            .line("public static final String clPropNames[] =")
            .block_with_close("{", "};", |b| {
                b.each(self.catalogue.command_line_names(), |b, s| {
                    b.line(&format!("\"{}\",", s))
                })
                .line("null")
            })
            .dedent()
            .line("}")
            .build();
        self.artifact.write(EXT, &tables)?;
        self.artifact.close()
    }

    fn cleanup(&mut self) -> Result<()> {
        self.artifact.discard()
    }

    fn relocate(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        self.artifact.relocate(&root.join(&self.options.destination))
    }
}
