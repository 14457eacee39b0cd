use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_codegen::{Artifact, Catalogue, Emitter, EmitterOptions, banner, builder::CodeBuilder};
use propgen_schema::Section;

use crate::pattern;

/// Default destination, relative to the project root.
pub const DESTINATION: &str = "cs/src/Ice";

const EXT: &str = "cs";

/// Property records sit one column deeper than the array braces.
const RECORD_INDENT: &str = "             ";

/// Writes `<Class>.cs`.
pub struct CSharpEmitter {
    options: EmitterOptions,
    artifact: Artifact,
    catalogue: Catalogue,
}

impl CSharpEmitter {
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

    fn preamble(&self) -> String {
        CodeBuilder::default()
            .raw(&banner(&self.options.input_file))
            .blank()
            .line("namespace IceInternal")
            .line("{")
            .indent()
            .line(&format!("public sealed class {}", self.options.class_name))
            .line("{")
            .build()
    }
}

impl Emitter for CSharpEmitter {
    fn id(&self) -> &'static str {
        "cs"
    }

    fn start_files(&mut self) -> Result<()> {
        let preamble = self.preamble();
        self.artifact.create(EXT)?;
        self.artifact.write(EXT, &preamble)
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        if !self.catalogue.open_section(section) {
            return Ok(());
        }
        let text = CodeBuilder::default()
            .at_level(2)
            .line(&format!("public static Property[] {}Props =", section.name))
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
        let replacement = match deprecated_by {
            Some(by) => format!("@\"{}\"", by),
            None => "null".to_string(),
        };
        let line = format!(
            "{}new Property(@\"{}\", {}, {}),\n",
            RECORD_INDENT,
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
        let text = format!("{}null\n        }};\n\n", RECORD_INDENT);
        self.artifact.write(EXT, &text)
    }

    fn close_files(&mut self) -> Result<()> {
        let tables = CodeBuilder::default()
            .at_level(2)
            .line("public static Property[][] validProps =")
            .block_with_close("{", "};", |b| {
                b.each(self.catalogue.sections(), |b, s| {
                    b.line(&format!("{}Props,", s))
                })
                .line("null")
            })
            .blank()
            .line("public static string[] clPropNames =")
            .block_with_close("{", "};", |b| {
                b.each(self.catalogue.command_line_names(), |b, s| {
                    b.line(&format!("\"{}\",", s))
                })
                .line("null")
            })
            .dedent()
            .line("}")
            .dedent()
            .line("}")
            .build();
        tracing::debug!(
            backend = "cs",
            sections = self.catalogue.sections().len(),
            "writing tables"
        );
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble() {
        let cs = CSharpEmitter::new(CSharpEmitter::default_options("Props", "Props.xml"));
        insta::assert_snapshot!(cs.preamble(), @r"
        // Generated by propgen from file Props.xml
        //
        // IMPORTANT: Do not edit this file -- any edits made here will be lost!

        namespace IceInternal
        {
            public sealed class Props
            {
        ");
    }
}
