use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_codegen::{
    Artifact, Catalogue, Emitter, EmitterOptions, SectionFilter, banner, builder::CodeBuilder,
};
use propgen_core::{escape_dots, replace_wildcard};
use propgen_schema::Section;

/// Default destination, relative to the project root.
pub const DESTINATION: &str = "js/src/Ice";

/// Sections emitted unless `propgen.toml` says otherwise.
pub const DEFAULT_SECTIONS: &[&str] = &["Ice"];

const EXT: &str = "js";

/// `/^Section\.name/`. The wildcard matches a single character.
pub fn pattern(section: &str, name: &str) -> String {
    let name = replace_wildcard(&escape_dots(name, r"\."), ".");
    format!(r"/^{}\.{}/", section, name)
}

/// Writes `<Class>.js`.
///
/// Unlike the other backends the arrays carry no `null` terminator.
pub struct JsEmitter {
    options: EmitterOptions,
    artifact: Artifact,
    catalogue: Catalogue,
}

impl JsEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            artifact: Artifact::new(&options.class_name, &options.staging_dir),
            catalogue: Catalogue::new(options.sections.clone()),
            options,
        }
    }

    /// Options with the default destination and section allow-list.
    pub fn default_options(class_name: &str, input_file: &str) -> EmitterOptions {
        EmitterOptions::new(class_name, input_file, DESTINATION)
            .with_sections(SectionFilter::only(DEFAULT_SECTIONS.iter().copied()))
    }

    fn preamble(&self) -> String {
        let class_name = &self.options.class_name;
        CodeBuilder::default()
            .raw(&banner(&self.options.input_file))
            .blank()
            .line("(function(global){")
            .indent()
            .line("var Ice = global.Ice || Ice;")
            .line("require(\"Ice/Property\");")
            .line(&format!("var {} = {{}};", class_name))
            .line("var Property = Ice.Property;")
            .line("/* jshint -W044*/")
            .blank()
            .build()
    }

    fn epilogue(&self) -> String {
        let class_name = &self.options.class_name;
        CodeBuilder::default()
            .indent()
            .line("/* jshint +W044*/")
            .blank()
            .line(&format!("{}.validProps =", class_name))
            .block_with_close("[", "];", |b| {
                b.each(self.catalogue.sections(), |b, s| {
                    b.line(&format!("{}.{}Props,", class_name, s))
                })
            })
            .blank()
            .line(&format!("{}.clPropNames =", class_name))
            .block_with_close("[", "];", |b| {
                b.each(self.catalogue.command_line_names(), |b, s| {
                    b.line(&format!("\"{}\",", s))
                })
            })
            .blank()
            .line(&format!("Ice.{0} = {0};", class_name))
            .line("global.Ice = Ice;")
            .dedent()
            .line("}(typeof (global) === \"undefined\" ? window : global));")
            .build()
    }
}

impl Emitter for JsEmitter {
    fn id(&self) -> &'static str {
        "js"
    }

    fn start_files(&mut self) -> Result<()> {
        let preamble = self.preamble();
        self.artifact.create(EXT)?;
        self.artifact.write(EXT, &preamble)
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        if !self.catalogue.open_section(section) {
            tracing::trace!(backend = "js", section = %section.name, "section not exported");
            return Ok(());
        }
        let text = format!(
            "    {}.{}Props =\n    [\n",
            self.options.class_name, section.name
        );
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
        self.artifact.write(EXT, "    ];\n\n")
    }

    fn close_files(&mut self) -> Result<()> {
        let epilogue = self.epilogue();
        self.artifact.write(EXT, &epilogue)?;
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
    fn test_pattern() {
        assert_eq!(pattern("Ice", "Trace.Network"), r"/^Ice\.Trace\.Network/");
        assert_eq!(pattern("Ice", "Admin.[any]"), r"/^Ice\.Admin\../");
    }

    #[test]
    fn test_default_allow_list() {
        let options = JsEmitter::default_options("P", "P.xml");
        assert!(options.sections.allows("Ice"));
        assert!(!options.sections.allows("IceBox"));
    }

    #[test]
    fn test_empty_epilogue() {
        let js = JsEmitter::new(JsEmitter::default_options("Props", "Props.xml"));
        insta::assert_snapshot!(js.epilogue(), @r#"
            /* jshint +W044*/

            Props.validProps =
            [
            ];

            Props.clPropNames =
            [
            ];

            Ice.Props = Props;
            global.Ice = Ice;
        }(typeof (global) === "undefined" ? window : global));
        "#);
    }
}
