//! Generate command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Result of a finalized generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub schema: PathBuf,
    /// Ids of the backends that ran.
    pub backends: Vec<&'static str>,
    pub classes: usize,
    pub sections: usize,
    pub properties: usize,
    /// `[backends.<id>]` tables that matched no backend.
    pub unknown_backends: Vec<String>,
    pub files: Vec<PathBuf>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for id in &self.unknown_backends {
            out.warning(&format!("propgen.toml configures unknown backend '{}'", id));
        }

        out.key_value("Schema", &self.schema.display().to_string());
        out.key_value("Backends", &self.backends.join(", "));
        out.key_value(
            "Properties",
            &format!(
                "{} in {} section{} ({} class{})",
                self.properties,
                self.sections,
                if self.sections == 1 { "" } else { "s" },
                self.classes,
                if self.classes == 1 { "" } else { "es" },
            ),
        );
        out.newline();

        out.section("Generated");
        for file in &self.files {
            out.added_item(&file.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render() {
        let report = GenerateReport {
            schema: PathBuf::from("config/PropertyNames.xml"),
            backends: vec!["cpp", "java"],
            classes: 1,
            sections: 2,
            properties: 12,
            unknown_backends: vec!["rust".to_string()],
            files: vec![PathBuf::from("cpp/src/Ice/PropertyNames.h")],
        };
        let mut out = BufferOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "warning: propgen.toml configures unknown backend 'rust'",
                "Schema: config/PropertyNames.xml",
                "Backends: cpp, java",
                "Properties: 12 in 2 sections (1 class)",
                "",
                "Generated:",
                "  + cpp/src/Ice/PropertyNames.h",
            ]
        );
    }
}
