//! Check command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// A property class declared by the schema.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    pub suffixes: usize,
    pub prefix_only: bool,
}

/// A section and the number of properties it expands to.
#[derive(Debug)]
pub struct SectionInfo {
    pub name: String,
    pub properties: usize,
    pub deprecated: usize,
    pub command_line: bool,
}

/// Report data from schema validation.
#[derive(Debug)]
pub struct CheckReport {
    pub schema: PathBuf,
    pub classes: Vec<ClassInfo>,
    pub sections: Vec<SectionInfo>,
}

impl CheckReport {
    pub fn total_properties(&self) -> usize {
        self.sections.iter().map(|s| s.properties).sum()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.schema.display()));
        out.newline();

        out.section(&format!("Classes ({})", self.classes.len()));
        for class in &self.classes {
            let kind = if class.prefix_only { ", prefix only" } else { "" };
            out.list_item(&format!("{} ({} suffixes{})", class.name, class.suffixes, kind));
        }
        out.newline();

        out.section(&format!(
            "Sections ({}, {} properties)",
            self.sections.len(),
            self.total_properties()
        ));
        for section in &self.sections {
            let mut line = format!("{}: {}", section.name, section.properties);
            if section.deprecated > 0 {
                line.push_str(&format!(" ({} deprecated)", section.deprecated));
            }
            if !section.command_line {
                line.push_str(" [noCmdLine]");
            }
            out.list_item(&line);
        }
    }
}
