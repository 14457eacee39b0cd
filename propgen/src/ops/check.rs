//! Check operation: parse and expand a schema without writing files.

use std::path::Path;

use eyre::Result;
use propgen_schema::{PropertyEvent, SchemaFile};

use crate::reports::{CheckReport, ClassInfo, SectionInfo};

/// Execute the check operation.
///
/// Builds the class table and drains the event stream, so every error a
/// generation run would hit is reported here too.
pub fn check(schema_path: &Path) -> Result<CheckReport> {
    let schema = SchemaFile::open(schema_path).map_err(|e| eyre::Report::new(*e))?;
    let classes = schema.classes().map_err(|e| eyre::Report::new(*e))?;

    let mut sections: Vec<SectionInfo> = Vec::new();
    for event in schema.events(&classes) {
        let event = event.map_err(|e| eyre::Report::new(*e))?;
        match event {
            PropertyEvent::SectionStart(section) => sections.push(SectionInfo {
                name: section.name,
                properties: 0,
                deprecated: 0,
                command_line: section.command_line,
            }),
            PropertyEvent::Property { .. } => count(&mut sections, false),
            PropertyEvent::DeprecatedProperty { .. }
            | PropertyEvent::DeprecatedWithReplacement { .. } => count(&mut sections, true),
            PropertyEvent::SectionEnd | PropertyEvent::Done => {}
        }
    }

    Ok(CheckReport {
        schema: schema_path.to_path_buf(),
        classes: classes
            .iter()
            .map(|class| ClassInfo {
                name: class.name.clone(),
                suffixes: class.children.len(),
                prefix_only: class.prefix_only,
            })
            .collect(),
        sections,
    })
}

fn count(sections: &mut [SectionInfo], deprecated: bool) {
    // The stream never yields a property outside a section.
    if let Some(section) = sections.last_mut() {
        section.properties += 1;
        if deprecated {
            section.deprecated += 1;
        }
    }
}
