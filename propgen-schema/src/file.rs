use std::path::{Path, PathBuf};

use propgen_core::class_name_from_path;

use crate::{ClassTable, Error, PropertyStream, Result, SourceContext};

/// Represents a property schema file with its raw content.
#[derive(Debug)]
pub struct SchemaFile {
    path: PathBuf,
    source: SourceContext,
    class_name: String,
}

impl SchemaFile {
    /// Open a schema file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        Self::from_source(path, content)
    }

    /// Build a schema file from in-memory content.
    pub fn from_source(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let class_name = class_name_from_path(&path)
            .ok_or_else(|| Box::new(Error::InvalidPath { path: path.clone() }))?;
        let source = SourceContext::new(content, path.display().to_string());

        Ok(Self {
            path,
            source,
            class_name,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories, as quoted in generated banners.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Name of the generated class, derived from the file stem.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get the source context for error reporting.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Build the class table (tree pre-pass).
    pub fn classes(&self) -> Result<ClassTable> {
        ClassTable::build(&self.source)
    }

    /// Start streaming property events.
    pub fn events<'a>(&'a self, classes: &'a ClassTable) -> PropertyStream<'a> {
        PropertyStream::new(&self.source, classes)
    }
}
