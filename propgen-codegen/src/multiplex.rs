//! An emitter that drives several backends from one pass.

use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_schema::Section;

use crate::Emitter;

/// Broadcasts every call to a set of emitters, in registration order.
///
/// There is no error isolation: a streaming call reaches every emitter even
/// when an earlier one failed, and the first error is returned afterwards.
/// Relocation stops at the first failure so that the remaining backends
/// keep their files staged and `cleanup` can still remove them.
#[derive(Default)]
pub struct Multiplexer {
    emitters: Vec<Box<dyn Emitter>>,
}

impl Multiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an emitter.
    pub fn with(mut self, emitter: impl Emitter + 'static) -> Self {
        self.emitters.push(Box::new(emitter));
        self
    }

    /// Register several boxed emitters.
    pub fn extend(&mut self, emitters: impl IntoIterator<Item = Box<dyn Emitter>>) {
        self.emitters.extend(emitters);
    }

    /// Identifiers of the registered emitters.
    pub fn ids(&self) -> Vec<&'static str> {
        self.emitters.iter().map(|e| e.id()).collect()
    }

    fn forward<F>(&mut self, call: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&mut dyn Emitter) -> Result<()>,
    {
        let mut first_error = None;
        for emitter in &mut self.emitters {
            if let Err(e) = f(emitter.as_mut()) {
                tracing::error!(backend = emitter.id(), call, error = %e, "backend failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Emitter for Multiplexer {
    fn id(&self) -> &'static str {
        "all"
    }

    fn start_files(&mut self) -> Result<()> {
        self.forward("start_files", |e| e.start_files())
    }

    fn new_section(&mut self, section: &Section) -> Result<()> {
        self.forward("new_section", |e| e.new_section(section))
    }

    fn property(
        &mut self,
        name: &str,
        deprecated: bool,
        deprecated_by: Option<&str>,
    ) -> Result<()> {
        self.forward("property", |e| e.property(name, deprecated, deprecated_by))
    }

    fn close_section(&mut self) -> Result<()> {
        self.forward("close_section", |e| e.close_section())
    }

    fn close_files(&mut self) -> Result<()> {
        self.forward("close_files", |e| e.close_files())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.forward("cleanup", |e| e.cleanup())
    }

    fn relocate(&mut self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut moved = Vec::new();
        for emitter in &mut self.emitters {
            moved.extend(emitter.relocate(root)?);
        }
        Ok(moved)
    }
}
