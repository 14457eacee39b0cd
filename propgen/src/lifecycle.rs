//! One generation run, from class table to relocated files.
//!
//! ```text
//! Init -> ClassTableBuilt -> Streaming -> Finalized
//!                                     \-> Aborted
//! ```
//!
//! Any failure after `Init` aborts the run: every staged file is removed
//! and the originating error is returned. A signal that arrives once the
//! files are relocated leaves them in place, but the run still reports
//! [`Interrupted`].

use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_codegen::Emitter;
use propgen_schema::{PropertyEvent, SchemaFile};
use thiserror::Error;

use crate::interrupt::Interruption;

/// The run was stopped by a signal.
#[derive(Debug, Error)]
#[error("interrupted by signal {signal}")]
pub struct Interrupted {
    pub signal: i32,
}

impl Interrupted {
    /// Conventional shell exit status, `128 + signal`.
    pub fn exit_code(&self) -> u8 {
        u8::try_from(128 + self.signal).unwrap_or(u8::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    ClassTableBuilt,
    Streaming,
    Finalized,
    Aborted,
}

/// What a finalized run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub classes: usize,
    pub sections: usize,
    pub properties: usize,
    /// Final location of every generated file.
    pub relocated: Vec<PathBuf>,
}

/// Drives an emitter through a schema and owns cleanup on failure.
pub struct Lifecycle<'a, E, I> {
    emitter: E,
    interruption: &'a I,
    phase: Phase,
}

impl<'a, E: Emitter, I: Interruption> Lifecycle<'a, E, I> {
    pub fn new(emitter: E, interruption: &'a I) -> Self {
        Self {
            emitter,
            interruption,
            phase: Phase::Init,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generate from `schema` and relocate the output below `root`.
    pub fn run(&mut self, schema: &SchemaFile, root: &Path) -> Result<RunSummary> {
        match self.drive(schema, root) {
            Ok(summary) => {
                self.phase = Phase::Finalized;
                tracing::info!(files = summary.relocated.len(), "generation finished");
                if let Some(signal) = self.interruption.pending() {
                    tracing::warn!(signal, "interrupted after relocation, generated files kept");
                    return Err(Interrupted { signal }.into());
                }
                Ok(summary)
            }
            Err(e) => {
                self.abort(&e);
                Err(e)
            }
        }
    }

    fn drive(&mut self, schema: &SchemaFile, root: &Path) -> Result<RunSummary> {
        let classes = schema.classes().map_err(|e| eyre::Report::new(*e))?;
        self.phase = Phase::ClassTableBuilt;
        tracing::debug!(classes = classes.len(), "class table built");

        let mut summary = RunSummary {
            classes: classes.len(),
            ..RunSummary::default()
        };

        self.emitter.start_files()?;
        self.phase = Phase::Streaming;

        for event in schema.events(&classes) {
            // Also covers close_files, which `Done` triggers.
            self.poll()?;
            let event = event.map_err(|e| eyre::Report::new(*e))?;
            if let PropertyEvent::SectionStart(section) = &event {
                tracing::debug!(section = %section.name, "section");
                summary.sections += 1;
            } else if let Some(name) = event.property_name() {
                tracing::trace!(kind = event.kind(), name, "property");
                summary.properties += 1;
            }
            self.emitter.dispatch(&event)?;
        }

        self.poll()?;
        summary.relocated = self.emitter.relocate(root)?;
        Ok(summary)
    }

    fn poll(&self) -> Result<()> {
        match self.interruption.pending() {
            Some(signal) => Err(Interrupted { signal }.into()),
            None => Ok(()),
        }
    }

    fn abort(&mut self, cause: &eyre::Report) {
        tracing::debug!(phase = ?self.phase, error = %cause, "aborting run");
        self.phase = Phase::Aborted;
        if let Err(e) = self.emitter.cleanup() {
            tracing::error!(error = %e, "cleanup failed");
        }
    }
}
