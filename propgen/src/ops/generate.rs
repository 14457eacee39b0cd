//! Generate operation: one schema pass feeding one or all backends.

use std::path::{Path, PathBuf};

use eyre::Result;
use propgen_schema::{Project, SchemaFile};

use crate::{
    interrupt::SignalGuard,
    language::{self, Backend},
    lifecycle::Lifecycle,
    reports::GenerateReport,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Single backend to run; every backend when `None`.
    pub backend: Option<Backend>,
    /// Schema to read; the project's configured schema when `None`.
    pub schema: Option<&'a Path>,
    /// Staging directory; `[generator] staging` or the current directory when `None`.
    pub staging: Option<&'a Path>,
}

/// Execute the generate operation.
pub fn generate(project: &Project, opts: GenerateOptions) -> Result<GenerateReport> {
    let config = project.config();
    let schema_path = opts
        .schema
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project.schema_path());
    let staging = opts
        .staging
        .map(Path::to_path_buf)
        .or_else(|| config.generator.staging.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let schema = SchemaFile::open(&schema_path).map_err(|e| eyre::Report::new(*e))?;
    tracing::info!(schema = %schema_path.display(), staging = %staging.display(), "generating");

    let emitter = language::emitter_for(
        opts.backend,
        schema.class_name(),
        &schema.file_name(),
        &staging,
        config,
    );
    let backends = match opts.backend {
        Some(backend) => vec![backend.id()],
        None => Backend::ALL.iter().map(|b| b.id()).collect(),
    };

    let guard = SignalGuard::install()?;
    let mut lifecycle = Lifecycle::new(emitter, &guard);
    let result = lifecycle.run(&schema, project.root());
    tracing::debug!(phase = ?lifecycle.phase(), "run complete");
    let summary = result?;

    Ok(GenerateReport {
        schema: schema_path,
        backends,
        classes: summary.classes,
        sections: summary.sections,
        properties: summary.properties,
        unknown_backends: language::unknown_backends(config),
        files: summary.relocated,
    })
}
