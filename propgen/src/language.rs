//! Unified backend dispatch.
//!
//! Centralizes backend-specific emitter creation and configuration.

use std::path::Path;

use propgen_codegen::{Emitter, EmitterOptions, Multiplexer, SectionFilter};
use propgen_codegen_cpp::CppEmitter;
use propgen_codegen_csharp::CSharpEmitter;
use propgen_codegen_java::JavaEmitter;
use propgen_codegen_js::JsEmitter;
use propgen_schema::ProjectConfig;

/// A supported output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Cpp,
    Java,
    CSharp,
    Js,
}

impl Backend {
    /// Every backend, in the order the multiplexer drives them.
    pub const ALL: [Backend; 4] = [Backend::Cpp, Backend::Java, Backend::CSharp, Backend::Js];

    /// Identifier used by `--<id>` and `[backends.<id>]`.
    pub fn id(self) -> &'static str {
        match self {
            Backend::Cpp => "cpp",
            Backend::Java => "java",
            Backend::CSharp => "cs",
            Backend::Js => "js",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }

    fn default_options(self, class_name: &str, input_file: &str) -> EmitterOptions {
        match self {
            Backend::Cpp => CppEmitter::default_options(class_name, input_file),
            Backend::Java => JavaEmitter::default_options(class_name, input_file),
            Backend::CSharp => CSharpEmitter::default_options(class_name, input_file),
            Backend::Js => JsEmitter::default_options(class_name, input_file),
        }
    }

    /// Backend defaults with `[backends.<id>]` overrides applied.
    pub fn options(
        self,
        class_name: &str,
        input_file: &str,
        staging_dir: &Path,
        config: &ProjectConfig,
    ) -> EmitterOptions {
        let mut options = self
            .default_options(class_name, input_file)
            .with_staging_dir(staging_dir);

        if let Some(overrides) = config.backend(self.id()) {
            if let Some(destination) = &overrides.destination {
                options = options.with_destination(destination);
            }
            if let Some(sections) = &overrides.sections {
                options = options.with_sections(SectionFilter::only(sections.iter().cloned()));
            }
        }
        options
    }

    /// Create the emitter for this backend.
    pub fn emitter(self, options: EmitterOptions) -> Box<dyn Emitter> {
        match self {
            Backend::Cpp => Box::new(CppEmitter::new(options)),
            Backend::Java => Box::new(JavaEmitter::new(options)),
            Backend::CSharp => Box::new(CSharpEmitter::new(options)),
            Backend::Js => Box::new(JsEmitter::new(options)),
        }
    }
}

/// `[backends.<id>]` tables that name no backend.
pub fn unknown_backends(config: &ProjectConfig) -> Vec<String> {
    config
        .backends
        .keys()
        .filter(|id| Backend::from_id(id).is_none())
        .cloned()
        .collect()
}

/// Emitters for one run: the selected backend, or every backend behind a multiplexer.
pub fn emitter_for(
    selected: Option<Backend>,
    class_name: &str,
    input_file: &str,
    staging_dir: &Path,
    config: &ProjectConfig,
) -> Box<dyn Emitter> {
    let build = |backend: Backend| {
        backend.emitter(backend.options(class_name, input_file, staging_dir, config))
    };
    match selected {
        Some(backend) => build(backend),
        None => {
            let mut mux = Multiplexer::new();
            mux.extend(Backend::ALL.into_iter().map(build));
            tracing::debug!(backends = ?mux.ids(), "multiplexing every backend");
            Box::new(mux)
        }
    }
}
