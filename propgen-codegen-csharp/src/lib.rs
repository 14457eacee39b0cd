//! C# backend for propgen.
//!
//! Produces `<Class>.cs`, a sealed class in namespace `IceInternal` whose
//! patterns are anchored verbatim-string regular expressions.

mod emitter;
mod pattern;

pub use emitter::{CSharpEmitter, DESTINATION};
pub use pattern::pattern;
