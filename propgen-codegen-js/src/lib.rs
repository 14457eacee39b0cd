//! JavaScript backend for propgen.
//!
//! Produces `<Class>.js`, a module that registers the tables on the global
//! `Ice` object. Only allow-listed sections are emitted, `Ice` by default.

mod emitter;

pub use emitter::{DEFAULT_SECTIONS, DESTINATION, JsEmitter, pattern};
