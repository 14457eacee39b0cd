//! Java backend for propgen.
//!
//! Produces `<Class>.java` in package `IceInternal`. Every table is
//! terminated by a `null` entry.

mod emitter;

pub use emitter::{DESTINATION, JavaEmitter, pattern};
