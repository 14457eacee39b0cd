//! C++ backend for propgen.
//!
//! Produces `<Class>.h` and `<Class>.cpp` in the `IceInternal` namespace.
//! Patterns keep their dots and render `[any]` as `*`.

mod emitter;
mod render;

pub use emitter::{CppEmitter, DESTINATION};
