//! Emitter abstraction and shared code generation utilities for propgen.
//!
//! Backends (`propgen-codegen-cpp`, `propgen-codegen-java`, ...) implement
//! [`Emitter`] and use the helpers here to render their tables.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware text building ([`CodeBuilder`](builder::CodeBuilder))
//! - [`artifact`] - The staged output files of one backend
//! - [`catalogue`] - Section bookkeeping and allow-lists
//! - [`emitter`] - The [`Emitter`] trait and its construction options
//! - [`multiplex`] - Fan-out of one event stream to several emitters

pub mod artifact;
pub mod builder;
pub mod catalogue;
pub mod emitter;
pub mod multiplex;

pub use artifact::Artifact;
pub use catalogue::{Catalogue, SectionFilter};
pub use emitter::{Emitter, EmitterOptions, banner};
pub use multiplex::Multiplexer;
