//! Property schema parsing for propgen.
//!
//! A schema is an XML document of the form:
//!
//! ```xml
//! <properties>
//!   <class name="proxy" prefix-only="false">
//!     <suffix name="Locator" />
//!     <suffix name="Router" deprecatedBy="Routers" />
//!   </class>
//!   <section name="Ice">
//!     <property name="Default.Locator" class="proxy" />
//!     <property name="Admin.[any]" />
//!   </section>
//!   <section name="IceBox" noCmdLine="true">
//!     <property name="ServiceManager.Endpoints" deprecated="true" />
//!   </section>
//! </properties>
//! ```
//!
//! Processing happens in two passes: [`ClassTable::build`] reads every
//! `<class>` up front, then [`PropertyStream`] walks the sections and yields
//! [`PropertyEvent`]s with class references expanded inline.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod attrs;
mod classes;
mod config;
mod error;
mod event;
mod file;
mod stream;

pub use classes::{ClassTable, PropertyClass, SuffixTemplate};
pub use config::{
    BackendConfig, CONFIG_FILE, DEFAULT_SCHEMA, GeneratorConfig, Project, ProjectConfig,
};
pub use error::{Error, Result, SourceContext};
pub use event::{PropertyEvent, Section};
pub use file::SchemaFile;
pub use stream::PropertyStream;
