//! Core utilities and types for the propgen property table generator.
//!
//! This crate provides the staged file lifecycle shared by every backend
//! and the string helpers used to render property patterns.

mod file;
mod utils;

// File lifecycle
pub use file::StagedFile;
// String utilities
pub use utils::{WILDCARD, class_name_from_path, escape_dots, replace_wildcard};
