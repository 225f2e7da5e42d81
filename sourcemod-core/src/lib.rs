//! Core types and utilities for the sourcemod build pipeline.
//!
//! This crate provides the parsed [`SourceUnit`] representation shared by
//! transformers and generators, plus the file helpers used when emitting
//! output.

mod file;
mod syntax;
mod unit;
mod utils;

// File operations
pub use file::{copy_file, write_file};
// Source units
pub use unit::{PACKAGE_INFO, ParseError, SourceUnit, UnitKind};
// String utilities
pub use utils::{directory_of, file_name_of, identifier_of, toml_value_to_string};
