// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Parsing and validation of `sourcemod.toml`.
//!
//! The manifest binds the host parameters of the three goals: `[modify]`
//! (transformers and rename rules), `[generate]` (generators) and `[delete]`
//! (removal of previously emitted sources).

mod error;
mod file;
mod manifest;
mod parse;
mod validate;

pub use error::{Error, Result};
pub use file::SourcemodToml;
pub use manifest::{DeleteConfig, GenerateConfig, Manifest, ModifyConfig, ModuleSpec, Replacement};
pub use parse::parse_manifest;
