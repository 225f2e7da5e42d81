use std::path::PathBuf;

use sourcemod_core::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal pipeline errors. Any of these aborts the run; output written before
/// the failure stays in place.
#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't resolve {capability} '{name}'")]
    Resolution {
        name: String,
        capability: &'static str,
    },

    #[error("module '{name}' does not implement the {capability} capability")]
    Contract {
        name: String,
        capability: &'static str,
    },

    #[error("couldn't create instance of {capability} '{name}'")]
    Instantiation {
        name: String,
        capability: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("module '{name}' failed on '{target}'")]
    ModuleFailed {
        name: String,
        target: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Creation(#[from] CreationError),

    #[error("failed to parse '{path}'")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid replacement pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid glob pattern '{pattern}'")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Violations of the namespace tree invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreationError {
    #[error("can't create '{name}' in the root namespace")]
    RootNamespace { name: String },

    #[error("invalid unit name '{name}' in '{namespace}'")]
    BlankName { namespace: String, name: String },

    #[error(
        "unit creation doesn't create namespaces, remove the separators from the name '{name}'"
    )]
    QualifiedName { name: String },

    #[error("there is already a unit named '{name}' in '{namespace}'")]
    DuplicateUnit { namespace: String, name: String },

    #[error("generated unit '{name}' in '{namespace}' was renamed to '{renamed}'")]
    RenamedUnit {
        namespace: String,
        name: String,
        renamed: String,
    },

    #[error("namespace path '{path}' contains a blank segment")]
    BlankSegment { path: String },
}
