use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn blank_module_error(&self, section: &str, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::BlankModuleName {
            src: self.named_source(),
            span,
            section: section.to_string(),
        })
    }

    pub fn invalid_regex_error(
        &self,
        pattern: &str,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidRegex {
            src: self.named_source(),
            span,
            pattern: pattern.to_string(),
            reason: reason.into(),
        })
    }

    pub fn invalid_glob_error(
        &self,
        pattern: &str,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidGlob {
            src: self.named_source(),
            span,
            pattern: pattern.to_string(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a sourcemod.toml or pass its location with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sourcemod.toml")]
    #[diagnostic(code(sourcemod::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("module name in [{section}] is blank")]
    #[diagnostic(
        code(sourcemod::blank_module),
        help("use the qualified module name, e.g. 'sourcemod.transform.StripAnnotation'")
    )]
    BlankModuleName {
        #[source_code]
        src: NamedSource<String>,
        #[label("blank name")]
        span: Option<SourceSpan>,
        section: String,
    },

    #[error("invalid replacement pattern '{pattern}'")]
    #[diagnostic(code(sourcemod::invalid_regex), help("{reason}"))]
    InvalidRegex {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a valid regular expression")]
        span: Option<SourceSpan>,
        pattern: String,
        reason: String,
    },

    #[error("invalid glob pattern '{pattern}'")]
    #[diagnostic(code(sourcemod::invalid_glob), help("{reason}"))]
    InvalidGlob {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a valid glob")]
        span: Option<SourceSpan>,
        pattern: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(sourcemod::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
