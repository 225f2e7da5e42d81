//! Include/exclude glob filtering.

use glob::{MatchOptions, Pattern};

use crate::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which root-relative paths are filtered out.
///
/// A path is filtered out when `exclude_by_default` is set and it matches no
/// include pattern, or when it matches any exclude pattern. `*` stays within
/// one path segment, `**` spans segments, and a pattern ending in `/` matches
/// everything below that directory.
#[derive(Debug, Clone)]
pub struct Filter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
    exclude_by_default: bool,
}

impl Filter {
    pub fn new<I, E>(includes: I, excludes: E, exclude_by_default: bool) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
            exclude_by_default,
        })
    }

    pub fn is_filtered(&self, path: &str) -> bool {
        let path = normalize(path);
        (self.exclude_by_default && !matches_any(&path, &self.includes))
            || matches_any(&path, &self.excludes)
    }

    pub fn accepts(&self, path: &str) -> bool {
        !self.is_filtered(path)
    }
}

fn compile_all<P>(patterns: P) -> Result<Vec<Pattern>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| compile(pattern.as_ref()))
        .collect()
}

fn compile(pattern: &str) -> Result<Pattern> {
    let mut normalized = normalize(pattern);
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }
    Pattern::new(&normalized).map_err(|source| Error::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn matches_any(path: &str, patterns: &[Pattern]) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_with(path, MATCH_OPTIONS))
}
