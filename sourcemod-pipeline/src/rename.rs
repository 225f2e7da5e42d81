//! Output file name rewriting and reference fixups.

use regex::{NoExpand, Regex};
use sourcemod_manifest::Replacement;

use crate::{Error, Result};

/// A literal or anchored-regex rewrite of an output file name.
#[derive(Debug, Clone)]
pub enum ReplacementRule {
    /// Replace every occurrence of `pattern`.
    Literal { pattern: String, replace: String },
    /// Rewrite names the expression matches in full. With a capture group only
    /// the span of group 1 is replaced; otherwise the whole name is.
    Regex { regex: Regex, replace: String },
}

impl ReplacementRule {
    pub fn literal(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::Literal {
            pattern: pattern.into(),
            replace: replace.into(),
        }
    }

    pub fn regex(pattern: &str, replace: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self::Regex {
            regex,
            replace: replace.into(),
        })
    }

    /// Build the rules for a manifest's replacement list, dropping rules with
    /// a blank pattern.
    pub fn from_replacements(replacements: &[Replacement]) -> Result<Vec<Self>> {
        replacements
            .iter()
            .filter(|replacement| !replacement.pattern.trim().is_empty())
            .map(|replacement| {
                if replacement.regex {
                    Self::regex(&replacement.pattern, replacement.replace.as_str())
                } else {
                    Ok(Self::literal(
                        replacement.pattern.as_str(),
                        replacement.replace.as_str(),
                    ))
                }
            })
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Literal { pattern, .. } => pattern.trim().is_empty(),
            Self::Regex { .. } => false,
        }
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Literal { pattern, replace } => {
                if pattern.trim().is_empty() {
                    name.to_string()
                } else {
                    name.replace(pattern.as_str(), replace)
                }
            }
            Self::Regex { regex, replace } => {
                let Some(captures) = regex.captures(name) else {
                    return name.to_string();
                };
                if regex.captures_len() > 1 {
                    match captures.get(1) {
                        Some(group) => {
                            format!("{}{}{}", &name[..group.start()], replace, &name[group.end()..])
                        }
                        None => name.to_string(),
                    }
                } else {
                    replace.clone()
                }
            }
        }
    }
}

/// Apply every rule in order.
pub fn rename(name: &str, rules: &[ReplacementRule]) -> String {
    rules
        .iter()
        .fold(name.to_string(), |current, rule| rule.apply(&current))
}

/// Replace whole-word occurrences of `old` with `new` in `text`.
pub fn fixup_references(text: &str, old: &str, new: &str) -> String {
    if old.is_empty() || old == new {
        return text.to_string();
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(old))) {
        Ok(word) => word.replace_all(text, NoExpand(new)).into_owned(),
        Err(_) => text.to_string(),
    }
}
