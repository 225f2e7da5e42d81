use eyre::{Result, WrapErr};
use regex::Regex;
use sourcemod_core::SourceUnit;
use sourcemod_pipeline::{Properties, Transformer};

#[derive(Debug)]
enum Matcher {
    Literal(String),
    Regex(Regex),
}

/// Replaces occurrences of a literal or regex pattern in declaration bodies.
///
/// Regex replacements may refer to capture groups (`$1`, `${name}`).
#[derive(Debug)]
pub struct ReplaceText {
    matcher: Matcher,
    replace: String,
}

impl ReplaceText {
    pub const NAME: &'static str = "sourcemod.transform.ReplaceText";

    pub fn literal(pattern: impl Into<String>, replace: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            eyre::bail!("pattern must not be empty");
        }
        Ok(Self {
            matcher: Matcher::Literal(pattern),
            replace: replace.into(),
        })
    }

    pub fn regex(pattern: &str, replace: impl Into<String>) -> Result<Self> {
        let regex =
            Regex::new(pattern).wrap_err_with(|| format!("invalid pattern '{pattern}'"))?;
        Ok(Self {
            matcher: Matcher::Regex(regex),
            replace: replace.into(),
        })
    }

    pub(crate) fn configured(properties: &Properties) -> Result<Box<dyn Transformer>> {
        let pattern = properties.require("pattern")?;
        let replace = properties.get_or("replace", "");
        let transformer = if properties.flag("regex") {
            Self::regex(pattern, replace)?
        } else {
            Self::literal(pattern, replace)?
        };
        Ok(Box::new(transformer))
    }
}

impl Transformer for ReplaceText {
    fn can_transform(&self, unit: &SourceUnit) -> bool {
        match &self.matcher {
            Matcher::Literal(pattern) => unit.body().contains(pattern.as_str()),
            Matcher::Regex(regex) => regex.is_match(unit.body()),
        }
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> Result<()> {
        let body = match &self.matcher {
            Matcher::Literal(pattern) => unit.body().replace(pattern.as_str(), &self.replace),
            Matcher::Regex(regex) => regex
                .replace_all(unit.body(), self.replace.as_str())
                .into_owned(),
        };
        unit.set_body(body);
        Ok(())
    }
}
