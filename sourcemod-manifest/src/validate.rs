//! Validation of a parsed manifest.

use miette::SourceSpan;

use crate::{Manifest, ModuleSpec, Result, error::SourceContext};

pub(crate) fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let modify = &manifest.modify;
    validate_globs(ctx, &modify.includes)?;
    validate_globs(ctx, &modify.excludes)?;
    validate_modules(ctx, "modify.transformers", &modify.transformers)?;
    for replacement in &modify.replacements {
        if !replacement.regex || replacement.pattern.trim().is_empty() {
            continue;
        }
        if let Err(e) = regex::Regex::new(&replacement.pattern) {
            return Err(ctx.invalid_regex_error(
                &replacement.pattern,
                e.to_string(),
                find_value_span(ctx.src(), &replacement.pattern),
            ));
        }
    }

    let generate = &manifest.generate;
    validate_globs(ctx, &generate.includes)?;
    validate_globs(ctx, &generate.excludes)?;
    validate_modules(ctx, "generate.generators", &generate.generators)?;
    let extension = generate.extension.trim();
    if extension.is_empty() || extension.starts_with('.') || extension.contains('/') {
        return Err(ctx.validation_error(
            format!(
                "generation extension '{}' must be a bare extension such as 'java'",
                generate.extension
            ),
            find_key_span(ctx.src(), "extension"),
        ));
    }

    let delete = &manifest.delete;
    validate_globs(ctx, &delete.includes)?;
    validate_globs(ctx, &delete.excludes)?;

    Ok(())
}

fn validate_modules(ctx: &SourceContext, section: &str, modules: &[ModuleSpec]) -> Result<()> {
    for module in modules {
        if module.name.trim().is_empty() {
            return Err(ctx.blank_module_error(section, find_value_span(ctx.src(), &module.name)));
        }
    }
    Ok(())
}

fn validate_globs(ctx: &SourceContext, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        if let Err(e) = glob::Pattern::new(&pattern.replace('\\', "/")) {
            return Err(ctx.invalid_glob_error(
                pattern,
                e.to_string(),
                find_value_span(ctx.src(), pattern),
            ));
        }
    }
    Ok(())
}

/// Find the span of a quoted string value in the TOML source.
///
/// Basic strings escape backslashes, so the escaped form is tried as well.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let escaped = value.replace('\\', "\\\\");
    let candidates = [
        (format!("\"{}\"", value), value.len()),
        (format!("\"{}\"", escaped), escaped.len()),
        (format!("'{}'", value), value.len()),
    ];
    for (pattern, len) in &candidates {
        if let Some(pos) = src.find(pattern.as_str()) {
            return Some(SourceSpan::from((pos + 1, *len)));
        }
    }
    None
}

/// Find the span of a `key =` assignment in the TOML source.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    src.match_indices(key)
        .find(|(pos, _)| {
            let at_line_start = src[..*pos]
                .rsplit('\n')
                .next()
                .is_some_and(|prefix| prefix.trim().is_empty());
            at_line_start && src[pos + key.len()..].trim_start().starts_with('=')
        })
        .map(|(pos, _)| SourceSpan::from((pos, key.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value_span_double_quotes() {
        let src = r#"name = "sourcemod.generate.Constants""#;
        let span = find_value_span(src, "sourcemod.generate.Constants").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), "sourcemod.generate.Constants".len());
    }

    #[test]
    fn test_find_value_span_escaped() {
        let src = r#"pattern = "(.*)\\.java""#;
        let span = find_value_span(src, r"(.*)\.java").unwrap();
        assert_eq!(span.offset(), 11);
        assert_eq!(span.len(), r"(.*)\\.java".len());
    }

    #[test]
    fn test_find_value_span_missing() {
        assert!(find_value_span("a = 'b'", "c").is_none());
    }

    #[test]
    fn test_find_key_span_skips_values() {
        let src = "name = \"extension\"\nextension = \".java\"";
        let span = find_key_span(src, "extension").unwrap();
        assert_eq!(span.offset(), 19);
    }
}
