//! Modify operation - transformers and rename rules over existing sources.

use eyre::{Context, Result};
use sourcemod_manifest::SourcemodToml;
use sourcemod_pipeline::{ModuleConfig, ReplacementRule, TransformPipeline, Transformer};
use tracing::info;

use super::SourceSet;
use crate::reports::ModifyReport;

/// Execute the modify goal.
pub fn modify(sourcemod_toml: &SourcemodToml, skip: bool) -> Result<ModifyReport> {
    let config = &sourcemod_toml.manifest().modify;
    let output = sourcemod_toml.resolve(&config.output);

    if skip || config.skip {
        info!("Skipping source modification");
        return Ok(ModifyReport::skipped(output));
    }

    let files = SourceSet {
        roots: &config.roots,
        includes: &config.includes,
        excludes: &config.excludes,
        exclude_by_default: config.exclude_by_default,
    }
    .discover(sourcemod_toml)?;
    if files.is_empty() {
        info!("No sources to modify");
        return Ok(ModifyReport::empty(output));
    }

    let configs: Vec<ModuleConfig> = config.transformers.iter().map(ModuleConfig::from).collect();
    let transformers = sourcemod_modules::registry(&config.classpath)
        .load::<dyn Transformer>(&configs)
        .wrap_err("Failed to load source transformers")?;
    let rules = ReplacementRule::from_replacements(&config.replacements)?;

    let outcome = TransformPipeline::new()
        .transformers(transformers)
        .rules(rules)
        .copy_unmodified(config.copy_unmodified)
        .run(&files, &output)
        .wrap_err("Source modification failed")?;

    Ok(ModifyReport {
        skipped: false,
        discovered: files.len(),
        output,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::ops::testing::{manifest, write};

    const MANIFEST: &str = r#"
[modify]
roots = ["src"]
output = "out"

[[modify.transformers]]
name = "sourcemod.transform.StripAnnotation"
properties = { annotation = "Template" }

[[modify.replacements]]
regex = true
pattern = '\w+(Template)\.java'
replace = ""
"#;

    #[test]
    fn test_modify_resolves_paths_against_manifest() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/a/FooTemplate.java",
            "package a;\n\n@Template\npublic class FooTemplate {}\n",
        );
        write(temp.path(), "src/a/Plain.java", "package a;\n\nclass Plain {}\n");

        let report = modify(&manifest(temp.path(), MANIFEST), false).unwrap();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.outcome.transformed, 1);
        assert_eq!(report.outcome.renamed, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("out/a/Foo.java")).unwrap(),
            "package a;\n\npublic class Foo {}\n"
        );
        assert!(temp.path().join("out/a/Plain.java").exists());
    }

    #[test]
    fn test_skip_flag_has_no_effect_on_disk() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a/Plain.java", "package a;\n\nclass Plain {}\n");

        let report = modify(&manifest(temp.path(), MANIFEST), true).unwrap();

        assert!(report.skipped);
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_unknown_transformer_fails() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a/Plain.java", "package a;\n\nclass Plain {}\n");
        let toml = manifest(
            temp.path(),
            "[modify]\nroots = [\"src\"]\n\n[[modify.transformers]]\nname = \"nope.Missing\"\n",
        );

        let err = modify(&toml, false).unwrap_err();
        assert!(format!("{err:#}").contains("nope.Missing"));
        assert!(!temp.path().join("target").exists());
    }
}
