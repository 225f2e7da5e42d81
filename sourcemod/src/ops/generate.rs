//! Generate operation - generators over one namespace tree.

use eyre::{Context, Result};
use sourcemod_manifest::SourcemodToml;
use sourcemod_pipeline::{GeneratePipeline, Generator, ModuleConfig};
use tracing::info;

use super::SourceSet;
use crate::reports::GenerateReport;

/// Execute the generate goal.
pub fn generate(sourcemod_toml: &SourcemodToml, skip: bool) -> Result<GenerateReport> {
    let config = &sourcemod_toml.manifest().generate;
    let output = sourcemod_toml.resolve(&config.output);

    if skip || config.skip {
        info!("Skipping source generation");
        return Ok(GenerateReport::skipped(output));
    }

    let files = SourceSet {
        roots: &config.roots,
        includes: &config.includes,
        excludes: &config.excludes,
        exclude_by_default: config.exclude_by_default,
    }
    .discover(sourcemod_toml)?;
    if files.is_empty() {
        info!("No sources to generate from");
        return Ok(GenerateReport::empty(output));
    }

    let configs: Vec<ModuleConfig> = config.generators.iter().map(ModuleConfig::from).collect();
    let generators = sourcemod_modules::registry(&config.classpath)
        .load::<dyn Generator>(&configs)
        .wrap_err("Failed to load source generators")?;

    let outcome = GeneratePipeline::new()
        .generators(generators)
        .extension(config.extension.as_str())
        .run(&files, &output)
        .wrap_err("Source generation failed")?;

    Ok(GenerateReport {
        skipped: false,
        discovered: files.len(),
        output,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::testing::{manifest, write};

    #[test]
    fn test_generate_writes_below_output() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a/Foo.java", "package a;\n\npublic class Foo {}\n");
        let toml = manifest(
            temp.path(),
            r#"
[generate]
roots = ["src"]
output = "gen"
extension = "txt"

[[generate.generators]]
name = "sourcemod.generate.Constants"
properties = { namespace = "a.meta", name = "Keys", "constant.ID" = "foo" }
"#,
        );

        let report = generate(&toml, false).unwrap();

        assert_eq!(report.outcome.generated, vec!["a.meta.Keys"]);
        assert!(temp.path().join("gen/a/meta/Keys.txt").exists());
    }

    #[test]
    fn test_no_sources() {
        let temp = TempDir::new().unwrap();
        let toml = manifest(temp.path(), "[generate]\nroots = [\"missing\"]\n");

        let report = generate(&toml, false).unwrap();

        assert_eq!(report.discovered, 0);
        assert!(report.outcome.generated.is_empty());
    }
}
