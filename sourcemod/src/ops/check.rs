//! Check operation - manifest validation and module loading.

use eyre::{Context, Result};
use sourcemod_manifest::SourcemodToml;
use sourcemod_pipeline::{Filter, Generator, ModuleConfig, ReplacementRule, Transformer};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Loads every configured module and compiles every pattern the goals would
/// use, without touching the filesystem.
pub fn check(sourcemod_toml: &SourcemodToml) -> Result<CheckReport> {
    let manifest = sourcemod_toml.manifest();
    let modify = &manifest.modify;
    let generate = &manifest.generate;
    let delete = &manifest.delete;

    Filter::new(&modify.includes, &modify.excludes, modify.exclude_by_default)?;
    Filter::new(
        &generate.includes,
        &generate.excludes,
        generate.exclude_by_default,
    )?;
    Filter::new(&delete.includes, &delete.excludes, delete.exclude_by_default)?;
    let rules = ReplacementRule::from_replacements(&modify.replacements)?;

    let configs: Vec<ModuleConfig> = modify.transformers.iter().map(ModuleConfig::from).collect();
    let transformers = sourcemod_modules::registry(&modify.classpath)
        .load::<dyn Transformer>(&configs)
        .wrap_err("Failed to load source transformers")?;

    let configs: Vec<ModuleConfig> = generate
        .generators
        .iter()
        .map(ModuleConfig::from)
        .collect();
    let generators = sourcemod_modules::registry(&generate.classpath)
        .load::<dyn Generator>(&configs)
        .wrap_err("Failed to load source generators")?;

    Ok(CheckReport {
        config_path: sourcemod_toml.path().to_path_buf(),
        transformers: transformers.into_iter().map(|loaded| loaded.name).collect(),
        generators: generators.into_iter().map(|loaded| loaded.name).collect(),
        replacements: rules.len(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::ops::testing::manifest;

    #[test]
    fn test_check_loads_modules() {
        let temp = TempDir::new().unwrap();
        let toml = manifest(
            temp.path(),
            r#"
[modify]
classpath = ["text"]

[[modify.transformers]]
name = "sourcemod.transform.ReplaceText"
properties = { pattern = "a", replace = "b" }

[[generate.generators]]
name = "sourcemod.generate.PackageIndex"
"#,
        );

        let report = check(&toml).unwrap();

        assert_eq!(report.transformers, vec!["sourcemod.transform.ReplaceText"]);
        assert_eq!(report.generators, vec!["sourcemod.generate.PackageIndex"]);
        assert!(!temp.path().join("target").exists());
    }

    #[test]
    fn test_check_reports_contract_errors() {
        let temp = TempDir::new().unwrap();
        let toml = manifest(
            temp.path(),
            "[[generate.generators]]\nname = \"sourcemod.transform.FinalizeClasses\"\n",
        );

        let err = check(&toml).unwrap_err();
        assert!(format!("{err:#}").contains("does not implement the generator capability"));
    }
}
