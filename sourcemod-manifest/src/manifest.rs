//! Manifest types for sourcemod.toml.

use std::path::PathBuf;

use serde::Deserialize;

/// Root manifest for sourcemod.toml
///
/// Every section is optional; a missing section runs its goal with defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Transformation of existing sources (`sourcemod modify`)
    #[serde(default)]
    pub modify: ModifyConfig,

    /// Generation of new sources (`sourcemod generate`)
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Deletion of previously emitted sources (`sourcemod delete`)
    #[serde(default)]
    pub delete: DeleteConfig,
}

/// A configured transformer or generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    /// Qualified module name, e.g. `sourcemod.transform.StripAnnotation`
    pub name: String,

    /// Opaque configuration handed to the module's constructor
    #[serde(default)]
    pub properties: toml::Table,
}

/// A rename rule applied to output file names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Replacement {
    /// Treat `pattern` as a regular expression that must match the whole name
    #[serde(default)]
    pub regex: bool,

    pub pattern: String,

    pub replace: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModifyConfig {
    pub roots: Vec<PathBuf>,
    pub output: PathBuf,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub exclude_by_default: bool,
    /// Copy sources no transformer touched and no rule renamed
    pub copy_unmodified: bool,
    pub skip: bool,
    /// Additional module libraries to load
    pub classpath: Vec<String>,
    pub transformers: Vec<ModuleSpec>,
    pub replacements: Vec<Replacement>,
}

impl Default for ModifyConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("src/main/java")],
            output: PathBuf::from("target/project-sources"),
            includes: vec!["**/*.java".to_string()],
            excludes: Vec::new(),
            exclude_by_default: true,
            copy_unmodified: true,
            skip: false,
            classpath: Vec::new(),
            transformers: Vec::new(),
            replacements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub roots: Vec<PathBuf>,
    pub output: PathBuf,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub exclude_by_default: bool,
    /// File extension (without dot) of generated units
    pub extension: String,
    pub skip: bool,
    pub classpath: Vec<String>,
    pub generators: Vec<ModuleSpec>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("src/main/java")],
            output: PathBuf::from("target/generated-sources"),
            includes: vec!["**/*.java".to_string()],
            excludes: Vec::new(),
            exclude_by_default: false,
            extension: "java".to_string(),
            skip: false,
            classpath: Vec::new(),
            generators: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteConfig {
    pub roots: Vec<PathBuf>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub exclude_by_default: bool,
    /// Remove directories left empty by the deletion
    pub purge_empty: bool,
    pub skip: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("target/classes")],
            includes: Vec::new(),
            excludes: Vec::new(),
            exclude_by_default: true,
            purge_empty: false,
            skip: false,
        }
    }
}
