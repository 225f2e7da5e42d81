//! Generator runs over one shared namespace tree.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use sourcemod_core::{SourceUnit, write_file};
use tracing::{error, info, warn};

use crate::{DiscoveredFile, Error, FailedWrite, Generator, Loaded, NamespaceTree, Result};

/// What a generation run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerateOutcome {
    /// Parsed input units.
    pub parsed: usize,
    /// Qualified names of generated units, in creation order.
    pub generated: Vec<String>,
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedWrite>,
}

/// Parses discovered files into a [`NamespaceTree`], lets every generator
/// add units to it, then writes the generated units.
pub struct GeneratePipeline {
    generators: Vec<Loaded<dyn Generator>>,
    extension: String,
}

impl Default for GeneratePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratePipeline {
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
            extension: "java".to_string(),
        }
    }

    pub fn generators(mut self, generators: Vec<Loaded<dyn Generator>>) -> Self {
        self.generators = generators;
        self
    }

    /// Extension of generated files, without the dot.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn run(mut self, files: &[DiscoveredFile], output: &Path) -> Result<GenerateOutcome> {
        let mut outcome = GenerateOutcome::default();

        if self.generators.is_empty() {
            info!("No source generators found");
            return Ok(outcome);
        }

        let mut tree = NamespaceTree::new();
        for file in files {
            let text = std::fs::read_to_string(&file.path).map_err(|source| Error::Io {
                path: file.path.clone(),
                source,
            })?;
            let unit = SourceUnit::parse(&text).map_err(|source| Error::Parse {
                path: file.relative.clone(),
                source,
            })?;
            tree.insert(unit)?;
            outcome.parsed += 1;
        }

        for loaded in &mut self.generators {
            loaded
                .module
                .generate(&mut tree)
                .map_err(|e| Error::ModuleFailed {
                    name: loaded.name.clone(),
                    target: "namespace tree".to_string(),
                    source: e.into(),
                })?;
        }

        tree.restore_generated_namespaces()?;

        let mut seen = HashSet::new();
        for &id in tree.generated() {
            let unit = tree.unit(id);
            let target = self.output_path(output, unit);
            let qualified = unit.qualified_name();
            info!("Generated unit '{}'", qualified);

            if !seen.insert(target.clone()) {
                warn!(
                    "'{}' resolves to already written '{}', overwriting",
                    qualified,
                    target.display()
                );
            }

            match write_file(&target, &unit.to_source()) {
                Ok(()) => outcome.written.push(target),
                Err(e) => {
                    error!("failed to write '{}': {:#}", target.display(), e);
                    outcome.failed.push(FailedWrite {
                        path: target,
                        reason: format!("{e:#}"),
                    });
                }
            }
            outcome.generated.push(qualified);
        }

        Ok(outcome)
    }

    fn output_path(&self, output: &Path, unit: &SourceUnit) -> PathBuf {
        let mut path = output.to_path_buf();
        for segment in unit.namespace().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", unit.name(), self.extension));
        path
    }
}
