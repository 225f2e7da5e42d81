//! Transformer chains over discovered source files.

use std::path::{Path, PathBuf};

use sourcemod_core::{SourceUnit, copy_file, directory_of, file_name_of, identifier_of, write_file};
use tracing::{error, info};

use crate::{
    DiscoveredFile, Error, Loaded, Result, Transformer,
    rename::{ReplacementRule, fixup_references, rename},
};

/// An output that could not be written. The run continues past these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub path: PathBuf,
    pub reason: String,
}

/// What a transform run produced.
#[derive(Debug, Clone, Default)]
pub struct TransformOutcome {
    /// Units at least one transformer accepted.
    pub transformed: usize,
    /// Units whose output name differs from the source name.
    pub renamed: usize,
    /// Files written from serialized units.
    pub written: Vec<PathBuf>,
    /// Files copied verbatim.
    pub copied: Vec<PathBuf>,
    pub failed: Vec<FailedWrite>,
}

/// Runs transformers and rename rules over discovered files and emits the
/// results below an output directory.
///
/// # Example
///
/// ```ignore
/// let outcome = TransformPipeline::new()
///     .transformers(registry.load::<dyn Transformer>(&configs)?)
///     .rules(ReplacementRule::from_replacements(&manifest.modify.replacements)?)
///     .copy_unmodified(true)
///     .run(&files, &output)?;
/// ```
pub struct TransformPipeline {
    transformers: Vec<Loaded<dyn Transformer>>,
    rules: Vec<ReplacementRule>,
    copy_unmodified: bool,
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transformers: Vec::new(),
            rules: Vec::new(),
            copy_unmodified: true,
        }
    }

    pub fn transformers(mut self, transformers: Vec<Loaded<dyn Transformer>>) -> Self {
        self.transformers = transformers;
        self
    }

    pub fn rules(mut self, rules: Vec<ReplacementRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn copy_unmodified(mut self, copy_unmodified: bool) -> Self {
        self.copy_unmodified = copy_unmodified;
        self
    }

    /// Process every file in order.
    ///
    /// # Errors
    ///
    /// Unreadable or unparsable sources and transformer failures abort the
    /// run. Write failures are logged and collected in
    /// [`TransformOutcome::failed`].
    pub fn run(mut self, files: &[DiscoveredFile], output: &Path) -> Result<TransformOutcome> {
        let mut outcome = TransformOutcome::default();

        if self.transformers.is_empty() {
            info!("No source transformers found");
            if self.copy_unmodified {
                for file in files {
                    copy_verbatim(file, output, &mut outcome);
                }
            }
            return Ok(outcome);
        }

        for file in files {
            self.process(file, output, &mut outcome)?;
        }

        Ok(outcome)
    }

    fn process(
        &mut self,
        file: &DiscoveredFile,
        output: &Path,
        outcome: &mut TransformOutcome,
    ) -> Result<()> {
        let text = std::fs::read_to_string(&file.path).map_err(|source| Error::Io {
            path: file.path.clone(),
            source,
        })?;
        let mut unit = SourceUnit::parse(&text).map_err(|source| Error::Parse {
            path: file.relative.clone(),
            source,
        })?;

        let original_namespace = unit.namespace().to_string();
        let accepted: Vec<usize> = self
            .transformers
            .iter()
            .enumerate()
            .filter(|(_, loaded)| loaded.module.can_transform(&unit))
            .map(|(index, _)| index)
            .collect();
        let modified = !accepted.is_empty();

        if modified {
            info!("Transforming unit '{}'", unit.qualified_name());
            for index in accepted {
                let loaded = &mut self.transformers[index];
                loaded
                    .module
                    .transform(&mut unit)
                    .map_err(|e| Error::ModuleFailed {
                        name: loaded.name.clone(),
                        target: file.relative.clone(),
                        source: e.into(),
                    })?;
            }
            if unit.namespace() != original_namespace {
                unit.set_namespace(original_namespace);
            }
            outcome.transformed += 1;
        }

        let original_name = file_name_of(&file.relative);
        let output_name = rename(original_name, &self.rules);
        let renamed = output_name != original_name;

        if renamed {
            info!("Renaming from '{}' to '{}'", original_name, output_name);
            unit.set_name(identifier_of(&output_name));
            outcome.renamed += 1;
        }

        if modified || renamed {
            let mut source = unit.to_source();
            if renamed {
                source = fixup_references(
                    &source,
                    identifier_of(original_name),
                    identifier_of(&output_name),
                );
            }
            let target = output
                .join(directory_of(&file.relative))
                .join(&output_name);
            match write_file(&target, &source) {
                Ok(()) => outcome.written.push(target),
                Err(e) => record_failure(outcome, target, &e),
            }
        } else if self.copy_unmodified {
            copy_verbatim(file, output, outcome);
        }

        Ok(())
    }
}

fn copy_verbatim(file: &DiscoveredFile, output: &Path, outcome: &mut TransformOutcome) {
    let target = output.join(&file.relative);
    match copy_file(&file.path, &target) {
        Ok(()) => outcome.copied.push(target),
        Err(e) => record_failure(outcome, target, &e),
    }
}

fn record_failure(outcome: &mut TransformOutcome, path: PathBuf, e: &eyre::Report) {
    error!("failed to write '{}': {:#}", path.display(), e);
    outcome.failed.push(FailedWrite {
        path,
        reason: format!("{e:#}"),
    });
}
