use eyre::Result;
use sourcemod_core::SourceUnit;
use sourcemod_pipeline::{Properties, Transformer};

/// Adds a fixed set of imports to units that miss any of them.
#[derive(Debug)]
pub struct AddImports {
    imports: Vec<String>,
    annotated: Option<String>,
}

impl AddImports {
    pub const NAME: &'static str = "sourcemod.transform.AddImports";

    pub fn new<I, S>(imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            imports: imports
                .into_iter()
                .map(|import| import.as_ref().trim().to_string())
                .filter(|import| !import.is_empty())
                .collect(),
            annotated: None,
        }
    }

    /// Only touch units carrying `@annotation`.
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotated = Some(annotation.into());
        self
    }

    pub(crate) fn configured(properties: &Properties) -> Result<Box<dyn Transformer>> {
        let imports = Self::new(properties.require("imports")?.split(','));
        if imports.imports.is_empty() {
            eyre::bail!("property 'imports' lists no imports");
        }
        Ok(Box::new(match properties.get("annotated") {
            Some(annotation) if !annotation.trim().is_empty() => {
                imports.annotated(annotation.trim().trim_start_matches('@'))
            }
            _ => imports,
        }))
    }
}

impl Transformer for AddImports {
    fn can_transform(&self, unit: &SourceUnit) -> bool {
        let selected = self
            .annotated
            .as_deref()
            .is_none_or(|annotation| unit.has_annotation(annotation));
        selected && self.imports.iter().any(|import| !unit.has_import(import))
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> Result<()> {
        for import in &self.imports {
            unit.add_import(import.as_str());
        }
        Ok(())
    }
}
