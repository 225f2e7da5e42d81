use eyre::Result;
use sourcemod_core::SourceUnit;
use sourcemod_pipeline::{Properties, Transformer};

/// Removes `@<annotation>` from units carrying it, along with the import
/// that brought the annotation in.
#[derive(Debug)]
pub struct StripAnnotation {
    annotation: String,
}

impl StripAnnotation {
    pub const NAME: &'static str = "sourcemod.transform.StripAnnotation";

    pub fn new(annotation: impl Into<String>) -> Self {
        let annotation = annotation.into();
        Self {
            annotation: annotation.trim().trim_start_matches('@').to_string(),
        }
    }

    pub(crate) fn configured(properties: &Properties) -> Result<Box<dyn Transformer>> {
        Ok(Box::new(Self::new(properties.require("annotation")?)))
    }
}

impl Transformer for StripAnnotation {
    fn can_transform(&self, unit: &SourceUnit) -> bool {
        unit.has_annotation(&self.annotation)
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> Result<()> {
        unit.remove_annotation(&self.annotation);
        let suffix = format!(".{}", self.annotation);
        unit.remove_imports_where(|import| import == self.annotation || import.ends_with(&suffix));
        Ok(())
    }
}
