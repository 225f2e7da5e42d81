use eyre::Result;
use sourcemod_core::{SourceUnit, UnitKind};
use sourcemod_pipeline::Transformer;

/// Adds `final` to classes that are neither `final` nor `abstract`.
#[derive(Debug, Default)]
pub struct FinalizeClasses;

impl FinalizeClasses {
    pub const NAME: &'static str = "sourcemod.transform.FinalizeClasses";

    pub(crate) fn plain() -> Result<Box<dyn Transformer>> {
        Ok(Box::new(Self))
    }
}

impl Transformer for FinalizeClasses {
    fn can_transform(&self, unit: &SourceUnit) -> bool {
        unit.kind() == UnitKind::Class
            && !unit.has_modifier("final")
            && !unit.has_modifier("abstract")
    }

    fn transform(&mut self, unit: &mut SourceUnit) -> Result<()> {
        unit.add_modifier("final");
        Ok(())
    }
}
