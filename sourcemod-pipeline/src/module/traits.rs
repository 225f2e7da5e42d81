use eyre::Result;
use sourcemod_core::SourceUnit;

use crate::NamespaceTree;

/// Modifies parsed source units in place.
pub trait Transformer {
    /// Whether this transformer applies to `unit`.
    fn can_transform(&self, unit: &SourceUnit) -> bool;

    /// Rewrite `unit`. Only called when [`can_transform`](Self::can_transform)
    /// accepted the unit.
    fn transform(&mut self, unit: &mut SourceUnit) -> Result<()>;
}

/// Adds new units to a namespace tree.
///
/// Generators should only create units through the tree's `create_*` family
/// so the run can emit them.
pub trait Generator {
    fn generate(&mut self, tree: &mut NamespaceTree) -> Result<()>;
}
