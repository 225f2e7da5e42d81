//! The `core` library, always on the classpath.

mod add_imports;
mod constants;
mod finalize_classes;
mod package_index;
mod strip_annotation;

pub use add_imports::AddImports;
pub use constants::GenerateConstants;
pub use finalize_classes::FinalizeClasses;
pub use package_index::PackageIndex;
use sourcemod_pipeline::{Factory, ModuleDefinition, ModuleEntry, ModuleLibrary};
pub use strip_annotation::StripAnnotation;

pub struct CoreLibrary;

impl ModuleLibrary for CoreLibrary {
    fn name(&self) -> &'static str {
        "core"
    }

    fn modules(&self) -> Vec<ModuleDefinition> {
        vec![
            ModuleDefinition {
                name: StripAnnotation::NAME,
                description: "Remove a marker annotation and its import",
                entry: ModuleEntry::Transformer(Factory::configured(StripAnnotation::configured)),
            },
            ModuleDefinition {
                name: AddImports::NAME,
                description: "Add imports to every (or every annotated) unit",
                entry: ModuleEntry::Transformer(Factory::configured(AddImports::configured)),
            },
            ModuleDefinition {
                name: FinalizeClasses::NAME,
                description: "Declare non-abstract classes final",
                entry: ModuleEntry::Transformer(Factory::plain(FinalizeClasses::plain)),
            },
            ModuleDefinition {
                name: PackageIndex::NAME,
                description: "List the units of every namespace in an index class",
                entry: ModuleEntry::Generator(
                    Factory::configured(PackageIndex::configured).or_plain(PackageIndex::plain),
                ),
            },
            ModuleDefinition {
                name: GenerateConstants::NAME,
                description: "Generate a class of string constants",
                entry: ModuleEntry::Generator(Factory::configured(GenerateConstants::configured)),
            },
        ]
    }
}
