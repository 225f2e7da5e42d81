//! Modules operation - list every module a classpath can name.

use sourcemod_modules::catalog;
use sourcemod_pipeline::{ModuleLibrary, ModuleRegistry};

use crate::reports::{ModuleRow, ModulesReport};

/// List the modules of every known library, or of `library` alone.
pub fn modules(library: Option<&str>) -> ModulesReport {
    let catalog = catalog();
    let mut registry = ModuleRegistry::new();
    for candidate in &catalog {
        if library.is_none_or(|name| name == candidate.name()) {
            registry.register_library(candidate.as_ref());
        }
    }

    ModulesReport {
        libraries: catalog
            .iter()
            .map(|library| library.name().to_string())
            .collect(),
        modules: registry
            .modules()
            .map(|info| ModuleRow {
                name: info.name.to_string(),
                library: info.library.to_string(),
                capability: info.capability.to_string(),
                description: info.description.to_string(),
            })
            .collect(),
    }
}
