//! Built-in module libraries for sourcemod.
//!
//! - [`CoreLibrary`] (`core`) is always on the classpath.
//! - [`TextLibrary`] (`text`) is loaded when a goal lists it in `classpath`.

mod runtime;
mod text;

pub use runtime::{
    AddImports, CoreLibrary, FinalizeClasses, GenerateConstants, PackageIndex, StripAnnotation,
};

use sourcemod_pipeline::{ModuleLibrary, ModuleRegistry};
pub use text::{ReplaceText, TextLibrary};

/// Every library a classpath entry may name.
pub fn catalog() -> Vec<Box<dyn ModuleLibrary>> {
    vec![Box::new(CoreLibrary), Box::new(TextLibrary)]
}

/// Registry for a goal: the `core` library plus the named classpath
/// libraries.
pub fn registry(classpath: &[String]) -> ModuleRegistry {
    ModuleRegistry::with_classpath(&CoreLibrary, &catalog(), classpath)
}
