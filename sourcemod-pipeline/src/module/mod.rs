//! Module contracts and name-based module loading.
//!
//! Transformers and generators are looked up by qualified name in a
//! [`ModuleRegistry`] assembled from [`ModuleLibrary`] bundles, then
//! instantiated with their configured [`Properties`].

mod properties;
mod registry;
mod traits;

pub use properties::{ModuleConfig, Properties};
pub use registry::{
    Capability, ConfiguredFn, Factory, Loaded, ModuleDefinition, ModuleEntry, ModuleInfo,
    ModuleLibrary, ModuleRegistry, PlainFn,
};
pub use traits::{Generator, Transformer};
