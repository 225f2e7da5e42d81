//! Build-time source transformation and generation pipeline.
//!
//! A host discovers source files, hands them to one of the goal pipelines
//! and renders the returned outcome:
//!
//! - [`discovery`] - root traversal and include/exclude glob filtering
//! - [`module`] - transformer/generator contracts and the module registry
//! - [`namespace`] - the namespace tree generators populate
//! - [`transform`] - transformer chains, rename rules and reference fixups
//! - [`generate`] - generator runs over one shared namespace tree
//! - [`purge`] - deletion of emitted sources and empty-directory purging
//!
//! # Example
//!
//! ```ignore
//! let filter = Filter::new(&config.includes, &config.excludes, true)?;
//! let files = discover(&roots, &filter);
//!
//! let transformers = registry.load::<dyn Transformer>(&configs)?;
//! let outcome = TransformPipeline::new()
//!     .transformers(transformers)
//!     .copy_unmodified(true)
//!     .run(&files, &output_dir)?;
//! ```

pub mod discovery;
mod error;
pub mod generate;
pub mod module;
pub mod namespace;
pub mod purge;
pub mod rename;
pub mod transform;

pub use discovery::{DiscoveredFile, Filter, discover};
pub use error::{CreationError, Error, Result};
pub use generate::{GenerateOutcome, GeneratePipeline};
pub use module::{
    Capability, Factory, Generator, Loaded, ModuleConfig, ModuleDefinition, ModuleEntry,
    ModuleInfo, ModuleLibrary, ModuleRegistry, Properties, Transformer,
};
pub use namespace::{NamespaceNode, NamespaceTree, NodeId, UnitId};
pub use purge::{DeleteOutcome, delete};
pub use rename::ReplacementRule;
pub use transform::{FailedWrite, TransformOutcome, TransformPipeline};
