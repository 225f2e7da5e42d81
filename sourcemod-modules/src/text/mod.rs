//! The `text` library.

mod replace_text;

pub use replace_text::ReplaceText;
use sourcemod_pipeline::{Factory, ModuleDefinition, ModuleEntry, ModuleLibrary};

pub struct TextLibrary;

impl ModuleLibrary for TextLibrary {
    fn name(&self) -> &'static str {
        "text"
    }

    fn modules(&self) -> Vec<ModuleDefinition> {
        vec![ModuleDefinition {
            name: ReplaceText::NAME,
            description: "Replace text inside declaration bodies",
            entry: ModuleEntry::Transformer(Factory::configured(ReplaceText::configured)),
        }]
    }
}
