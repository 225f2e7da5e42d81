//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Loaded transformer names, in invocation order.
    pub transformers: Vec<String>,
    /// Loaded generator names, in invocation order.
    pub generators: Vec<String>,
    /// Number of active rename rules.
    pub replacements: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        if self.transformers.is_empty() {
            out.key_value("Transformers", "none");
        } else {
            out.section("Transformers");
            for name in &self.transformers {
                out.list_item(name);
            }
        }

        if self.generators.is_empty() {
            out.key_value("Generators", "none");
        } else {
            out.section("Generators");
            for name in &self.generators {
                out.list_item(name);
            }
        }

        out.key_value("Rename rules", &self.replacements.to_string());
    }
}
