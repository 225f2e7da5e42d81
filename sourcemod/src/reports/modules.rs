//! Modules command report data structures.

use super::output::{Output, Report};

/// One available module.
#[derive(Debug, Clone)]
pub struct ModuleRow {
    pub name: String,
    pub library: String,
    pub capability: String,
    pub description: String,
}

/// Report data listing available modules.
#[derive(Debug)]
pub struct ModulesReport {
    /// Names of every library a classpath may list.
    pub libraries: Vec<String>,
    pub modules: Vec<ModuleRow>,
}

impl Report for ModulesReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Modules");
        if self.modules.is_empty() {
            out.preformatted("No modules found.");
            return;
        }

        let mut current = None;
        for row in &self.modules {
            if current != Some(row.library.as_str()) {
                if current.is_some() {
                    out.newline();
                }
                out.section(&format!("{} library", row.library));
                current = Some(row.library.as_str());
            }
            out.list_item(&format!(
                "{} ({}): {}",
                row.name, row.capability, row.description
            ));
        }

        out.newline();
        out.key_value("Libraries", &self.libraries.join(", "));
    }
}
