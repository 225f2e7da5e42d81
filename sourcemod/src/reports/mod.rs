//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod delete;
mod generate;
mod modify;
mod modules;
mod output;

pub use check::CheckReport;
pub use delete::DeleteReport;
pub use generate::GenerateReport;
pub use modify::ModifyReport;
pub use modules::{ModuleRow, ModulesReport};
pub use output::{Report, TerminalOutput};

use std::path::Path;

/// `path` relative to `base` for display, or the full path when it is not
/// below `base`.
fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::output::Output;

    /// Records rendered lines for assertions.
    #[derive(Default)]
    pub struct RecordingOutput {
        pub lines: Vec<String>,
    }

    impl Output for RecordingOutput {
        fn title(&mut self, text: &str) {
            self.lines.push(format!("# {text}"));
        }

        fn section(&mut self, name: &str) {
            self.lines.push(format!("{name}:"));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{key}: {value}"));
        }

        fn list_item(&mut self, text: &str) {
            self.lines.push(format!("- {text}"));
        }

        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("+ {text}"));
        }

        fn removed_item(&mut self, text: &str) {
            self.lines.push(format!("- {text}"));
        }

        fn warning(&mut self, msg: &str) {
            self.lines.push(format!("warning: {msg}"));
        }

        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn newline(&mut self) {
            self.lines.push(String::new());
        }
    }
}
