//! Rendering targets for goal reports.

/// Where a report writes its lines.
///
/// Reports only say what kind of line they emit (a written file, a deleted
/// source, a warning); the target picks the markup.
pub trait Output {
    /// Heading of a whole report.
    fn title(&mut self, text: &str);

    /// Heading of a group of items, e.g. `Written` or `Deleted`.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// A file the goal wrote.
    fn added_item(&mut self, text: &str);

    /// A file the goal deleted.
    fn removed_item(&mut self, text: &str);

    /// A per-file failure that did not stop the run.
    fn warning(&mut self, msg: &str);

    /// A summary line printed as is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A goal result that can print itself.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain-text output: items on stdout, warnings on stderr next to the
/// tracing log.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{text}");
        println!("{}", "-".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  * {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn removed_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}
