//! Deletion prompts on the controlling terminal.

use std::io;

use dialoguer::{theme::ColorfulTheme, Input};

use labelsync_sync::Prompter;

/// Reads one line per question via `dialoguer`.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
