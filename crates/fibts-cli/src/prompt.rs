//! Startup prompts.

use anyhow::{Context, Result};
use fibts_config::expand_base_name;
use fibts_core::Mode;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

pub const BASE_NAME_PROMPT: &str = "Enter base file name for saving output: ";
pub const MODE_PROMPT: &str = "Choose an option (1/2/3): ";

/// Line prompts backed by rustyline.
pub struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialise line editor")?;
        Ok(Self { editor })
    }

    /// Reads one line. End of input and Ctrl+C count as a blank answer.
    pub fn ask(&mut self, prompt: &str) -> String {
        match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => String::new(),
            Err(e) => {
                warn!("failed to read input: {e}");
                String::new()
            }
        }
    }
}

/// Trims the answer; a blank answer selects `default`.
pub fn base_name_or_default(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_string(),
        name => expand_base_name(name),
    }
}

/// Menu printed before the mode prompt.
pub fn menu(scan_target: &str) -> String {
    let mut out = String::from("\nOptions:\n");
    for mode in Mode::all() {
        out.push_str(&format!("{}. {}", mode.number(), mode.description()));
        if mode == Mode::SubstringScan {
            out.push_str(&format!(" '{scan_target}'"));
        }
        out.push('\n');
    }
    out
}
