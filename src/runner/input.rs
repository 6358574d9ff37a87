//! Line input for the interactive loop
//!
//! Wraps rustyline: prompt display, in-process history, and optional vi
//! editing mode. History lives only for the process lifetime.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, EditMode};

use crate::core::{ReplConfig, Result};

/// What one prompt round produced
pub(crate) enum ReadOutcome {
    /// A complete input line (possibly empty)
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D / end of input
    Eof,
}

/// Line editor held for the lifetime of one `run()` call
pub(crate) struct LineReader {
    editor: DefaultEditor,
}

impl LineReader {
    pub fn new(config: &ReplConfig) -> Result<Self> {
        let edit_mode = if config.editor.vi_mode {
            EditMode::Vi
        } else {
            EditMode::Emacs
        };
        let rl_config = rustyline::Config::builder()
            .max_history_size(config.editor.history_size)?
            .edit_mode(edit_mode)
            .auto_add_history(false)
            .build();

        Ok(Self {
            editor: DefaultEditor::with_config(rl_config)?,
        })
    }

    /// Block for one line, displaying `name` in the prompt.
    pub fn read_line(&mut self, name: &str) -> Result<ReadOutcome> {
        let prompt = format!("{} ", format!("{} >", name).yellow());

        match self.editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}
