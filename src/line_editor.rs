//! Line input for the interactive shell.
//!
//! Thin layer over rustyline: Emacs keybindings, persistent history in
//! `$HOME/.sift_history`, and a closed [`ReadResult`] so the shell loop
//! never matches on rustyline's error type directly. History trouble of
//! any kind (missing, corrupt, unwritable) is ignored; line editing is a
//! convenience the shell must keep working without.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};

const HISTORY_FILE: &str = ".sift_history";
const HISTORY_LIMIT: usize = 500;

/// One read from the prompt.
pub enum ReadResult {
    Line(String),
    /// Ctrl-C: discard the line, prompt again.
    Interrupted,
    /// Ctrl-D, closed stdin, or any other terminal failure.
    Eof,
}

pub struct LineEditor {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl LineEditor {
    pub fn new() -> Self {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .max_history_size(HISTORY_LIMIT)
            .expect("history limit fits")
            .auto_add_history(false)
            .build();
        let mut editor = DefaultEditor::with_config(config).expect("terminal line editor");

        let history = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        Self { editor, history }
    }

    pub fn read_line(&mut self, prompt: &str) -> ReadResult {
        match self.editor.readline(prompt) {
            Ok(line) => ReadResult::Line(line),
            Err(ReadlineError::Interrupted) => ReadResult::Interrupted,
            Err(_) => ReadResult::Eof,
        }
    }

    /// Record a processed line and flush history to disk. The shell
    /// calls this only for lines it acted on, so cancelled or blank
    /// input never lands in history.
    pub fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
        if let Some(path) = &self.history {
            let _ = self.editor.save_history(path);
        }
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
