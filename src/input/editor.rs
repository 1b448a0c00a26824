use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use super::LineSource;
use crate::error::ShellError;

/// Interactive input through rustyline with a small in-memory history.
pub struct EditorSource {
    editor: Editor<(), DefaultHistory>,
    prompt: String,
}

impl EditorSource {
    pub fn new(prompt: &str, history_size: usize) -> Result<Self, ShellError> {
        let config = Config::builder()
            .max_history_size(history_size)?
            .auto_add_history(false)
            .build();
        let editor = Editor::with_config(config)?;

        Ok(EditorSource {
            editor,
            prompt: prompt.to_string(),
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    if !line.is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "couldn't add to history");
                        }
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C on the prompt drops the line being edited.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
