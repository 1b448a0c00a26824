use std::io::{self, BufRead, IsTerminal};

mod editor;

pub use editor::EditorSource;

use crate::config::Config;
use crate::error::ShellError;

/// Where the shell gets its input lines from.
pub trait LineSource {
    /// Next line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// Lines from any buffered reader, without a prompt.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        // Bytes that are not UTF-8 become U+FFFD instead of ending the shell.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// The line editor when stdin is a terminal, plain buffered stdin otherwise.
pub fn stdin_source(config: &Config) -> Result<Box<dyn LineSource>, ShellError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let prompt = if config.quiet { "" } else { config.prompt.as_str() };
        Ok(Box::new(EditorSource::new(prompt, config.history_size)?))
    } else {
        Ok(Box::new(ReaderSource::new(stdin.lock())))
    }
}
