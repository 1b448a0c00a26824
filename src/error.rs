use crate::core::commands::CommandError;
use crate::path::PathError;
use crate::process::ProcessError;
use crate::shell::{ParseError, PipelineError};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("readline: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("flag error: {0}")]
    FlagError(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("redirect_and_append_output: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("setpath: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl ShellError {
    /// Fatal errors end the interpreter; the rest only abandon the current line.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ShellError::Parse(_))
    }
}
