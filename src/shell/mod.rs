use std::io::{self, Write};

mod executor;
mod pipeline;
mod splitter;

pub use pipeline::{
    ExecutionMode, PipelineError, PipelineOperator, PipelineStage, APPEND_MARKER, PIPE_MARKER,
    REDIRECT_MARKER,
};
pub use splitter::{
    split_args, split_line, Command, ParseError, MAX_ARGUMENTS, MAX_COMMANDS, STATEMENT_SEPARATOR,
};

use crate::{
    config::Config,
    core::commands::Builtins,
    error::ShellError,
    highlight::Highlighter,
    input::{self, LineSource},
    path::SearchPath,
    process::ProcessExecutor,
};

use executor::CommandHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

pub struct Shell {
    pub(crate) search_path: SearchPath,
    pub(crate) builtins: Builtins,
    pub(crate) executor: ProcessExecutor,
    highlighter: Highlighter,
    input: Box<dyn LineSource>,
}

impl Shell {
    /// A shell reading from this process's standard input.
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let input = input::stdin_source(&config)?;
        Ok(Self::with_input(config, input))
    }

    pub fn with_input(config: Config, input: Box<dyn LineSource>) -> Self {
        Shell {
            search_path: config.search_path,
            builtins: Builtins::new(),
            executor: ProcessExecutor::new(),
            highlighter: Highlighter::new(),
            input,
        }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Read and execute lines until `exit` or end of input.
    ///
    /// Returns an error only for failures that must end the interpreter.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while let Some(line) = self.input.read_line()? {
            match self.execute_line(&line) {
                Ok(LineOutcome::Continue) => {}
                Ok(LineOutcome::Exit) => return Ok(()),
                Err(e) if !e.is_fatal() => {
                    let message = format!("dsh: {}", e);
                    eprintln!("{}", self.highlighter.highlight_warning(&message));
                }
                Err(e) => return Err(e),
            }
        }

        let mut out = io::stdout().lock();
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Execute every command of one line, left to right, each to completion.
    pub fn execute_line(&mut self, line: &str) -> Result<LineOutcome, ShellError> {
        let commands = split_line(line)?;
        tracing::debug!(commands = commands.len(), "executing line");

        for command in commands {
            if self.execute_command(command)? == LineOutcome::Exit {
                return Ok(LineOutcome::Exit);
            }
        }
        Ok(LineOutcome::Continue)
    }
}
