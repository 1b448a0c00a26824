use std::io::{self, Write};

use super::pipeline::{ExecutionMode, PipelineStage};
use super::splitter::Command;
use super::LineOutcome;
use crate::core::commands::{BuiltinContext, BuiltinOutcome};
use crate::error::ShellError;
use crate::process::OutputMode;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: Command) -> Result<LineOutcome, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, command: Command) -> Result<LineOutcome, ShellError> {
        let Some(name) = command.first() else {
            return Ok(LineOutcome::Continue);
        };

        if self.builtins.is_builtin(name) {
            return self.execute_builtin(&command);
        }

        let stage = PipelineStage::parse(command)?;

        // Keep earlier built-in output ahead of anything the children print.
        io::stdout().flush()?;

        let path = &self.search_path;
        let outcomes = match &stage.mode {
            ExecutionMode::Plain => vec![self.executor.run(path, &stage.args)?],
            ExecutionMode::Redirect(target) => vec![self.executor.run_redirect(
                path,
                &stage.args,
                target,
                OutputMode::Truncate,
            )?],
            ExecutionMode::Append(target) => vec![self.executor.run_redirect(
                path,
                &stage.args,
                target,
                OutputMode::Append,
            )?],
            ExecutionMode::Pipe(_) => {
                self.executor
                    .run_pipe(path, &stage.args, &stage.pipe_args)?
            }
        };

        let succeeded = outcomes.iter().all(|outcome| outcome.success());
        tracing::debug!(mode = ?stage.mode, ?outcomes, succeeded, "command finished");
        Ok(LineOutcome::Continue)
    }
}

impl super::Shell {
    fn execute_builtin(&mut self, command: &[String]) -> Result<LineOutcome, ShellError> {
        let (name, args) = match command.split_first() {
            Some(split) => split,
            None => return Ok(LineOutcome::Continue),
        };

        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();
        let mut ctx = BuiltinContext {
            search_path: &mut self.search_path,
            out: &mut out,
            err: &mut err,
        };

        tracing::debug!(builtin = %name, "running built-in");
        match self.builtins.execute(name, args, &mut ctx) {
            Some(Ok(BuiltinOutcome::Exit)) => Ok(LineOutcome::Exit),
            Some(Ok(BuiltinOutcome::Continue)) | None => Ok(LineOutcome::Continue),
            Some(Err(e)) => Err(e.into()),
        }
    }
}
