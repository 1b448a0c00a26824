use std::fmt;
use std::io;
use std::process::ExitStatus;

pub mod executor;
mod pipe;

pub use executor::{OutputMode, ProcessExecutor, APPEND_SEPARATOR};

/// Failures of the interpreter's own process plumbing. These are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("execute_pipe: pipe: {}", describe(.0))]
    Pipe(#[source] io::Error),
    #[error("{program}: fork: {}", describe(.source))]
    Spawn { program: String, source: io::Error },
    #[error("{program}: wait: {}", describe(.source))]
    Wait { program: String, source: io::Error },
}

/// How a launched command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Exited(i32),
    Signaled(i32),
    /// The command never ran: unopenable target, missing or unexecutable program.
    Failed(i32),
}

impl ChildOutcome {
    pub fn success(self) -> bool {
        matches!(self, ChildOutcome::Exited(0))
    }

    fn from_status(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;

        match (status.code(), status.signal()) {
            (Some(code), _) => ChildOutcome::Exited(code),
            (None, Some(signal)) => ChildOutcome::Signaled(signal),
            (None, None) => ChildOutcome::Failed(1),
        }
    }
}

impl fmt::Display for ChildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildOutcome::Exited(code) => write!(f, "exit status {}", code),
            ChildOutcome::Signaled(signal) => write!(f, "killed by signal {}", signal),
            ChildOutcome::Failed(code) => write!(f, "not started ({})", code),
        }
    }
}

/// OS error text without the trailing `(os error N)`, as `perror` prints it.
pub(crate) fn describe(err: &io::Error) -> String {
    let text = err.to_string();
    match text.find(" (os error") {
        Some(end) => text[..end].to_string(),
        None => text,
    }
}
