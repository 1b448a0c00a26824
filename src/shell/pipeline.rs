use super::splitter::Command;

pub const REDIRECT_MARKER: &str = ">";
pub const APPEND_MARKER: &str = ">>";
pub const PIPE_MARKER: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOperator {
    Redirect, // >
    Append,   // >>
    Pipe,     // |
}

impl PipelineOperator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            REDIRECT_MARKER => Some(Self::Redirect),
            APPEND_MARKER => Some(Self::Append),
            PIPE_MARKER => Some(Self::Pipe),
            _ => None,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::Redirect => REDIRECT_MARKER,
            Self::Append => APPEND_MARKER,
            Self::Pipe => PIPE_MARKER,
        }
    }
}

/// How a command's standard streams are wired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Plain,
    Redirect(String),
    Append(String),
    /// Index of the `|` token in the original command.
    Pipe(usize),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{marker}: no path")]
    MissingTarget { marker: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    /// Arguments up to (not including) the operator token.
    pub args: Command,
    pub mode: ExecutionMode,
    /// Right-hand command of a pipe; empty for every other mode.
    pub pipe_args: Command,
}

impl PipelineStage {
    /// Classify a command by the first operator token after the program name.
    ///
    /// Only the first operator counts. Tokens after a pipe marker form the
    /// right-hand command verbatim, so `a | b > f` hands `b > f` to `b`.
    pub fn parse(mut tokens: Command) -> Result<Self, PipelineError> {
        let found = tokens
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(i, token)| PipelineOperator::from_token(token).map(|op| (i, op)));

        let Some((position, operator)) = found else {
            return Ok(Self {
                args: tokens,
                mode: ExecutionMode::Plain,
                pipe_args: Vec::new(),
            });
        };

        let mut rest = tokens.split_off(position);
        rest.remove(0);

        let (mode, pipe_args) = match operator {
            PipelineOperator::Pipe => (ExecutionMode::Pipe(position), rest),
            PipelineOperator::Redirect | PipelineOperator::Append => {
                let target = rest.into_iter().next().ok_or(PipelineError::MissingTarget {
                    marker: operator.marker(),
                })?;
                let mode = if operator == PipelineOperator::Redirect {
                    ExecutionMode::Redirect(target)
                } else {
                    ExecutionMode::Append(target)
                };
                (mode, Vec::new())
            }
        };

        Ok(Self {
            args: tokens,
            mode,
            pipe_args,
        })
    }
}
