use super::{BuiltinContext, BuiltinOutcome, Command, CommandError};

/// Leaves the shell. Arguments are ignored.
#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        writeln!(ctx.out)?;
        ctx.out.flush()?;
        Ok(BuiltinOutcome::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SearchPath;

    #[test]
    fn test_exit_command() {
        let mut path = SearchPath::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = BuiltinContext {
            search_path: &mut path,
            out: &mut out,
            err: &mut err,
        };

        let outcome = ExitCommand::new().execute(&["1".to_string()], &mut ctx).unwrap();

        assert_eq!(outcome, BuiltinOutcome::Exit);
        assert_eq!(out, b"\n");
        assert!(err.is_empty());
    }
}
