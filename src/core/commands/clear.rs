use super::{BuiltinContext, BuiltinOutcome, Command, CommandError};

/// Cursor home, then erase to end of screen.
pub const CLEAR_SEQUENCE: &str = "\x1b[H\x1b[J";

#[derive(Clone)]
pub struct ClearCommand;

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ClearCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        ctx.out.write_all(CLEAR_SEQUENCE.as_bytes())?;
        ctx.out.flush()?;
        Ok(BuiltinOutcome::Continue)
    }
}
