use super::{BuiltinContext, BuiltinOutcome, Command, CommandError};

/// `setpath [list]`: replace the search path with a colon-separated list,
/// then print the value in effect. Without a list it only prints.
#[derive(Clone)]
pub struct SetPathCommand;

impl Default for SetPathCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SetPathCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for SetPathCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        if let Some(raw) = args.first() {
            if let Err(e) = ctx.search_path.update(raw) {
                tracing::debug!(len = raw.len(), "rejected search path update");
                writeln!(ctx.err, "Error: {}", e)?;
            }
        }

        writeln!(ctx.out, "{}", ctx.search_path)?;
        ctx.out.flush()?;
        Ok(BuiltinOutcome::Continue)
    }
}
