use std::collections::BTreeMap;
use std::io::Write;

mod clear;
mod exit;
mod setpath;

pub use clear::{ClearCommand, CLEAR_SEQUENCE};
pub use exit::ExitCommand;
pub use setpath::SetPathCommand;

use crate::path::SearchPath;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// What the shell should do after a built-in has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue,
    Exit,
}

/// State and streams a built-in may touch.
pub struct BuiltinContext<'a> {
    pub search_path: &'a mut SearchPath,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

pub trait Command {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    SetPath(SetPathCommand),
    Clear(ClearCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args, ctx),
            CommandType::SetPath(cmd) => cmd.execute(args, ctx),
            CommandType::Clear(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Commands the shell runs itself instead of launching a program.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("setpath", CommandType::SetPath(SetPathCommand::new()));
        commands.insert("clear", CommandType::Clear(ClearCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run `name` if it is a built-in. `args` excludes the command name.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        ctx: &mut BuiltinContext<'_>,
    ) -> Option<Result<BuiltinOutcome, CommandError>> {
        self.commands.get(name).map(|cmd| cmd.execute(args, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Captured {
        path: SearchPath,
        out: Vec<u8>,
        err: Vec<u8>,
    }

    impl Captured {
        fn new() -> Self {
            Self {
                path: SearchPath::default(),
                out: Vec::new(),
                err: Vec::new(),
            }
        }

        fn run(&mut self, name: &str, args: &[&str]) -> Option<BuiltinOutcome> {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            let mut ctx = BuiltinContext {
                search_path: &mut self.path,
                out: &mut self.out,
                err: &mut self.err,
            };
            Builtins::new()
                .execute(name, &args, &mut ctx)
                .map(|result| result.unwrap())
        }
    }

    #[test]
    fn test_builtin_command_detection() {
        let builtins = Builtins::new();
        assert!(builtins.is_builtin("exit"));
        assert!(builtins.is_builtin("setpath"));
        assert!(builtins.is_builtin("clear"));
        assert!(!builtins.is_builtin("cd"));
        assert!(!builtins.is_builtin("EXIT"));
        assert!(!builtins.is_builtin(""));
    }

    #[test]
    fn test_unknown_command_is_not_handled() {
        let mut captured = Captured::new();
        assert_eq!(captured.run("ls", &[]), None);
        assert!(captured.out.is_empty());
    }

    #[test]
    fn test_dispatch() {
        let mut captured = Captured::new();
        assert_eq!(captured.run("clear", &[]), Some(BuiltinOutcome::Continue));
        assert_eq!(
            captured.run("setpath", &["/opt/"]),
            Some(BuiltinOutcome::Continue)
        );
        assert_eq!(captured.path.as_str(), "/opt/");
        assert_eq!(captured.run("exit", &[]), Some(BuiltinOutcome::Exit));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert_eq!(err.to_string(), "IO error: closed");
    }
}
