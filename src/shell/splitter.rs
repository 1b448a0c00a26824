pub const STATEMENT_SEPARATOR: char = ';';
pub const MAX_COMMANDS: usize = 256;
pub const MAX_ARGUMENTS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("too many commands on one line (limit {limit})")]
    TooManyCommands { limit: usize },
    #[error("{program}: too many arguments (limit {limit})")]
    TooManyArguments { program: String, limit: usize },
}

/// One command's tokens; the first token is the program name.
pub type Command = Vec<String>;

/// Split a raw input line into its commands, each already tokenized.
///
/// Blank commands (`;;`, a trailing `;`, whitespace only) are dropped.
pub fn split_line(line: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();

    for part in line.split(STATEMENT_SEPARATOR) {
        let args = split_args(part)?;
        if args.is_empty() {
            continue;
        }
        if commands.len() == MAX_COMMANDS {
            return Err(ParseError::TooManyCommands {
                limit: MAX_COMMANDS,
            });
        }
        commands.push(args);
    }

    Ok(commands)
}

pub fn split_args(command: &str) -> Result<Command, ParseError> {
    let args: Command = command.split_whitespace().map(String::from).collect();

    if args.len() > MAX_ARGUMENTS {
        return Err(ParseError::TooManyArguments {
            program: args[0].clone(),
            limit: MAX_ARGUMENTS,
        });
    }

    Ok(args)
}
