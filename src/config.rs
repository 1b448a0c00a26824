use crate::error::ShellError;
use crate::flags::Flags;
use crate::path::SearchPath;

pub const PROMPT: &str = "dsh$ ";
pub const HISTORY_SIZE: usize = 10;

/// Runtime settings resolved from command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub search_path: SearchPath,
    pub prompt: String,
    pub history_size: usize,
    pub quiet: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_path: SearchPath::default(),
            prompt: PROMPT.to_string(),
            history_size: HISTORY_SIZE,
            quiet: false,
            debug: false,
        }
    }
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Result<Self, ShellError> {
        let search_path = match flags.get_value("path") {
            Some(raw) => SearchPath::new(raw)?,
            None => SearchPath::default(),
        };

        Ok(Config {
            search_path,
            quiet: flags.is_set("quiet"),
            debug: flags.is_set("debug"),
            ..Config::default()
        })
    }
}
