use dsh::config::Config;
use dsh::error::ShellError;
use dsh::flags::Flags;
use dsh::highlight::Highlighter;
use dsh::logging;
use dsh::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("ERROR: {}", e);
            eprintln!("{}\n", Highlighter::new().highlight_error(&message));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("dsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::from_flags(&flags)?;
    logging::init(config.debug);
    tracing::debug!(path = %config.search_path, "starting");

    let mut shell = Shell::new(config)?;
    shell.run()
}
