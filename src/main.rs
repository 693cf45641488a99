//! # Command Line Interface
//!
//! The command tree is defined in `cli`, the subcommands run in `commands`.

use env_logger;
use fat8kit::cli;
use fat8kit::commands;
use fat8kit::commands::CommandError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let matches = cli::build_cli().get_matches();

    match matches.subcommand() {
        Some(("extract", cmd)) => commands::extract::extract(cmd),
        Some(("filter", cmd)) => commands::filter::filter(cmd),
        Some(("stat", cmd)) => commands::stat::stat(cmd),
        Some(("completions", cmd)) => commands::completions::generate(cli::build_cli(), cmd),
        _ => {
            eprintln!("No subcommand was found, try `fat8kit --help`");
            Err(Box::new(CommandError::InvalidCommand))
        }
    }
}
