use std::process::ExitCode;

use clap::Parser;
use plist_tree::cli::{self, Args};

fn main() -> ExitCode {
    // usage errors exit with code 2 from inside clap
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    match cli::run(&args) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Failed to read one or both plist files: {e}");
            ExitCode::from(cli::EXIT_FAILURE)
        }
    }
}
