//! # Tally Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse flags (with `TALLY_*` environment fallbacks)
//! 2. Hand over to [`tally_console::run`]
//! 3. Map the outcome to an exit code

use std::process::ExitCode;

use clap::Parser;
use tally_console::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The actual setup is in lib.rs for better testability
    match tally_console::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally: {err}");
            ExitCode::FAILURE
        }
    }
}
