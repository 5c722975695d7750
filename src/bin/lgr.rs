//! `lgr` binary: logs every stdin line through one client.
//!
//! Usage:
//!   some-command | lgr --name job --level warn --time-format '%H:%M:%S'
//!   some-command | lgr --file ~/logs/job.log --prefix full

use clap::Parser;
use lgr::cli::{Cli, run_stdin};
use lgr::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    internal::init_from_env();

    match run_stdin(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lgr: {e}");
            ExitCode::FAILURE
        }
    }
}
