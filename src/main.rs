//! Binary entrypoint for the `overseer` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = overseer::logging::init() {
        eprintln!("{err}");
    }
    match overseer::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
