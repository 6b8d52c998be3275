//! Entry point for the `listings` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use listings_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() -> ExitCode {
    match listings_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("listings: {err}");
            ExitCode::FAILURE
        }
    }
}
