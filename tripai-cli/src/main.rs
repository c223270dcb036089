//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tripai_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    match tripai_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("tripai: {err}");
            std::process::exit(1);
        }
    }
}
