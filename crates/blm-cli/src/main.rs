//! Blocklist matcher CLI.

use blm_cli::cli::{Cli, Command};
use blm_cli::commands::{run_digits, run_match};
use blm_cli::exit_codes::{EXIT_CANCELLED, EXIT_SUCCESS, exit_code_for};
use blm_cli::logging::init_logging;
use blm_cli::summary::{print_digits_summary, print_match_summary};
use blm_match::CancellationToken;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Match(args) => {
            run_match(args, interrupt_token()).map(|run| print_match_summary(&run))
        }
        Command::Digits(args) => run_digits(args).map(|run| print_digits_summary(&run)),
    };
    let exit_code = match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            exit_code_for(&error)
        }
    };
    std::process::exit(i32::from(exit_code));
}

/// Token set by the first Ctrl-C. A second Ctrl-C exits immediately.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    let installed = ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            std::process::exit(i32::from(EXIT_CANCELLED));
        }
        eprintln!("interrupted; stopping after the current row");
        handler_token.cancel();
    });
    if let Err(error) = installed {
        tracing::warn!(%error, "Ctrl-C handler not installed; the run cannot be interrupted cleanly");
    }
    token
}
