//! Entry point for rosh, an interactive terminal client for local
//! text-generation servers.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! initializes logging and runs the prompt REPL.

mod chat;
mod cli;
mod client;
mod config;
mod constants;
mod format;
mod generate;
mod output;
mod session;
mod transcript;

use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Runs the rosh CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and hands off to [`cli::run`].
/// Startup errors and sessions that ended on an error exit with status 1.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    init_logging(cli.verbose);

    match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with streamed text on stdout.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
