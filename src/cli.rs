//! Command-line interface definition and startup for rosh.
//!
//! Uses [`clap`] for argument parsing with derive macros. Flags can also be
//! set through `ROSH_*` environment variables; both win over the config
//! file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use tracing::{info, warn};

use crate::chat::{self, ReadlineSource};
use crate::config::{FileConfig, InputMode, Overrides, Settings};
use crate::output::{self, StdoutRenderer};
use crate::session::Session;

/// Top-level CLI structure for rosh.
#[derive(Parser, Debug)]
#[command(
    name = "rosh",
    version,
    about = "Chat with a local text-generation server from the terminal"
)]
pub struct Cli {
    /// IP address or host name of the server
    #[arg(short = 'i', long = "ip", visible_alias = "host", env = "ROSH_HOST")]
    pub host: Option<String>,

    /// Port of the server
    #[arg(short, long, env = "ROSH_PORT")]
    pub port: Option<u16>,

    /// File to save queries and responses
    #[arg(short, long = "file", env = "ROSH_FILE")]
    pub file: Option<PathBuf>,

    /// Model to use
    #[arg(short, long, env = "ROSH_MODEL")]
    pub model: Option<String>,

    /// Wait for the complete response instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// Submit every line as a prompt instead of waiting for two blank lines
    #[arg(long)]
    pub single_line: bool,

    /// Abort a request after this many seconds (default: wait indefinitely)
    #[arg(short, long, value_name = "SECS", env = "ROSH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to a config file (default: ~/.config/rosh/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Values from flags and environment, to be layered over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            model: self.model.clone(),
            transcript: self.file.clone(),
            stream: self.no_stream.then_some(false),
            multiline: self.single_line.then_some(false),
            timeout_secs: self.timeout,
        }
    }
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which prints usage and exits for
/// `--help` and on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Resolves settings, opens the session and runs the REPL.
///
/// Returns a failing exit code when the session ended because of an error.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let default_path = Settings::config_path().ok();
    let file = FileConfig::load(cli.config.as_deref(), default_path.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), file)?;

    let separator = output::separator_line(output::terminal_width());
    let mut session = Session::from_settings(&settings, separator.clone())?;
    info!(address = %session.address(), model = %session.model(), "session started");

    print_banner(&session, settings.streaming);

    let history_path = match Settings::history_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(error = %e, "prompt history disabled");
            None
        }
    };
    let mut lines = ReadlineSource::new(history_path).context("Failed to initialize line editor")?;
    let mut renderer = StdoutRenderer::new(separator);

    let end = chat::run_chat(&mut session, &mut lines, &mut renderer).await;

    if let Err(e) = lines.save_history() {
        warn!(error = %e, "failed to save prompt history");
    }

    Ok(if end.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_banner(session: &Session, streaming: bool) {
    println!(
        "{} [model: {}] [server: {}]{}",
        "rosh".bold().cyan(),
        session.model().yellow(),
        session.address().yellow(),
        if streaming { "" } else { " [no stream]" },
    );
    if let Some(path) = session.transcript().path() {
        println!("{} {}", "saving to".dimmed(), path.display());
    }
    match session.input_mode() {
        InputMode::MultiLine => println!(
            "{}",
            "Press Enter twice on empty lines to send. /bye or Ctrl+D to exit.".dimmed()
        ),
        InputMode::SingleLine => println!("{}", "/bye or Ctrl+D to exit.".dimmed()),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "rosh", "-i", "10.0.0.2", "-p", "8080", "-f", "out.txt", "-m", "mistral",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(overrides.transcript, Some(PathBuf::from("out.txt")));
        assert_eq!(overrides.model.as_deref(), Some("mistral"));
        assert_eq!(overrides.stream, None);
        assert_eq!(overrides.multiline, None);
    }

    #[test]
    fn test_long_flags_and_modes() {
        let cli = Cli::try_parse_from([
            "rosh",
            "--host",
            "gpu",
            "--no-stream",
            "--single-line",
            "--timeout",
            "30",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("gpu"));
        assert_eq!(overrides.stream, Some(false));
        assert_eq!(overrides.multiline, Some(false));
        assert_eq!(overrides.timeout_secs, Some(30));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["rosh", "--port", "99999"]).is_err());
    }

    #[test]
    fn test_help_is_displayed() {
        let err = Cli::try_parse_from(["rosh", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
