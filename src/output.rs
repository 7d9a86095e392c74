//! Output rendering abstraction for rosh.
//!
//! Defines the [`Renderer`] trait that decouples response output from the
//! terminal. [`StdoutRenderer`] echoes streamed text as it arrives and prints
//! whole responses framed by separator lines.

use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

use crate::constants::{FALLBACK_TERMINAL_WIDTH, SEPARATOR_CHAR};
use crate::format;
use crate::generate::GenerateResponse;

/// Trait for rendering generation output.
pub trait Renderer {
    /// Render a streamed fragment as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when a streamed response is complete.
    fn render_done(&mut self);

    /// Render a complete, non-streamed response.
    fn render_response(&mut self, response: &GenerateResponse);

    /// Called when a turn fails.
    fn render_error(&mut self, err: &str);
}

/// Returns the terminal width in columns, or a fallback when stdout is not a terminal.
pub fn terminal_width() -> usize {
    match terminal_size::terminal_size() {
        Some((w, _)) => (w.0 as usize).max(1),
        None => {
            debug!(
                width = FALLBACK_TERMINAL_WIDTH,
                "could not determine terminal width, using fallback"
            );
            FALLBACK_TERMINAL_WIDTH
        }
    }
}

/// Builds the separator line printed between turns.
pub fn separator_line(width: usize) -> String {
    SEPARATOR_CHAR.to_string().repeat(width)
}

/// Renders output directly to stdout.
///
/// Each streamed fragment is printed immediately with an explicit flush so
/// the user sees the answer as it is generated.
pub struct StdoutRenderer {
    separator: String,
    fragment_count: usize,
}

impl StdoutRenderer {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            fragment_count: 0,
        }
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        // Flush immediately so each fragment appears as it arrives
        io::stdout().flush().ok();
        self.fragment_count += 1;
    }

    fn render_done(&mut self) {
        debug!(fragments = self.fragment_count, "stream complete");
        println!();
        println!("{}", self.separator.dimmed());
        println!();
        self.fragment_count = 0;
    }

    fn render_response(&mut self, response: &GenerateResponse) {
        println!("{}", format::response_block(response, &self.separator));
    }

    fn render_error(&mut self, err: &str) {
        if self.fragment_count > 0 {
            // Partial output is left on screen; start the error on its own line.
            println!();
            self.fragment_count = 0;
        }
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

/// Renderer that records everything it is given, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub tokens: Vec<String>,
    pub done_count: usize,
    pub responses: Vec<GenerateResponse>,
    pub errors: Vec<String>,
}

#[cfg(test)]
impl RecordingRenderer {
    pub fn echoed(&self) -> String {
        self.tokens.concat()
    }
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn render_token(&mut self, token: &str) {
        self.tokens.push(token.to_string());
    }

    fn render_done(&mut self) {
        self.done_count += 1;
    }

    fn render_response(&mut self, response: &GenerateResponse) {
        self.responses.push(response.clone());
    }

    fn render_error(&mut self, err: &str) {
        self.errors.push(err.to_string());
    }
}
