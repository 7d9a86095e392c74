//! Interactive prompt REPL for rosh.
//!
//! Reads prompts from a [`LineSource`], submits each through the
//! [`Session`], and stops on `/bye`, end of input, or the first failed
//! turn. Requests are strictly sequential: a prompt is fully resolved
//! before the next one is read.
//!
//! # Input behavior
//!
//! - **Ctrl+C while typing**: discards the pending prompt, stays in the REPL
//! - **Ctrl+C during a request**: abandons that request, stays in the REPL
//! - **Ctrl+D**: exits cleanly
//! - **`/bye`**: exits without submitting the pending prompt

mod input;
mod lines;

pub use lines::{LineSource, ReadLine, ReadlineSource};

use colored::Colorize;
use tracing::{info, warn};

use crate::constants::{CONTINUATION_LABEL, PROMPT_LABEL};
use crate::output::Renderer;
use crate::session::{Session, TurnError};
use input::{Collected, PromptCollector};

/// How a chat session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `/bye`.
    Bye,
    /// Input was exhausted.
    EndOfInput,
    /// A turn failed and the loop stopped.
    Failed,
}

impl SessionEnd {
    pub fn is_failure(self) -> bool {
        self == SessionEnd::Failed
    }
}

/// Waits for Ctrl+C. Never resolves if the signal handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Runs the REPL until the session ends.
pub async fn run_chat(
    session: &mut Session,
    lines: &mut dyn LineSource,
    renderer: &mut dyn Renderer,
) -> SessionEnd {
    let mut collector = PromptCollector::new(session.input_mode());
    let mut turns = 0usize;

    loop {
        let label = if collector.is_empty() {
            PROMPT_LABEL
        } else {
            CONTINUATION_LABEL
        };

        let line = match lines.read_line(label) {
            Ok(ReadLine::Line(line)) => line,
            Ok(ReadLine::Interrupted) => {
                collector.reset();
                println!("{}", "^C".dimmed());
                continue;
            }
            Ok(ReadLine::Eof) => {
                println!("{}", "goodbye.".dimmed());
                info!(turns, "input exhausted");
                return SessionEnd::EndOfInput;
            }
            Err(e) => {
                renderer.render_error(&e.to_string());
                return SessionEnd::Failed;
            }
        };

        let prompt = match collector.push_line(&line) {
            Collected::Pending => continue,
            Collected::Bye => {
                println!("{}", "goodbye.".dimmed());
                info!(turns, "session ended by user");
                return SessionEnd::Bye;
            }
            Collected::Prompt(prompt) => prompt,
        };
        lines.remember(&prompt);
        println!();

        match session.turn(&prompt, renderer, interrupted()).await {
            Ok(()) => turns += 1,
            Err(TurnError::Cancelled) => {
                println!();
                println!("{}", "cancelled.".dimmed());
            }
            Err(e) => {
                warn!(error = %e, "turn failed, ending session");
                renderer.render_error(&e.to_string());
                return SessionEnd::Failed;
            }
        }
    }
}
