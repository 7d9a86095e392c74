//! Prompt collection for the chat REPL.
//!
//! [`PromptCollector`] turns raw input lines into submitted prompts. In
//! multi-line mode lines accumulate until two consecutive blank lines; in
//! single-line mode every line is a prompt. `/bye` ends the session in
//! either mode.

use crate::config::InputMode;
use crate::constants::{BYE_COMMAND, SUBMIT_BLANK_LINES};

/// Outcome of feeding one line to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Collected {
    /// More lines are needed before the prompt is complete.
    Pending,
    /// A complete prompt, ready to submit.
    Prompt(String),
    /// The user asked to end the session.
    Bye,
}

/// Accumulates input lines into prompts.
#[derive(Debug)]
pub(crate) struct PromptCollector {
    mode: InputMode,
    lines: Vec<String>,
    blank_run: usize,
}

impl PromptCollector {
    pub(crate) fn new(mode: InputMode) -> Self {
        Self {
            mode,
            lines: Vec::new(),
            blank_run: 0,
        }
    }

    /// Whether no line of the current prompt has been entered yet.
    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.blank_run == 0
    }

    /// Discards any partially entered prompt.
    pub(crate) fn reset(&mut self) {
        self.lines.clear();
        self.blank_run = 0;
    }

    /// Feeds one input line (without its newline).
    pub(crate) fn push_line(&mut self, line: &str) -> Collected {
        if line.trim() == BYE_COMMAND {
            self.reset();
            return Collected::Bye;
        }

        match self.mode {
            InputMode::SingleLine => Collected::Prompt(line.trim().to_string()),
            InputMode::MultiLine => {
                if line.trim().is_empty() {
                    self.blank_run += 1;
                    if self.blank_run >= SUBMIT_BLANK_LINES {
                        return Collected::Prompt(self.take_prompt());
                    }
                } else {
                    self.blank_run = 0;
                }
                self.lines.push(line.to_string());
                Collected::Pending
            }
        }
    }

    /// Joins the buffered lines, trimming leading horizontal whitespace and
    /// all trailing whitespace.
    fn take_prompt(&mut self) -> String {
        let joined = self.lines.join("\n");
        self.reset();
        joined
            .trim_start_matches([' ', '\t'])
            .trim_end()
            .to_string()
    }
}
