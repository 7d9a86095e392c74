//! Line sources for the chat REPL.
//!
//! [`LineSource`] abstracts where prompt lines come from. [`ReadlineSource`]
//! reads from the terminal via [`rustyline`], with history persisted to the
//! cache directory.

use std::path::PathBuf;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// One read from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    /// Ctrl+C while typing.
    Interrupted,
    /// No more input.
    Eof,
}

/// Something that yields input lines on demand.
pub trait LineSource {
    /// Reads one line, showing `label` as the prompt.
    fn read_line(&mut self, label: &str) -> Result<ReadLine>;

    /// Records a submitted line for later recall.
    fn remember(&mut self, _line: &str) {}
}

/// Reads lines from the terminal with editing and history.
pub struct ReadlineSource {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl ReadlineSource {
    /// Creates an editor and loads history from `history_path` if it exists.
    pub fn new(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
            let _ = editor.load_history(path);
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Writes history back to disk.
    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = self.history_path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.editor.save_history(path)?;
        debug!(path = %path.display(), "history saved");
        Ok(())
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, label: &str) -> Result<ReadLine> {
        match self.editor.readline(label) {
            Ok(line) => Ok(ReadLine::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line);
        }
    }
}

/// Replays a fixed script of lines, for tests.
#[cfg(test)]
pub struct ScriptedLines {
    lines: std::collections::VecDeque<ReadLine>,
    pub labels: Vec<String>,
}

#[cfg(test)]
impl ScriptedLines {
    pub fn new(lines: &[&str]) -> Self {
        Self::from_reads(lines.iter().map(|l| ReadLine::Line(l.to_string())).collect())
    }

    pub fn from_reads(reads: Vec<ReadLine>) -> Self {
        Self {
            lines: reads.into(),
            labels: Vec::new(),
        }
    }
}

#[cfg(test)]
impl LineSource for ScriptedLines {
    fn read_line(&mut self, label: &str) -> Result<ReadLine> {
        self.labels.push(label.to_string());
        Ok(self.lines.pop_front().unwrap_or(ReadLine::Eof))
    }
}
