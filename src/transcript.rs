//! Transcript persistence for rosh.
//!
//! When a transcript path is configured, every completed turn is appended to
//! it as a plain-text block. The file is opened once in append-create mode
//! and closed when the [`Transcript`] is dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::format;
use crate::generate::GenerateResponse;

/// Failures opening or writing the transcript file.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to open file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to file: {0}")]
    Write(#[source] io::Error),
}

/// Append-only log of prompt/response pairs.
///
/// A transcript without a file accepts every append and writes nothing.
#[derive(Debug)]
pub struct Transcript {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl Transcript {
    /// A transcript that records nothing.
    pub fn disabled() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// Opens `path` for appending, creating it if needed. `None` disables recording.
    pub fn open(path: Option<&Path>) -> Result<Self, TranscriptError> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| TranscriptError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "transcript opened");

        Ok(Self {
            file: Some(file),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends one turn and flushes it.
    pub fn append(
        &mut self,
        prompt: &str,
        response: &GenerateResponse,
        separator: &str,
    ) -> Result<(), TranscriptError> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        let block = format::transcript_block(prompt, response, separator);
        file.write_all(block.as_bytes()).map_err(TranscriptError::Write)?;
        file.flush().map_err(TranscriptError::Write)?;
        debug!(bytes = block.len(), "transcript entry written");
        Ok(())
    }
}
