//! Session state for rosh.
//!
//! A [`Session`] lives for the whole process: it owns the HTTP [`Client`]
//! (server address and model) and the [`Transcript`], both fixed at startup.
//! [`Session::turn`] resolves one prompt end to end.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

use crate::client::{Client, ClientError};
use crate::config::{InputMode, Settings};
use crate::output::Renderer;
use crate::transcript::{Transcript, TranscriptError};

/// Why a turn did not complete.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("request cancelled")]
    Cancelled,
}

/// An active prompt/response session.
pub struct Session {
    client: Client,
    transcript: Transcript,
    input_mode: InputMode,
    separator: String,
}

impl Session {
    pub fn new(
        client: Client,
        transcript: Transcript,
        input_mode: InputMode,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            client,
            transcript,
            input_mode,
            separator: separator.into(),
        }
    }

    /// Builds the client and opens the transcript from resolved settings.
    pub fn from_settings(
        settings: &Settings,
        separator: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::from_settings(settings)?;
        let transcript = Transcript::open(settings.transcript.as_deref())?;
        Ok(Self::new(client, transcript, settings.input_mode, separator))
    }

    pub fn address(&self) -> &str {
        self.client.address()
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submits one prompt, renders the result and records it.
    ///
    /// Resolving `cancel` before the response is complete abandons the
    /// request. Nothing is written to the transcript unless the whole turn
    /// succeeded.
    pub async fn turn<C>(
        &mut self,
        prompt: &str,
        renderer: &mut dyn Renderer,
        cancel: C,
    ) -> Result<(), TurnError>
    where
        C: Future<Output = ()>,
    {
        debug!(chars = prompt.chars().count(), "submitting prompt");

        let response = tokio::select! {
            result = self.client.submit(prompt, &mut *renderer) => result?,
            _ = cancel => return Err(TurnError::Cancelled),
        };

        // Streamed text was already echoed while decoding.
        if !self.client.is_streaming() {
            renderer.render_response(&response);
        }

        self.transcript.append(prompt, &response, &self.separator)?;
        Ok(())
    }
}
