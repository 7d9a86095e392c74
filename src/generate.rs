//! Wire types for the `/api/generate` endpoint.
//!
//! Provides the outgoing [`GenerateRequest`], the [`Fragment`] decoded from
//! each line of a streamed body, and the [`GenerateResponse`] that a whole
//! turn resolves to. [`Accumulator`] folds fragments into a response.

use serde::{Deserialize, Serialize};

/// Request body sent to the generation endpoint.
///
/// Built fresh for every turn and consumed by the transport that sends it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, stream: bool) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream,
        }
    }
}

/// One decoded line of a streamed response.
///
/// Servers attach extra statistics to the final fragment; unknown fields are
/// ignored. A fragment carrying `error` reports a server-side failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fragment {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    pub error: Option<String>,
}

/// The complete response for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
}

/// Error object a server may send instead of a response.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerError {
    pub error: String,
}

/// Folds streamed fragments into a single [`GenerateResponse`].
///
/// `model` and `created_at` are taken from the first fragment only; some
/// backends leave them empty on later chunks.
#[derive(Debug, Default)]
pub struct Accumulator {
    response: GenerateResponse,
    metadata_captured: bool,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment and returns whether it marked completion.
    pub fn absorb(&mut self, fragment: &Fragment) -> bool {
        self.response.response.push_str(&fragment.response);

        if !self.metadata_captured {
            self.response.model = fragment.model.clone();
            self.response.created_at = fragment.created_at.clone();
            self.metadata_captured = true;
        }

        if fragment.done {
            self.response.done = true;
        }
        self.response.done
    }

    pub fn is_done(&self) -> bool {
        self.response.done
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.response.response
    }

    /// Returns the response if a `done` fragment was seen.
    pub fn finish(self) -> Option<GenerateResponse> {
        if self.response.done {
            Some(self.response)
        } else {
            None
        }
    }
}
