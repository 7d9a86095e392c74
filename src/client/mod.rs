//! HTTP transport for the generation endpoint.
//!
//! Contains the [`Client`] struct which posts a [`GenerateRequest`] and
//! resolves the reply into a [`GenerateResponse`]. Streaming and
//! non-streaming replies go through the same [`Client::submit`] call; the
//! `streaming` setting picks how the body is read.

mod error;
mod stream;


pub use error::ClientError;
#[allow(unused_imports)]
pub use stream::{decode, parse_fragment, LineSplitter};

use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Settings;
use crate::generate::{GenerateRequest, GenerateResponse, ServerError};
use crate::output::Renderer;

/// A configured client for one generation server and model.
///
/// Holds a reusable `reqwest` client. Requests are sent one at a time and
/// are never retried.
pub struct Client {
    http: reqwest::Client,
    address: String,
    model: String,
    streaming: bool,
}

impl Client {
    /// Builds a client from resolved settings.
    ///
    /// The optional timeout bounds each request including the body drain.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(
            settings.address(),
            settings.model.clone(),
            settings.streaming,
            settings.timeout,
        )
    }

    pub fn new(
        address: impl Into<String>,
        model: impl Into<String>,
        streaming: bool,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            http,
            address: address.into(),
            model: model.into(),
            streaming,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Sends `prompt` and returns the complete response.
    ///
    /// In streaming mode each fragment is echoed to `renderer` as it is
    /// decoded, before this call returns. In non-streaming mode nothing is
    /// rendered here.
    pub async fn submit(
        &self,
        prompt: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<GenerateResponse, ClientError> {
        let request = GenerateRequest::new(&self.model, prompt, self.streaming);
        let body = serde_json::to_vec(&request).map_err(ClientError::Encode)?;

        debug!(
            address = %self.address,
            model = %self.model,
            stream = self.streaming,
            bytes = body.len(),
            "sending generate request"
        );

        let response = self
            .http
            .post(&self.address)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(ClientError::Connect)?;

        let status = response.status();
        info!(status = status.as_u16(), "response received");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        if self.streaming {
            stream::decode(response.bytes_stream(), renderer).await
        } else {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ClientError::Read(e.into()))?;
            decode_complete(&bytes)
        }
    }
}

/// Decodes a non-streamed body holding a single JSON object.
fn decode_complete(bytes: &[u8]) -> Result<GenerateResponse, ClientError> {
    if let Ok(ServerError { error }) = serde_json::from_slice::<ServerError>(bytes) {
        return Err(ClientError::Server(error));
    }
    serde_json::from_slice(bytes).map_err(ClientError::Decode)
}

/// Extracts the `error` field from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServerError>(body) {
        Ok(err) => err.error,
        Err(_) if body.trim().is_empty() => "(empty body)".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
