//! Newline-delimited JSON decoding for streamed responses.
//!
//! Each line of the body is one JSON [`Fragment`]. Fragments are echoed to the
//! [`Renderer`] as they are decoded and folded into a [`GenerateResponse`]
//! until one arrives with `done: true`.

use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::error::{BoxError, ClientError};
use crate::generate::{Accumulator, Fragment, GenerateResponse};
use crate::output::Renderer;

/// Splits a byte stream into complete lines.
///
/// Bytes after the last newline are held until the next chunk completes the
/// line, so multi-byte characters split across chunks are reassembled.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Feeds a chunk and returns every line it completed, without the newline.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            lines.push(line);
        }
        lines
    }

    /// Returns the trailing unterminated line, if any.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}

/// Parses one line into a fragment. Blank lines yield `None`.
pub fn parse_fragment(line: &[u8]) -> Result<Option<Fragment>, ClientError> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }

    let fragment: Fragment = serde_json::from_slice(line).map_err(ClientError::Decode)?;
    if let Some(message) = fragment.error {
        return Err(ClientError::Server(message));
    }
    Ok(Some(fragment))
}

/// Applies one line to the accumulator. Returns `true` once the response is done.
fn apply_line(
    line: &[u8],
    acc: &mut Accumulator,
    renderer: &mut dyn Renderer,
) -> Result<bool, ClientError> {
    let Some(fragment) = parse_fragment(line)? else {
        return Ok(false);
    };
    trace!(len = fragment.response.len(), done = fragment.done, "fragment");

    let done = acc.absorb(&fragment);
    renderer.render_token(&fragment.response);
    if done {
        renderer.render_done();
    }
    Ok(done)
}

/// Decodes a streamed body into a complete response.
///
/// Stops reading at the first `done` fragment. A malformed line, a read
/// error, or a body that ends without a `done` fragment fails the whole
/// response; text already echoed stays on screen.
pub async fn decode<S, B, E>(
    body: S,
    renderer: &mut dyn Renderer,
) -> Result<GenerateResponse, ClientError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<BoxError>,
{
    let mut body = std::pin::pin!(body);
    let mut lines = LineSplitter::default();
    let mut acc = Accumulator::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| ClientError::Read(e.into()))?;
        for line in lines.feed(chunk.as_ref()) {
            if apply_line(&line, &mut acc, renderer)? {
                return acc.finish().ok_or(ClientError::Incomplete);
            }
        }
    }

    if let Some(line) = lines.finish() {
        apply_line(&line, &mut acc, renderer)?;
    }

    if !acc.is_done() {
        debug!(received = acc.text().len(), "stream closed without a done fragment");
    }
    acc.finish().ok_or(ClientError::Incomplete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingRenderer;
    use futures::stream;
    use std::io;

    fn body(chunks: &[&str]) -> impl Stream<Item = Result<Vec<u8>, io::Error>> {
        let items: Vec<Result<Vec<u8>, io::Error>> =
            chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect();
        stream::iter(items)
    }

    fn line(model: &str, created_at: &str, text: &str, done: bool) -> String {
        format!(
            "{}\n",
            serde_json::json!({
                "model": model,
                "created_at": created_at,
                "response": text,
                "done": done,
            })
        )
    }

    #[test]
    fn test_splitter_holds_partial_line() {
        let mut splitter = LineSplitter::default();
        assert!(splitter.feed(b"{\"a\":").is_empty());
        let lines = splitter.feed(b"1}\n{\"b\"");
        assert_eq!(lines, vec![b"{\"a\":1}".to_vec()]);
        assert_eq!(splitter.finish(), Some(b"{\"b\"".to_vec()));
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_parse_fragment_skips_blank_lines() {
        assert!(parse_fragment(b"  \r").unwrap().is_none());
    }

    #[test]
    fn test_parse_fragment_reports_server_error() {
        let err = parse_fragment(br#"{"error":"model 'x' not found"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Server(ref m) if m == "model 'x' not found"));
    }

    #[tokio::test]
    async fn test_decode_concatenates_fragments() {
        let first = line("llama3.2", "2024-01-01T00:00:00Z", "Hello", false);
        let second = line("other", "2024-01-01T00:00:01Z", ", ", false);
        let third = line("other", "2024-01-01T00:00:02Z", "world", true);
        let chunks = [first.as_str(), second.as_str(), third.as_str()];

        let mut renderer = RecordingRenderer::default();
        let response = decode(body(&chunks), &mut renderer).await.unwrap();

        assert_eq!(response.response, "Hello, world");
        assert_eq!(response.model, "llama3.2");
        assert_eq!(response.created_at, "2024-01-01T00:00:00Z");
        assert!(response.done);
        assert_eq!(renderer.tokens, vec!["Hello", ", ", "world"]);
        assert_eq!(renderer.done_count, 1);
    }

    #[tokio::test]
    async fn test_decode_handles_lines_split_across_chunks() {
        let full = format!(
            "{}{}",
            line("m", "t", "caf\u{e9} ", false),
            line("m", "t", "au lait", true)
        );
        let bytes = full.as_bytes();
        // Split inside the two-byte 'é' and inside the second object.
        let cut_a = full.find('\u{e9}').unwrap() + 1;
        let cut_b = cut_a + 30;
        let chunks: Vec<Result<Vec<u8>, io::Error>> = vec![
            Ok(bytes[..cut_a].to_vec()),
            Ok(bytes[cut_a..cut_b].to_vec()),
            Ok(bytes[cut_b..].to_vec()),
        ];

        let mut renderer = RecordingRenderer::default();
        let response = decode(stream::iter(chunks), &mut renderer).await.unwrap();
        assert_eq!(response.response, "caf\u{e9} au lait");
    }

    #[tokio::test]
    async fn test_decode_stops_at_done() {
        let done = line("m", "t", "end", true);
        let after = line("m", "t", "ignored", false);
        let joined = format!("{done}{after}");

        let mut renderer = RecordingRenderer::default();
        let response = decode(body(&[joined.as_str(), "not json\n"]), &mut renderer)
            .await
            .unwrap();
        assert_eq!(response.response, "end");
        assert_eq!(renderer.echoed(), "end");
    }

    #[tokio::test]
    async fn test_decode_accepts_final_line_without_newline() {
        let last = line("m", "t", "ok", true);
        let mut renderer = RecordingRenderer::default();
        let response = decode(body(&[last.trim_end()]), &mut renderer)
            .await
            .unwrap();
        assert_eq!(response.response, "ok");
    }

    #[tokio::test]
    async fn test_decode_without_done_is_incomplete() {
        let first = line("m", "t", "half an ", false);
        let second = line("m", "t", "answer", false);
        let mut renderer = RecordingRenderer::default();
        let err = decode(body(&[first.as_str(), second.as_str()]), &mut renderer)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Incomplete));
        // Partial text was still echoed.
        assert_eq!(renderer.echoed(), "half an answer");
        assert_eq!(renderer.done_count, 0);
    }

    #[tokio::test]
    async fn test_decode_empty_body_is_incomplete() {
        let mut renderer = RecordingRenderer::default();
        let err = decode(body(&[]), &mut renderer).await.unwrap_err();
        assert!(matches!(err, ClientError::Incomplete));
        assert!(renderer.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_decode_malformed_line_aborts() {
        let first = line("m", "t", "fine", false);
        let mut renderer = RecordingRenderer::default();
        let err = decode(body(&[first.as_str(), "{oops\n"]), &mut renderer)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_decode_read_error_aborts() {
        let first = line("m", "t", "fine", false);
        let chunks: Vec<Result<Vec<u8>, io::Error>> = vec![
            Ok(first.into_bytes()),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let mut renderer = RecordingRenderer::default();
        let err = decode(stream::iter(chunks), &mut renderer)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Read(_)));
    }
}
