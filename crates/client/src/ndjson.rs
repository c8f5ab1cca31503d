//! Incremental parser for the backend's chat stream: newline-delimited
//! JSON, one object per line, each optionally carrying a `token` field.

use serde::Deserialize;

/// One parsed line of the chat stream.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    /// Incremental fragment of model-generated text. Lines without a
    /// `token` field (e.g. the backend's `{"error": ...}` lines) parse
    /// with `None` and contribute nothing to the transcript.
    pub token: Option<String>,
}

/// Buffers incomplete lines across chunk boundaries and yields one
/// `ChatChunk` per complete, well-formed line. Malformed lines are
/// dropped, not buffered for reassembly.
pub struct NdjsonParser {
    buffer: String,
}

impl NdjsonParser {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Feed raw bytes from the HTTP response. Returns any complete
    /// chunks found.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ChatChunk> {
        let text = String::from_utf8_lossy(chunk);
        self.buffer.push_str(&text);

        let mut chunks = Vec::new();

        while let Some(pos) = self.buffer.find('\n') {
            let line = self.buffer[..pos].trim().to_string();
            self.buffer = self.buffer[pos + 1..].to_string();

            if line.is_empty() {
                continue;
            }

            // Skip anything that isn't a JSON object; partial frames are
            // not stitched back together.
            match serde_json::from_str::<ChatChunk>(&line) {
                Ok(parsed) => chunks.push(parsed),
                Err(_) => continue,
            }
        }

        chunks
    }
}

impl Default for NdjsonParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(chunks: Vec<ChatChunk>) -> String {
        chunks.into_iter().filter_map(|c| c.token).collect()
    }

    #[test]
    fn test_tokens_accumulate_across_feeds() {
        let mut parser = NdjsonParser::new();
        let mut out = String::new();
        out.push_str(&tokens(parser.feed(b"{\"token\":\"Hel\"}\n")));
        out.push_str(&tokens(parser.feed(b"{\"token\":\"lo\"}\n")));
        assert_eq!(out, "Hello");
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut parser = NdjsonParser::new();
        let first = parser.feed(b"{\"token\":\"wor");
        assert!(first.is_empty());
        let second = parser.feed(b"ld\"}\n");
        assert_eq!(tokens(second), "world");
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut parser = NdjsonParser::new();
        let chunks =
            parser.feed(b"{\"token\":\"a\"}\nnot json at all\n{\"token\":\"b\"}\n");
        assert_eq!(tokens(chunks), "ab");
    }

    #[test]
    fn test_blank_lines_discarded() {
        let mut parser = NdjsonParser::new();
        let chunks = parser.feed(b"\n\n{\"token\":\"x\"}\n\n");
        assert_eq!(chunks.len(), 1);
        assert_eq!(tokens(chunks), "x");
    }

    #[test]
    fn test_error_line_yields_no_token() {
        let mut parser = NdjsonParser::new();
        let chunks = parser.feed(b"{\"error\":\"Ollama API error\"}\n");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].token.is_none());
    }

    #[test]
    fn test_trailing_partial_line_stays_buffered() {
        let mut parser = NdjsonParser::new();
        let chunks = parser.feed(b"{\"token\":\"a\"}\n{\"token\":\"b\"");
        assert_eq!(tokens(chunks), "a");
        // Closing the stream without a final newline drops the fragment;
        // nothing asserts on it here, it simply never becomes a chunk.
    }
}
