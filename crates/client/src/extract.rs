//! Pulls the first fenced code block out of a finished assistant reply so
//! it can replace the editor pane's content.

use std::sync::LazyLock;

use regex::Regex;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Triple backtick, optional language tag, newline, body, closing fence.
    Regex::new(r"(?s)```[A-Za-z0-9_+#.-]*\n(.*?)```").expect("invalid fence regex")
});

/// Returns the trimmed body of the first fenced code block, if any.
pub fn extract_code_block(text: &str) -> Option<String> {
    FENCE_RE
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
}
