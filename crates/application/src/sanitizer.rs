//! Speech-safe text sanitizer
//!
//! Cleans generated text before it is spoken aloud: markdown emphasis is
//! stripped, characters the TTS voice stumbles over are dropped, whitespace
//! is collapsed, and the result is capped at a length that fits a short
//! spoken reply. The function is pure and idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of speech-safe text, in characters
pub const MAX_SPEECH_CHARS: usize = 150;

/// Matched emphasis/code spans: `**X**`, `*X*`, `` `X` ``, `__X__`.
/// Non-greedy so adjacent spans don't merge; unbalanced markers fall
/// through as literal characters.
#[allow(clippy::unwrap_used)]
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|\*(.*?)\*|`(.*?)`|__(.*?)__").unwrap());

/// Everything that is not a word character, whitespace, or the punctuation
/// a voice actually pronounces as a pause.
#[allow(clippy::unwrap_used)]
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s.!?,\-]").unwrap());

/// Runs of whitespace, including newlines from streamed fragments.
#[allow(clippy::unwrap_used)]
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Make generated text safe to hand to the TTS voice.
///
/// Steps, in order (the order affects the result):
/// 1. Strip matched emphasis/code markup, keeping the inner text.
/// 2. Drop every character outside `[\w\s.!?,-]`.
/// 3. Collapse whitespace runs to single spaces and trim the ends.
/// 4. Hard-truncate to [`MAX_SPEECH_CHARS`] characters, trimming any
///    whitespace the cut exposes at the end.
pub fn sanitize_for_speech(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, |caps: &regex::Captures<'_>| {
        // Exactly one alternative participates per match; keep its span.
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or_else(String::new, |m| m.as_str().to_string())
    });

    let filtered = DISALLOWED.replace_all(&stripped, "");
    let collapsed = WHITESPACE.replace_all(filtered.trim(), " ");

    let truncated: String = collapsed.chars().take(MAX_SPEECH_CHARS).collect();
    truncated.trim_end().to_string()
}
