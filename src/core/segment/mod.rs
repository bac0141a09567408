//! Message segmentation: split a chat message into plain text and fenced code blocks.
//!
//! A fence opens with three backticks, an optional language tag made of ASCII word
//! characters, and a line feed. It closes at the next three backticks. Text outside
//! fences is kept verbatim; code bodies are trimmed at both ends only.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Language reported for a code block whose fence carries no tag.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    // `[A-Za-z0-9_]` rather than `\w`: Unicode word characters must not form a tag.
    FENCE_RE.get_or_init(|| {
        Regex::new(r"(?s)```([A-Za-z0-9_]+)?\n(.*?)```").expect("fence pattern is valid")
    })
}

/// A fenced code block found in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeBlock<'a> {
    /// Tag after the opening fence, or [`DEFAULT_LANGUAGE`].
    pub language: &'a str,
    /// Body with leading and trailing whitespace removed.
    pub content: &'a str,
    /// The whole fenced region as it appears in the message, markers included.
    #[serde(skip)]
    pub source: &'a str,
}

/// One contiguous unit of a parsed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment<'a> {
    Text { content: &'a str },
    Code(CodeBlock<'a>),
}

impl<'a> Segment<'a> {
    /// Untrimmed slice of the original message this segment was cut from.
    pub fn source(&self) -> &'a str {
        match *self {
            Segment::Text { content } => content,
            Segment::Code(block) => block.source,
        }
    }

    /// Displayed content: verbatim text, or the trimmed code body.
    pub fn content(&self) -> &'a str {
        match *self {
            Segment::Text { content } => content,
            Segment::Code(block) => block.content,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code(_))
    }
}

/// Whitespace removed from the ends of a code body. Includes the byte order mark,
/// which models like to emit at the start of a block. NEL (U+0085) is a control
/// character here and stays.
fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Split `raw` into an ordered sequence of text and code segments.
///
/// Never fails: input without a complete fence yields a single text segment holding
/// the whole input, even when the input is empty.
pub fn segment(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in fence_regex().captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last_end {
            segments.push(Segment::Text {
                content: &raw[last_end..whole.start()],
            });
        }
        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or(DEFAULT_LANGUAGE);
        let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        segments.push(Segment::Code(CodeBlock {
            language,
            content: body.trim_matches(is_trimmable),
            source: whole.as_str(),
        }));
        last_end = whole.end();
    }

    if last_end < raw.len() || segments.is_empty() {
        segments.push(Segment::Text {
            content: &raw[last_end..],
        });
    }
    segments
}

/// Concatenate the source slices of `segments`, recovering the message they came from.
pub fn reconstruct(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::source).collect()
}

/// Last code block in `raw`, if any. Used by the client's copy action.
pub fn last_code_block(raw: &str) -> Option<CodeBlock<'_>> {
    segment(raw).into_iter().rev().find_map(|s| match s {
        Segment::Code(block) => Some(block),
        Segment::Text { .. } => None,
    })
}
