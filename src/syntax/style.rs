//! Style tags and styled spans
//!
//! This module defines the fixed style palette the highlighting engine emits
//! and the span type the host rendering surface consumes. The host maps each
//! tag to a concrete color/weight; the engine never deals in colors.

use serde::{Deserialize, Serialize};

use crate::string_utils::safe_slice;

// ─────────────────────────────────────────────────────────────────────────────
// Style Palette
// ─────────────────────────────────────────────────────────────────────────────

/// The fixed palette of style tags a rule can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    /// Language keywords (def, class, function, if, return, ...)
    Keyword,
    /// String literals, attribute values
    String,
    /// Comments, docstrings, DOCTYPE declarations
    Comment,
    /// Numeric literals
    Number,
    /// Function and tag names
    Function,
    /// Operators and punctuation
    Operator,
    /// Unstyled text
    #[default]
    Plain,
}

impl StyleTag {
    /// Get a human-readable name for this tag.
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Keyword => "keyword",
            StyleTag::String => "string",
            StyleTag::Comment => "comment",
            StyleTag::Number => "number",
            StyleTag::Function => "function",
            StyleTag::Operator => "operator",
            StyleTag::Plain => "plain",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Styled Span
// ─────────────────────────────────────────────────────────────────────────────

/// One highlighted region of a single line.
///
/// Offsets are byte positions into the line's UTF-8 text and always fall on
/// character boundaries. Spans emitted for one line are contiguous,
/// non-overlapping, and cover the line exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// Byte offset of the span start within the line
    pub start: usize,
    /// Byte length of the span
    pub len: usize,
    /// Style tag for the region
    pub tag: StyleTag,
}

impl StyledSpan {
    /// Create a new span.
    pub fn new(start: usize, len: usize, tag: StyleTag) -> Self {
        Self { start, len, tag }
    }

    /// Byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// True if this span carries no styling.
    pub fn is_plain(&self) -> bool {
        self.tag == StyleTag::Plain
    }

    /// The region of `line` this span covers. Offsets are adjusted to
    /// character boundaries, so a stale span over edited text cannot panic.
    pub fn slice_line<'a>(&self, line: &'a str) -> &'a str {
        safe_slice(line, self.start, self.end())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
