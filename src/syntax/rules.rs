//! Pattern rules for the highlighting engine
//!
//! A language profile is built from two rule kinds: single-line pattern
//! rules (regex + style tag) and multi-line rules (start/end regex pair that
//! opens a [`LineState`] carried to following lines). Rules are data; the
//! matching loop lives in `profile.rs`.

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::style::StyleTag;

// ─────────────────────────────────────────────────────────────────────────────
// Line State
// ─────────────────────────────────────────────────────────────────────────────

/// The multi-line construct open at the end of a line.
///
/// Produced by highlighting one line, consumed as input to the next. The
/// variants are the closed set of multi-line constructs the built-in
/// profiles use; host-registered profiles compose rules over the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineState {
    /// No multi-line construct open
    #[default]
    Default,
    /// Inside a block comment (`/* C */`, `<!-- HTML/XML -->`)
    BlockComment,
    /// Inside a triple-quoted string
    TripleQuote,
    /// Inside a docstring
    Docstring,
    /// Inside a JavaScript template literal
    TemplateLiteral,
    /// Inside an XML CDATA section
    Cdata,
}

impl LineState {
    /// True if no multi-line construct is open.
    pub fn is_default(&self) -> bool {
        matches!(self, LineState::Default)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Single-Line Pattern Rules
// ─────────────────────────────────────────────────────────────────────────────

/// A single-line pattern rule.
///
/// Matches a regex and assigns a style tag to the matched region. Rules are
/// tried in profile order; the selection discipline (earliest match, then
/// longest, then rule order) is applied by the engine.
pub struct HighlightRule {
    /// Name for debugging and logs
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Style tag to assign to matches
    pub tag: StyleTag,
}

impl HighlightRule {
    /// Create a new pattern rule.
    ///
    /// Returns `None` (with a warning logged) if the pattern fails to
    /// compile, so a bad rule degrades to "not highlighted" rather than
    /// aborting profile construction.
    pub fn new(name: &str, pattern: &str, tag: StyleTag) -> Option<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Some(Self {
                name: name.to_string(),
                pattern: regex,
                tag,
            }),
            Err(e) => {
                warn!("Invalid pattern for rule '{}': {}", name, e);
                None
            }
        }
    }

    /// Find the first non-empty match at or after `start`, as absolute byte
    /// offsets.
    ///
    /// Zero-length matches are skipped: a rule must consume at least one
    /// character, otherwise the scan could never make forward progress.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start > text.len() {
            return None;
        }
        self.pattern
            .find_iter(&text[start..])
            .find(|m| m.end() > m.start())
            .map(|m| (start + m.start(), start + m.end()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Multi-Line Rules
// ─────────────────────────────────────────────────────────────────────────────

/// A multi-line construct rule (block comments, triple-quoted strings,
/// template literals, CDATA).
///
/// When the start pattern matches and the end pattern is not found on the
/// same line, the rule's [`LineState`] is carried to the next line.
pub struct MultilineRule {
    /// Name for debugging and logs
    pub name: String,
    /// Pattern that opens the construct
    pub start: Regex,
    /// Pattern that closes the construct
    pub end: Regex,
    /// Style tag covering the whole construct
    pub tag: StyleTag,
    /// State carried to following lines while the construct is open
    pub state: LineState,
    /// Whether the end pattern can be escaped
    pub escapable: bool,
    /// Escape character (usually backslash)
    pub escape_char: Option<char>,
    /// Only match when preceded by nothing but whitespace on the line
    /// (docstring-style constructs)
    pub line_start_only: bool,
}

impl MultilineRule {
    /// Create a new multiline rule.
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        tag: StyleTag,
        state: LineState,
    ) -> Option<Self> {
        let start = match Regex::new(start_pattern) {
            Ok(r) => r,
            Err(e) => {
                warn!("Invalid start pattern for rule '{}': {}", name, e);
                return None;
            }
        };
        let end = match Regex::new(end_pattern) {
            Ok(r) => r,
            Err(e) => {
                warn!("Invalid end pattern for rule '{}': {}", name, e);
                return None;
            }
        };
        Some(Self {
            name: name.to_string(),
            start,
            end,
            tag,
            state,
            escapable: false,
            escape_char: None,
            line_start_only: false,
        })
    }

    /// Builder: the end pattern may be escaped with `escape_char`.
    pub fn with_escape(mut self, escape_char: char) -> Self {
        self.escapable = true;
        self.escape_char = Some(escape_char);
        self
    }

    /// Builder: only match at the start of a line (ignoring leading
    /// whitespace).
    pub fn at_line_start(mut self) -> Self {
        self.line_start_only = true;
        self
    }

    /// Find the first usable start-pattern match at or after `start`, as
    /// absolute byte offsets. Zero-length matches are skipped, as are
    /// matches failing the `line_start_only` restriction.
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start > text.len() {
            return None;
        }
        for m in self.start.find_iter(&text[start..]) {
            if m.end() == m.start() {
                continue;
            }
            let (abs_start, abs_end) = (start + m.start(), start + m.end());
            if self.line_start_only && !text[..abs_start].chars().all(|c| c == ' ' || c == '\t') {
                continue;
            }
            return Some((abs_start, abs_end));
        }
        None
    }

    /// Find the end of this construct from `start`, respecting escapes.
    ///
    /// Returns the byte offset one past the closing delimiter.
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        if start > text.len() {
            return None;
        }

        let search_text = &text[start..];
        let mut pos = 0;
        while let Some(m) = self.end.find(&search_text[pos..]) {
            let match_start = pos + m.start();
            let match_end = pos + m.end();

            if self.escapable && match_start > 0 {
                // An odd run of escape characters before the delimiter
                // means it is escaped
                let escape_count = search_text[..match_start]
                    .chars()
                    .rev()
                    .take_while(|&c| Some(c) == self.escape_char)
                    .count();
                if escape_count % 2 == 1 {
                    if match_end == match_start {
                        break; // zero-width end match, avoid spinning
                    }
                    pos = match_end;
                    continue;
                }
            }
            return Some(start + match_end);
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
