//! Language profiles and the line highlighting engine
//!
//! A [`LanguageProfile`] is an ordered rule set for one language. The engine
//! contract is a pure function of its inputs: given one line of text and the
//! state left by the previous line, produce styled spans covering the line
//! and the state for the next line.
//!
//! # Match selection
//!
//! At each scan position the engine considers every rule and picks the
//! earliest match; among matches at the same position the longest wins, and
//! equal-length ties resolve by rule order (multi-line rules ahead of
//! single-line rules). Zero-length matches are rejected outright so the scan
//! always makes forward progress. Text no rule claims accumulates into
//! `Plain` spans.

use log::warn;

use super::rules::{HighlightRule, LineState, MultilineRule};
use super::style::{StyleTag, StyledSpan};

// ─────────────────────────────────────────────────────────────────────────────
// Highlight Result
// ─────────────────────────────────────────────────────────────────────────────

/// The result of highlighting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// Contiguous spans covering the line
    pub spans: Vec<StyledSpan>,
    /// State at the end of the line, input for the next line
    pub end_state: LineState,
}

impl HighlightedLine {
    /// A single plain span covering `len` bytes (empty lines get no spans).
    fn plain(len: usize) -> Self {
        let spans = if len > 0 {
            vec![StyledSpan::new(0, len, StyleTag::Plain)]
        } else {
            Vec::new()
        };
        Self {
            spans,
            end_state: LineState::Default,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Language Profile
// ─────────────────────────────────────────────────────────────────────────────

/// A complete rule set for highlighting one language.
pub struct LanguageProfile {
    /// Language name (e.g., "Python", "XML")
    pub name: String,
    /// File extensions this profile claims (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Single-line pattern rules, in priority order
    rules: Vec<HighlightRule>,
    /// Multi-line construct rules, in priority order
    multiline_rules: Vec<MultilineRule>,
}

impl LanguageProfile {
    /// Create a new empty profile.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            rules: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    /// The fallback profile for unknown extensions: no rules, every line is
    /// a single plain span.
    pub fn plain_text() -> Self {
        Self::new("Plain Text")
    }

    /// Add a file extension.
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_lowercase());
    }

    /// Add a single-line rule.
    ///
    /// Accepts the `Option` produced by [`HighlightRule::new`] directly so a
    /// rule with an invalid pattern (already logged) is silently skipped.
    pub fn add_rule(&mut self, rule: Option<HighlightRule>) {
        if let Some(rule) = rule {
            self.rules.push(rule);
        }
    }

    /// Add a multi-line rule.
    pub fn add_multiline(&mut self, rule: Option<MultilineRule>) {
        if let Some(rule) = rule {
            self.multiline_rules.push(rule);
        }
    }

    /// True if the profile has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.multiline_rules.is_empty()
    }

    /// Find the multi-line rule responsible for a carried state.
    fn multiline_for_state(&self, state: LineState) -> Option<&MultilineRule> {
        self.multiline_rules.iter().find(|r| r.state == state)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line Highlighting
    // ─────────────────────────────────────────────────────────────────────────

    /// Highlight a single line of text.
    ///
    /// # Arguments
    /// * `text` - The line's text, without a trailing newline
    /// * `start_state` - The end state of the previous line
    ///
    /// # Returns
    /// Styled spans covering the line and the state for the next line.
    /// Never fails: unmatched or malformed regions degrade to plain spans.
    pub fn highlight_line(&self, text: &str, start_state: LineState) -> HighlightedLine {
        if self.is_empty() {
            return HighlightedLine::plain(text.len());
        }

        let mut spans: Vec<StyledSpan> = Vec::new();
        let mut pos = 0;

        // An open multi-line construct is handled before any rule matching:
        // either it closes on this line or it consumes the whole line.
        if !start_state.is_default() {
            match self.multiline_for_state(start_state) {
                Some(rule) => match rule.find_end(text, 0) {
                    Some(close) => {
                        if close > 0 {
                            spans.push(StyledSpan::new(0, close, rule.tag));
                        }
                        pos = close;
                    }
                    None => {
                        if !text.is_empty() {
                            spans.push(StyledSpan::new(0, text.len(), rule.tag));
                        }
                        return HighlightedLine {
                            spans,
                            end_state: start_state,
                        };
                    }
                },
                None => {
                    // A state this profile does not know (e.g. the profile
                    // changed under an open document): reset rather than
                    // carry garbage forward
                    warn!(
                        "Unhandled continuation state {:?} in profile '{}', resetting",
                        start_state, self.name
                    );
                }
            }
        }

        let mut plain_start = pos;
        while pos < text.len() {
            let candidate = match self.best_candidate(text, pos) {
                Some(c) => c,
                None => break, // remainder of the line is plain
            };

            if candidate.start > plain_start {
                spans.push(StyledSpan::new(
                    plain_start,
                    candidate.start - plain_start,
                    StyleTag::Plain,
                ));
            }

            match candidate.kind {
                CandidateKind::Single(tag) => {
                    spans.push(StyledSpan::new(
                        candidate.start,
                        candidate.end - candidate.start,
                        tag,
                    ));
                    pos = candidate.end;
                }
                CandidateKind::Multi(rule) => {
                    // Look for the close after the opening delimiter
                    match rule.find_end(text, candidate.end) {
                        Some(close) => {
                            spans.push(StyledSpan::new(
                                candidate.start,
                                close - candidate.start,
                                rule.tag,
                            ));
                            pos = close;
                        }
                        None => {
                            // Construct stays open past this line
                            spans.push(StyledSpan::new(
                                candidate.start,
                                text.len() - candidate.start,
                                rule.tag,
                            ));
                            return HighlightedLine {
                                spans,
                                end_state: rule.state,
                            };
                        }
                    }
                }
            }
            plain_start = pos;
        }

        if text.len() > plain_start {
            spans.push(StyledSpan::new(
                plain_start,
                text.len() - plain_start,
                StyleTag::Plain,
            ));
        }

        HighlightedLine {
            spans,
            end_state: LineState::Default,
        }
    }

    /// Find the winning match at or after `pos`.
    ///
    /// Selection: earliest start, then longest match, then rule order with
    /// multi-line rules ranked ahead of single-line rules.
    fn best_candidate(&self, text: &str, pos: usize) -> Option<Candidate<'_>> {
        let mut best: Option<Candidate<'_>> = None;

        for rule in &self.multiline_rules {
            if let Some((start, end)) = rule.find_start(text, pos) {
                if end > start {
                    consider(
                        &mut best,
                        Candidate {
                            start,
                            end,
                            kind: CandidateKind::Multi(rule),
                        },
                    );
                }
            }
        }
        for rule in &self.rules {
            if let Some((start, end)) = rule.find_at(text, pos) {
                if end > start {
                    consider(
                        &mut best,
                        Candidate {
                            start,
                            end,
                            kind: CandidateKind::Single(rule.tag),
                        },
                    );
                }
            }
        }

        best
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Candidate Selection
// ─────────────────────────────────────────────────────────────────────────────

enum CandidateKind<'a> {
    Single(StyleTag),
    Multi(&'a MultilineRule),
}

struct Candidate<'a> {
    start: usize,
    end: usize,
    kind: CandidateKind<'a>,
}

/// Keep the better of the current best and a new candidate. Iteration order
/// supplies the rule-order tie-break: a later candidate replaces an earlier
/// one only with a strictly earlier start or a strictly longer match.
fn consider<'a>(best: &mut Option<Candidate<'a>>, candidate: Candidate<'a>) {
    let replace = match best {
        None => true,
        Some(current) => {
            candidate.start < current.start
                || (candidate.start == current.start
                    && candidate.end - candidate.start > current.end - current.start)
        }
    };
    if replace {
        *best = Some(candidate);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> LanguageProfile {
        let mut profile = LanguageProfile::new("Test");
        profile.add_extension("test");
        profile.add_rule(HighlightRule::new("line_comment", r"//[^\n]*", StyleTag::Comment));
        profile.add_rule(HighlightRule::new(
            "string",
            r#""[^"\\]*(?:\\.[^"\\]*)*""#,
            StyleTag::String,
        ));
        profile.add_rule(HighlightRule::new("number", r"\b\d+\b", StyleTag::Number));
        profile.add_multiline(MultilineRule::new(
            "block_comment",
            r"/\*",
            r"\*/",
            StyleTag::Comment,
            LineState::BlockComment,
        ));
        profile
    }

    fn tags_of(line: &HighlightedLine) -> Vec<StyleTag> {
        line.spans.iter().map(|s| s.tag).collect()
    }

    /// Spans must be contiguous and cover the whole line.
    fn assert_covers(line: &HighlightedLine, len: usize) {
        let mut pos = 0;
        for span in &line.spans {
            assert_eq!(span.start, pos, "gap or overlap at {}", pos);
            pos = span.end();
        }
        assert_eq!(pos, len, "spans do not reach end of line");
    }

    #[test]
    fn test_number_and_plain_spans() {
        let profile = test_profile();
        let result = profile.highlight_line("let x = 42;", LineState::Default);

        assert!(result.end_state.is_default());
        assert_covers(&result, 11);
        assert!(result
            .spans
            .iter()
            .any(|s| s.start == 8 && s.len == 2 && s.tag == StyleTag::Number));
    }

    #[test]
    fn test_determinism() {
        let profile = test_profile();
        let a = profile.highlight_line("x /* c */ 12 \"s\"", LineState::Default);
        let b = profile.highlight_line("x /* c */ 12 \"s\"", LineState::Default);
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_comment_to_end() {
        let profile = test_profile();
        let result = profile.highlight_line("code // trailing 99", LineState::Default);

        assert!(result.end_state.is_default());
        // The 99 is inside the comment, not a number span
        assert_eq!(tags_of(&result), vec![StyleTag::Plain, StyleTag::Comment]);
    }

    #[test]
    fn test_multiline_opens() {
        let profile = test_profile();
        let result = profile.highlight_line("code /* starts here", LineState::Default);

        assert_eq!(result.end_state, LineState::BlockComment);
        assert_covers(&result, 19);
        assert_eq!(result.spans.last().map(|s| s.tag), Some(StyleTag::Comment));
    }

    #[test]
    fn test_multiline_continues() {
        let profile = test_profile();
        let result = profile.highlight_line("still inside 42", LineState::BlockComment);

        assert_eq!(result.end_state, LineState::BlockComment);
        // The whole line is one comment span; the 42 is not a number
        assert_eq!(tags_of(&result), vec![StyleTag::Comment]);
    }

    #[test]
    fn test_multiline_closes_and_resumes() {
        let profile = test_profile();
        let result = profile.highlight_line("done */ 7", LineState::BlockComment);

        assert!(result.end_state.is_default());
        assert_covers(&result, 9);
        assert!(result
            .spans
            .iter()
            .any(|s| s.tag == StyleTag::Number && s.start == 8));
    }

    #[test]
    fn test_complete_construct_on_one_line() {
        let profile = test_profile();
        let result = profile.highlight_line("a /* b */ c", LineState::Default);

        assert!(result.end_state.is_default());
        assert_eq!(
            tags_of(&result),
            vec![StyleTag::Plain, StyleTag::Comment, StyleTag::Plain]
        );
    }

    #[test]
    fn test_longest_match_wins_at_same_position() {
        let mut profile = LanguageProfile::new("Tie");
        // Both rules match at position 0; the longer one must win even
        // though it is added second
        profile.add_rule(HighlightRule::new("short", r"ab", StyleTag::Number));
        profile.add_rule(HighlightRule::new("long", r"abc", StyleTag::Keyword));

        let result = profile.highlight_line("abc", LineState::Default);
        assert_eq!(result.spans[0].tag, StyleTag::Keyword);
        assert_eq!(result.spans[0].len, 3);
    }

    #[test]
    fn test_equal_length_tie_resolves_by_rule_order() {
        let mut profile = LanguageProfile::new("Tie");
        profile.add_rule(HighlightRule::new("first", r"abc", StyleTag::Keyword));
        profile.add_rule(HighlightRule::new("second", r"abc", StyleTag::Number));

        let result = profile.highlight_line("abc", LineState::Default);
        assert_eq!(result.spans[0].tag, StyleTag::Keyword);
    }

    #[test]
    fn test_zero_length_matches_rejected() {
        let mut profile = LanguageProfile::new("ZeroWidth");
        // A pattern that can match the empty string must not stall the scan
        profile.add_rule(HighlightRule::new("empty", r"x*", StyleTag::Number));

        let result = profile.highlight_line("abc xx", LineState::Default);
        assert_covers(&result, 6);
        assert!(result
            .spans
            .iter()
            .any(|s| s.tag == StyleTag::Number && s.len == 2));
    }

    #[test]
    fn test_unknown_continuation_state_resets() {
        // The test profile has no rule for TemplateLiteral
        let profile = test_profile();
        let result = profile.highlight_line("plain 5", LineState::TemplateLiteral);

        assert!(result.end_state.is_default());
        assert!(result.spans.iter().any(|s| s.tag == StyleTag::Number));
    }

    #[test]
    fn test_plain_text_profile_single_span() {
        let profile = LanguageProfile::plain_text();
        let result = profile.highlight_line("anything // at all /* here", LineState::Default);

        assert_eq!(
            result.spans,
            vec![StyledSpan::new(0, 26, StyleTag::Plain)]
        );
        assert!(result.end_state.is_default());
    }

    #[test]
    fn test_empty_line() {
        let profile = test_profile();
        let result = profile.highlight_line("", LineState::Default);
        assert!(result.spans.is_empty());
        assert!(result.end_state.is_default());

        // An empty line inside an open construct keeps the state
        let result = profile.highlight_line("", LineState::BlockComment);
        assert_eq!(result.end_state, LineState::BlockComment);
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let profile = test_profile();
        let result = profile.highlight_line("på 🎉 12 // ænd", LineState::Default);
        assert_covers(&result, "på 🎉 12 // ænd".len());
    }
}
