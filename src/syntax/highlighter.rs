//! Per-document highlight cache and incremental re-lexing
//!
//! [`DocumentHighlighter`] owns the per-line end states and cached spans for
//! one open document. After an edit it re-lexes the changed line and
//! propagates downward only while a line's end state differs from the one
//! previously recorded (fixed point), so a single-line edit is typically
//! O(1) and never worse than O(document length).

use log::debug;
use std::sync::Arc;

use super::profile::LanguageProfile;
use super::rules::LineState;
use super::style::StyledSpan;

// ─────────────────────────────────────────────────────────────────────────────
// Relex Range
// ─────────────────────────────────────────────────────────────────────────────

/// The half-open range of lines whose spans were recomputed by a re-lex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelexRange {
    /// First re-lexed line
    pub start: usize,
    /// One past the last re-lexed line
    pub end: usize,
}

impl RelexRange {
    /// Number of lines re-lexed.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if nothing was re-lexed.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Highlight state for a single open document.
pub struct DocumentHighlighter {
    /// Active language profile
    profile: Arc<LanguageProfile>,
    /// End state recorded for each line
    end_states: Vec<LineState>,
    /// Cached spans per line (always present after a re-lex pass)
    spans: Vec<Vec<StyledSpan>>,
}

impl DocumentHighlighter {
    /// Create a highlighter for the given profile with no lines yet.
    pub fn new(profile: Arc<LanguageProfile>) -> Self {
        Self {
            profile,
            end_states: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// The active profile.
    pub fn profile(&self) -> &Arc<LanguageProfile> {
        &self.profile
    }

    /// Swap the language profile and drop all cached state.
    pub fn set_profile(&mut self, profile: Arc<LanguageProfile>) {
        debug!("Switching highlight profile to '{}'", profile.name);
        self.profile = profile;
        self.end_states.clear();
        self.spans.clear();
    }

    /// Number of lines currently tracked.
    pub fn line_count(&self) -> usize {
        self.end_states.len()
    }

    /// Cached spans for a line, if it has been lexed.
    pub fn spans_for_line(&self, line: usize) -> Option<&[StyledSpan]> {
        self.spans.get(line).map(|s| s.as_slice())
    }

    /// Recorded end state for a line, if it has been lexed.
    pub fn end_state(&self, line: usize) -> Option<LineState> {
        self.end_states.get(line).copied()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structural Edits
    // ─────────────────────────────────────────────────────────────────────────

    /// Track a newly inserted line. The caller follows up with
    /// [`relex_from`](Self::relex_from) at the insertion point.
    pub fn insert_line(&mut self, line: usize) {
        let line = line.min(self.end_states.len());
        self.end_states.insert(line, LineState::Default);
        self.spans.insert(line, Vec::new());
    }

    /// Track a removed line. The caller follows up with
    /// [`relex_from`](Self::relex_from) at the removal point.
    pub fn remove_line(&mut self, line: usize) {
        if line < self.end_states.len() {
            self.end_states.remove(line);
            self.spans.remove(line);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Re-lexing
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-lex the whole document from the top.
    ///
    /// Suitable for initial load; the types involved are `Send`, so a host
    /// may run this on a worker thread and move the result back.
    pub fn full_relex(&mut self, lines: &[String]) -> RelexRange {
        self.end_states.clear();
        self.spans.clear();
        self.end_states.resize(lines.len(), LineState::Default);
        self.spans.resize(lines.len(), Vec::new());

        let mut state = LineState::Default;
        for (i, line) in lines.iter().enumerate() {
            let result = self.profile.highlight_line(line, state);
            state = result.end_state;
            self.end_states[i] = result.end_state;
            self.spans[i] = result.spans;
        }

        RelexRange {
            start: 0,
            end: lines.len(),
        }
    }

    /// Re-lex from `from` until a line's end state matches the previously
    /// recorded one (fixed point) or EOF.
    ///
    /// `lines` must reflect the document after the edit; line insertions and
    /// removals must have been reported through
    /// [`insert_line`](Self::insert_line)/[`remove_line`](Self::remove_line)
    /// first so recorded states stay aligned with line indices.
    pub fn relex_from(&mut self, lines: &[String], from: usize) -> RelexRange {
        // Structural edits keep these aligned; realign anyway so a missed
        // insert/remove report degrades to extra re-lexing, not a panic
        self.end_states.resize(lines.len(), LineState::Default);
        self.spans.resize(lines.len(), Vec::new());

        if from >= lines.len() {
            return RelexRange {
                start: from.min(lines.len()),
                end: from.min(lines.len()),
            };
        }

        let mut state = if from == 0 {
            LineState::Default
        } else {
            self.end_states[from - 1]
        };

        let mut i = from;
        while i < lines.len() {
            let previous_end = self.end_states[i];
            let result = self.profile.highlight_line(&lines[i], state);
            state = result.end_state;
            self.end_states[i] = result.end_state;
            self.spans[i] = result.spans;
            i += 1;

            // Propagation stops once a line ends in the same state it was
            // recorded with before the edit
            if result.end_state == previous_end {
                break;
            }
        }

        debug!("Re-lexed lines {}..{}", from, i);
        RelexRange { start: from, end: i }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::profile::LanguageProfile;
    use crate::syntax::rules::{HighlightRule, MultilineRule};
    use crate::syntax::style::StyleTag;

    fn c_like_profile() -> Arc<LanguageProfile> {
        let mut profile = LanguageProfile::new("CLike");
        profile.add_rule(HighlightRule::new("number", r"\b\d+\b", StyleTag::Number));
        profile.add_multiline(MultilineRule::new(
            "block_comment",
            r"/\*",
            r"\*/",
            StyleTag::Comment,
            LineState::BlockComment,
        ));
        Arc::new(profile)
    }

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_relex_chains_states() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let doc = lines(&["start /* open", "inside", "close */ 42"]);
        hl.full_relex(&doc);

        assert_eq!(hl.end_state(0), Some(LineState::BlockComment));
        assert_eq!(hl.end_state(1), Some(LineState::BlockComment));
        assert_eq!(hl.end_state(2), Some(LineState::Default));
        assert!(hl
            .spans_for_line(2)
            .unwrap()
            .iter()
            .any(|s| s.tag == StyleTag::Number));
    }

    #[test]
    fn test_full_relex_reaches_fixed_point() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let doc = lines(&["a /* b", "c", "d */ e", "1 2 3"]);
        hl.full_relex(&doc);
        let first: Vec<_> = (0..doc.len()).map(|i| hl.end_state(i)).collect();

        // A second top-to-bottom pass must not change any end state
        hl.full_relex(&doc);
        let second: Vec<_> = (0..doc.len()).map(|i| hl.end_state(i)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_line_edit_stops_at_fixed_point() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let mut doc = lines(&["1", "2", "3", "4"]);
        hl.full_relex(&doc);

        // Editing line 1 without changing its end state touches one line
        doc[1] = "22".to_string();
        let range = hl.relex_from(&doc, 1);
        assert_eq!(range, RelexRange { start: 1, end: 2 });
    }

    #[test]
    fn test_opening_comment_propagates_down() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let mut doc = lines(&["1", "2", "3", "4"]);
        hl.full_relex(&doc);

        // Opening a block comment on line 1 changes every state below
        doc[1] = "/* open".to_string();
        let range = hl.relex_from(&doc, 1);
        assert_eq!(range, RelexRange { start: 1, end: 4 });
        assert_eq!(hl.end_state(3), Some(LineState::BlockComment));
    }

    #[test]
    fn test_closing_comment_restores_states_below() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let mut doc = lines(&["/* open", "2", "3"]);
        hl.full_relex(&doc);
        assert_eq!(hl.end_state(2), Some(LineState::BlockComment));

        doc[0] = "/* open */".to_string();
        hl.relex_from(&doc, 0);
        assert_eq!(hl.end_state(0), Some(LineState::Default));
        assert_eq!(hl.end_state(2), Some(LineState::Default));
        assert!(hl
            .spans_for_line(1)
            .unwrap()
            .iter()
            .any(|s| s.tag == StyleTag::Number));
    }

    #[test]
    fn test_propagation_stops_midway() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        // Line 2 closes any comment, so states below line 2 are immune to
        // a comment opened on line 0
        let mut doc = lines(&["x", "y */ z", "1"]);
        hl.full_relex(&doc);

        doc[0] = "/* open".to_string();
        let range = hl.relex_from(&doc, 0);
        // Line 1 now ends Default (it closed the comment), same as before,
        // so propagation stops without touching line 2
        assert_eq!(range.end, 2);
        assert_eq!(hl.end_state(2), Some(LineState::Default));
    }

    #[test]
    fn test_insert_and_remove_keep_alignment() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let mut doc = lines(&["/* open", "close */", "7"]);
        hl.full_relex(&doc);

        doc.insert(1, "inserted".to_string());
        hl.insert_line(1);
        hl.relex_from(&doc, 1);
        assert_eq!(hl.end_state(1), Some(LineState::BlockComment));
        assert_eq!(hl.end_state(3), Some(LineState::Default));

        doc.remove(1);
        hl.remove_line(1);
        hl.relex_from(&doc, 1);
        assert_eq!(hl.line_count(), 3);
        assert_eq!(hl.end_state(2), Some(LineState::Default));
    }

    #[test]
    fn test_determinism() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let doc = lines(&["a /* b", "c */ 5"]);
        hl.full_relex(&doc);
        let spans_a: Vec<_> = hl.spans_for_line(1).unwrap().to_vec();
        hl.full_relex(&doc);
        let spans_b: Vec<_> = hl.spans_for_line(1).unwrap().to_vec();
        assert_eq!(spans_a, spans_b);
    }

    #[test]
    fn test_relex_from_past_eof() {
        let mut hl = DocumentHighlighter::new(c_like_profile());
        let doc = lines(&["only line"]);
        hl.full_relex(&doc);
        let range = hl.relex_from(&doc, 5);
        assert!(range.is_empty());
    }
}
