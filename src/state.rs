//! Document state management
//!
//! This module defines the `Document` struct for the single active
//! document: its text as a line buffer, a monotonic revision counter that
//! keys the preview cache, the detected file encoding, and the per-line
//! highlight state kept current through incremental re-lexing.
//!
//! The host text widget owns cursor and selection; this model owns content
//! and everything derived from it.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::{self, Encoding, LoadedFile};
use crate::syntax::{DocumentHighlighter, ProfileRegistry, RelexRange, StyledSpan};

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The single active document: content, revision, encoding, and highlight
/// state.
pub struct Document {
    /// File path (None for unsaved/new documents)
    path: Option<PathBuf>,
    /// Document content as lines, without trailing newlines
    lines: Vec<String>,
    /// Monotonic revision counter; bumped on every content change and used
    /// to key the preview render cache
    revision: u64,
    /// Encoding the file was loaded with; reused on save
    encoding: Encoding,
    /// True if the last load replaced undecodable bytes
    lossy_load: bool,
    /// Whether content changed since the last load/save
    modified: bool,
    /// Per-line highlight state for this document
    highlighter: DocumentHighlighter,
}

impl Document {
    /// Create a new empty document with the plain text profile.
    pub fn new(registry: &ProfileRegistry) -> Self {
        let mut highlighter = DocumentHighlighter::new(registry.plain_profile());
        let lines = vec![String::new()];
        highlighter.full_relex(&lines);
        Self {
            path: None,
            lines,
            revision: 0,
            encoding: Encoding::Utf8,
            lossy_load: false,
            modified: false,
            highlighter,
        }
    }

    /// Load a document from disk.
    ///
    /// The language profile is picked from the file extension; the whole
    /// document is re-lexed from the top (hosts may call this on a worker
    /// thread, `Document` is `Send`).
    pub fn from_file(registry: &ProfileRegistry, path: &Path) -> Result<Self> {
        let LoadedFile {
            text,
            encoding,
            lossy,
        } = files::load(path)?;

        let mut document = Self::new(registry);
        document.path = Some(path.to_path_buf());
        document.encoding = encoding;
        document.lossy_load = lossy;
        document.highlighter = DocumentHighlighter::new(registry.profile_for_path(path));
        document.replace_all_text(&text);
        document.modified = false;
        document.revision = 0;

        info!(
            "Opened {} ({} lines, {})",
            path.display(),
            document.lines.len(),
            encoding.display_name()
        );
        Ok(document)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// File path, if the document has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Current revision; bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Encoding used on load, reused on save.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// True if the last load substituted replacement characters.
    pub fn lossy_load(&self) -> bool {
        self.lossy_load
    }

    /// True if content changed since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Number of lines (at least one; an empty document has one empty line).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// One line of text, without its newline.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    /// The whole document as a single string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Styled spans for a line, for the rendering surface.
    pub fn spans_for_line(&self, index: usize) -> &[StyledSpan] {
        self.highlighter.spans_for_line(index).unwrap_or(&[])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the entire content (paste-all, external reload).
    pub fn set_text(&mut self, text: &str) {
        self.replace_all_text(text);
    }

    /// Replace one line's text and re-lex from it to the fixed point.
    pub fn replace_line(&mut self, index: usize, text: &str) -> RelexRange {
        let index = index.min(self.lines.len().saturating_sub(1));
        self.lines[index] = text.to_string();
        self.touch();
        let range = self.highlighter.relex_from(&self.lines, index);
        debug!("Edit on line {} re-lexed {} lines", index, range.len());
        range
    }

    /// Insert a new line at `index`, shifting lines below down.
    pub fn insert_line(&mut self, index: usize, text: &str) -> RelexRange {
        let index = index.min(self.lines.len());
        self.lines.insert(index, text.to_string());
        self.highlighter.insert_line(index);
        self.touch();
        self.highlighter.relex_from(&self.lines, index)
    }

    /// Remove the line at `index`. The last remaining line empties instead
    /// of disappearing.
    pub fn remove_line(&mut self, index: usize) -> RelexRange {
        if self.lines.len() == 1 {
            return self.replace_line(0, "");
        }
        if index >= self.lines.len() {
            return RelexRange {
                start: self.lines.len(),
                end: self.lines.len(),
            };
        }
        self.lines.remove(index);
        self.highlighter.remove_line(index);
        self.touch();
        self.highlighter.relex_from(&self.lines, index)
    }

    fn replace_all_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.lines = normalized.split('\n').map(|s| s.to_string()).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.touch();
        self.highlighter.full_relex(&self.lines);
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.modified = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile and Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-pick the language profile after a path change (Save As to a new
    /// extension) and re-lex everything.
    pub fn refresh_profile(&mut self, registry: &ProfileRegistry) {
        let profile = match self.path.as_deref() {
            Some(path) => registry.profile_for_path(path),
            None => registry.plain_profile(),
        };
        self.highlighter.set_profile(profile);
        self.highlighter.full_relex(&self.lines);
    }

    /// Save to the document's path in its original encoding.
    pub fn save(&mut self) -> Result<()> {
        let path = match self.path.clone() {
            Some(path) => path,
            None => {
                return Err(crate::error::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "document has no file path",
                )))
            }
        };
        files::save(&path, &self.text(), self.encoding)?;
        self.modified = false;
        Ok(())
    }

    /// Save to a new path, adopting it as the document's path.
    pub fn save_as(&mut self, registry: &ProfileRegistry, path: &Path) -> Result<()> {
        files::save(path, &self.text(), self.encoding)?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        self.refresh_profile(registry);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
