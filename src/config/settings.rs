//! User settings for the highlighting and preview core
//!
//! This module defines the `Settings` struct that holds the user-tunable
//! options of the engine, with serde support for JSON persistence. Values
//! loaded from disk are sanitized into their valid ranges rather than
//! rejected.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::files::Encoding;

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences for highlighting and preview behavior.
///
/// This struct is serialized to JSON and persisted to the user's config
/// directory. All fields have sensible defaults via the `Default` trait and
/// `#[serde(default)]`, so a partial or missing config file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Regenerate the preview automatically after edits
    pub live_preview: bool,
    /// Quiescence interval between the last edit and a regeneration
    pub preview_debounce_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Highlighting
    // ─────────────────────────────────────────────────────────────────────────
    /// Enable syntax highlighting
    pub syntax_highlighting: bool,
    /// Tab width in columns, for the rendering surface
    pub tab_size: u8,

    // ─────────────────────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────────────────────
    /// Encoding for new documents (existing files keep their detected one)
    pub default_encoding: Encoding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_preview: true,
            preview_debounce_ms: 400,
            syntax_highlighting: true,
            tab_size: 4,
            default_encoding: Encoding::Utf8,
        }
    }
}

impl Settings {
    /// Minimum debounce interval; anything shorter regenerates per keystroke
    pub const MIN_DEBOUNCE_MS: u64 = 50;
    /// Maximum debounce interval
    pub const MAX_DEBOUNCE_MS: u64 = 5_000;
    /// Minimum tab width
    pub const MIN_TAB_SIZE: u8 = 1;
    /// Maximum tab width
    pub const MAX_TAB_SIZE: u8 = 16;

    /// Parse settings from JSON and clamp out-of-range values.
    pub fn from_json_sanitized(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clamp numeric fields into their valid ranges.
    pub fn sanitize(&mut self) {
        self.preview_debounce_ms = self
            .preview_debounce_ms
            .clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS);
        self.tab_size = self.tab_size.clamp(Self::MIN_TAB_SIZE, Self::MAX_TAB_SIZE);
    }

    /// The debounce interval as a `Duration`.
    pub fn debounce_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.preview_debounce_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
