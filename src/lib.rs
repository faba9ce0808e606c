//! Graphite - Syntax highlighting and live preview core
//!
//! The engine half of a lightweight desktop text editor: a rule-based,
//! incrementally re-lexing syntax highlighting engine and a preview
//! renderer for HTML, Markdown, and XML documents. The GUI shell (windows,
//! menus, dialogs, theming) lives in the host application; this crate
//! exposes plain data the host renders: styled spans, HTML payloads, and
//! XML tree rows.
//!
//! # Modules
//!
//! - [`syntax`]: line-at-a-time highlighting with multi-line state carried
//!   between lines, built-in language profiles, and a profile registry
//!   keyed by file extension.
//! - [`preview`]: whole-document rendering per format kind, cached by
//!   document revision and debounced behind a quiescence interval.
//! - [`state`]: the single active document, with content, revision
//!   counter, and highlight state kept current through incremental
//!   re-lexing.
//! - [`files`]: the byte boundary, with BOM-based encoding detection,
//!   lossy UTF-8 fallback, and atomic saves.
//! - [`config`]: user settings with JSON persistence.

pub mod config;
pub mod error;
pub mod files;
pub mod preview;
pub mod state;
pub mod string_utils;
pub mod syntax;

pub use error::{Error, Result};
pub use state::Document;
