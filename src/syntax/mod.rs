//! Syntax highlighting engine
//!
//! A rule-based, line-at-a-time highlighting engine. Each line is lexed
//! against a [`LanguageProfile`] together with the [`LineState`] left by the
//! previous line, producing styled spans for the rendering surface and the
//! state for the next line. Multi-line constructs (block comments,
//! docstrings, triple-quoted strings, template literals, CDATA) are carried
//! through that state; everything else is per-line regex matching.
//!
//! # Example
//! ```ignore
//! use graphite::syntax::{LineState, ProfileRegistry};
//!
//! let registry = ProfileRegistry::new();
//! let profile = registry.profile_for_extension("py");
//! let result = profile.highlight_line("def main():", LineState::Default);
//! ```

pub mod builtin;
mod highlighter;
mod profile;
mod registry;
mod rules;
mod style;

pub use highlighter::{DocumentHighlighter, RelexRange};
pub use profile::{HighlightedLine, LanguageProfile};
pub use registry::ProfileRegistry;
pub use rules::{HighlightRule, LineState, MultilineRule};
pub use style::{StyleTag, StyledSpan};
