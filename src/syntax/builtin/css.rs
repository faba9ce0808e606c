//! CSS language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::{HighlightRule, LineState, MultilineRule};
use crate::syntax::style::StyleTag;

/// Create the CSS profile.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("CSS");
    lang.add_extension("css");

    // Block comments span lines
    lang.add_multiline(MultilineRule::new(
        "comment",
        r"/\*",
        r"\*/",
        StyleTag::Comment,
        LineState::BlockComment,
    ));

    // Strings
    lang.add_rule(HighlightRule::new(
        "string",
        r#""[^"]*"|'[^']*'"#,
        StyleTag::String,
    ));

    // At-rules (@media, @import, ...)
    lang.add_rule(HighlightRule::new(
        "at_rule",
        r"@[\w-]+",
        StyleTag::Keyword,
    ));

    // Class and id selectors
    lang.add_rule(HighlightRule::new(
        "selector",
        r"[.#][A-Za-z_][\w-]*",
        StyleTag::Keyword,
    ));

    // Property names (identifier directly followed by a colon)
    lang.add_rule(HighlightRule::new(
        "property",
        r"\b[a-zA-Z-]+\s*:",
        StyleTag::Function,
    ));

    // Hex colors before plain numbers so #fff is not split
    lang.add_rule(HighlightRule::new(
        "hex_color",
        r"#[0-9a-fA-F]{3,8}\b",
        StyleTag::Number,
    ));

    // Numeric values with optional unit
    lang.add_rule(HighlightRule::new(
        "number",
        r"\b\d+(?:\.\d+)?(?:px|em|rem|pt|vh|vw|ms|s|deg|fr|%)?",
        StyleTag::Number,
    ));

    lang
}
