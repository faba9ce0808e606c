//! JSON language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::HighlightRule;
use crate::syntax::style::StyleTag;

/// Create the JSON profile.
///
/// Object keys are distinguished from string values by the trailing colon:
/// the key rule's match is longer, so it wins the longest-match contest at
/// the same position.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("JSON");
    lang.add_extension("json");

    // Object keys: a string directly followed by a colon
    lang.add_rule(HighlightRule::new(
        "key",
        r#""[^"\\]*(?:\\.[^"\\]*)*"\s*:"#,
        StyleTag::Keyword,
    ));

    // String values
    lang.add_rule(HighlightRule::new(
        "string",
        r#""[^"\\]*(?:\\.[^"\\]*)*""#,
        StyleTag::String,
    ));

    // Literals
    lang.add_rule(HighlightRule::new(
        "literal",
        r"\b(true|false|null)\b",
        StyleTag::Keyword,
    ));

    // Numbers
    lang.add_rule(HighlightRule::new(
        "number",
        r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b",
        StyleTag::Number,
    ));

    lang
}
