//! HTML language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::{HighlightRule, LineState, MultilineRule};
use crate::syntax::style::StyleTag;

/// Create the HTML profile.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("HTML");
    lang.add_extension("html");
    lang.add_extension("htm");

    // Comments span lines
    lang.add_multiline(MultilineRule::new(
        "comment",
        r"<!--",
        r"-->",
        StyleTag::Comment,
        LineState::BlockComment,
    ));

    // DOCTYPE declaration
    lang.add_rule(HighlightRule::new(
        "doctype",
        r"(?i)<!doctype[^>]*>",
        StyleTag::Comment,
    ));

    // Attribute values (quoted)
    lang.add_rule(HighlightRule::new(
        "attr_value",
        r#""[^"]*"|'[^']*'"#,
        StyleTag::String,
    ));

    // Tag open/close and the closing bracket
    lang.add_rule(HighlightRule::new(
        "tag",
        r"</?[A-Za-z][\w-]*",
        StyleTag::Keyword,
    ));
    lang.add_rule(HighlightRule::new("tag_end", r"/?>", StyleTag::Keyword));

    // Attribute names (identifier directly followed by =)
    lang.add_rule(HighlightRule::new(
        "attr_name",
        r"\b[\w-]+=",
        StyleTag::Function,
    ));

    // Character entities
    lang.add_rule(HighlightRule::new(
        "entity",
        r"&#?\w+;",
        StyleTag::Number,
    ));

    lang
}
