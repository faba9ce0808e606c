//! XML language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::{HighlightRule, LineState, MultilineRule};
use crate::syntax::style::StyleTag;

/// Create the XML profile.
///
/// CDATA sections are tracked as their own multi-line state so their content
/// is styled as literal text rather than markup.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("XML");
    lang.add_extension("xml");
    lang.add_extension("svg");
    lang.add_extension("xsd");
    lang.add_extension("xsl");

    // Multi-line constructs: comments and CDATA
    lang.add_multiline(MultilineRule::new(
        "comment",
        r"<!--",
        r"-->",
        StyleTag::Comment,
        LineState::BlockComment,
    ));
    lang.add_multiline(MultilineRule::new(
        "cdata",
        r"<!\[CDATA\[",
        r"\]\]>",
        StyleTag::String,
        LineState::Cdata,
    ));

    // Processing instructions (<?xml version="1.0"?>)
    lang.add_rule(HighlightRule::new(
        "processing_instruction",
        r"<\?[^?>]*\?>",
        StyleTag::Keyword,
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

    // Tag open/close and the closing bracket; XML names allow colons
    // (namespaces) and dots
    lang.add_rule(HighlightRule::new(
        "tag",
        r"</?[A-Za-z_][\w:.-]*",
        StyleTag::Keyword,
    ));
    lang.add_rule(HighlightRule::new("tag_end", r"/?>", StyleTag::Keyword));

    // Attribute names
    lang.add_rule(HighlightRule::new(
        "attr_name",
        r"\b[\w:.-]+=",
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
