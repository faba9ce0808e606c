//! JavaScript language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::{HighlightRule, LineState, MultilineRule};
use crate::syntax::style::StyleTag;

/// Create the JavaScript profile.
///
/// Template literals carry their state across lines; the backtick delimiter
/// can be escaped inside them.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("JavaScript");
    lang.add_extension("js");
    lang.add_extension("mjs");
    lang.add_extension("jsx");

    // Multi-line constructs
    lang.add_multiline(MultilineRule::new(
        "block_comment",
        r"/\*",
        r"\*/",
        StyleTag::Comment,
        LineState::BlockComment,
    ));
    lang.add_multiline(
        MultilineRule::new(
            "template_literal",
            "`",
            "`",
            StyleTag::String,
            LineState::TemplateLiteral,
        )
        .map(|r| r.with_escape('\\')),
    );

    // Comments
    lang.add_rule(HighlightRule::new("line_comment", r"//.*", StyleTag::Comment));

    // Strings (single-line, escape-aware)
    lang.add_rule(HighlightRule::new(
        "double_string",
        r#""[^"\\]*(?:\\.[^"\\]*)*""#,
        StyleTag::String,
    ));
    lang.add_rule(HighlightRule::new(
        "single_string",
        r"'[^'\\]*(?:\\.[^'\\]*)*'",
        StyleTag::String,
    ));

    // Keywords and constants
    lang.add_rule(HighlightRule::new(
        "keyword",
        r"\b(async|await|break|case|catch|class|const|continue|debugger|default|delete|do|else|export|extends|false|finally|for|from|function|get|if|import|in|instanceof|let|new|null|of|return|set|static|super|switch|this|throw|true|try|typeof|undefined|var|void|while|with|yield)\b",
        StyleTag::Keyword,
    ));

    // Common globals
    lang.add_rule(HighlightRule::new(
        "global",
        r"\b(console|document|window|Math|JSON|Object|Array|String|Number|Boolean|Promise|Date|RegExp|Map|Set|Symbol)\b",
        StyleTag::Function,
    ));

    // Numbers
    lang.add_rule(HighlightRule::new(
        "radix_number",
        r"\b0[xXoObB][0-9a-fA-F_]+n?\b",
        StyleTag::Number,
    ));
    lang.add_rule(HighlightRule::new(
        "number",
        r"\b\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?n?\b",
        StyleTag::Number,
    ));

    // Operators (including arrow)
    lang.add_rule(HighlightRule::new(
        "operator",
        r"=>|[+\-*/%&|^!<>=~?]+",
        StyleTag::Operator,
    ));

    lang
}
