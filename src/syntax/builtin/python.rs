//! Python language profile

use crate::syntax::profile::LanguageProfile;
use crate::syntax::rules::{HighlightRule, LineState, MultilineRule};
use crate::syntax::style::StyleTag;

/// Create the Python profile.
///
/// Docstrings are tracked separately from ordinary triple-quoted strings:
/// a triple quote preceded only by whitespace opens a docstring, any other
/// triple quote opens a plain multi-line string.
pub fn profile() -> LanguageProfile {
    let mut lang = LanguageProfile::new("Python");
    lang.add_extension("py");
    lang.add_extension("pyw");
    lang.add_extension("pyi");

    // Multi-line constructs. Docstring first so it wins the rule-order
    // tie-break against the general triple-quote rule.
    lang.add_multiline(
        MultilineRule::new(
            "docstring",
            r#"("""|''')"#,
            r#"("""|''')"#,
            StyleTag::Comment,
            LineState::Docstring,
        )
        .map(|r| r.at_line_start()),
    );
    lang.add_multiline(MultilineRule::new(
        "triple_quote",
        r#"[rRbBuUfF]*("""|''')"#,
        r#"("""|''')"#,
        StyleTag::String,
        LineState::TripleQuote,
    ));

    // Comments
    lang.add_rule(HighlightRule::new("comment", r"#.*", StyleTag::Comment));

    // Strings (single-line, optional prefix, escape-aware)
    lang.add_rule(HighlightRule::new(
        "double_string",
        r#"[rRbBuUfF]*"[^"\\]*(?:\\.[^"\\]*)*""#,
        StyleTag::String,
    ));
    lang.add_rule(HighlightRule::new(
        "single_string",
        r"[rRbBuUfF]*'[^'\\]*(?:\\.[^'\\]*)*'",
        StyleTag::String,
    ));

    // Decorators
    lang.add_rule(HighlightRule::new(
        "decorator",
        r"@[\w.]+",
        StyleTag::Function,
    ));

    // Keywords, constants, and the self/cls names
    lang.add_rule(HighlightRule::new(
        "keyword",
        r"\b(False|None|True|and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|match|nonlocal|not|or|pass|raise|return|self|cls|try|while|with|yield)\b",
        StyleTag::Keyword,
    ));

    // Built-in functions
    lang.add_rule(HighlightRule::new(
        "builtin",
        r"\b(abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b",
        StyleTag::Function,
    ));

    // Numbers: hex/octal/binary before float before integer
    lang.add_rule(HighlightRule::new(
        "radix_number",
        r"\b0[xXoObB][0-9a-fA-F_]+\b",
        StyleTag::Number,
    ));
    lang.add_rule(HighlightRule::new(
        "float",
        r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b",
        StyleTag::Number,
    ));
    lang.add_rule(HighlightRule::new(
        "integer",
        r"\b\d[\d_]*(?:[eE][+-]?\d+)?j?\b",
        StyleTag::Number,
    ));

    // Operators
    lang.add_rule(HighlightRule::new(
        "operator",
        r"[+\-*/%&|^!<>=~@]+",
        StyleTag::Operator,
    ));

    lang
}
