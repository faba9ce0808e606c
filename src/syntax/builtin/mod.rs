//! Built-in language profiles
//!
//! One module per language, each exposing a `profile()` constructor. The
//! registry loads all of them at startup; hosts can override any of them by
//! registering a profile claiming the same extension.

mod css;
mod html;
mod javascript;
mod json;
mod python;
mod xml;

use super::profile::LanguageProfile;

/// All built-in language profiles.
pub fn all_profiles() -> Vec<LanguageProfile> {
    vec![
        python::profile(),
        javascript::profile(),
        html::profile(),
        css::profile(),
        json::profile(),
        xml::profile(),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::LineState;
    use crate::syntax::style::StyleTag;

    fn profile_named(name: &str) -> LanguageProfile {
        all_profiles()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing builtin profile {}", name))
    }

    fn tag_at(profile: &LanguageProfile, line: &str, offset: usize) -> StyleTag {
        let result = profile.highlight_line(line, LineState::Default);
        result
            .spans
            .iter()
            .find(|s| s.start <= offset && offset < s.end())
            .map(|s| s.tag)
            .unwrap_or(StyleTag::Plain)
    }

    #[test]
    fn test_all_profiles_have_rules_and_extensions() {
        for profile in all_profiles() {
            assert!(!profile.is_empty(), "{} has no rules", profile.name);
            assert!(
                !profile.extensions.is_empty(),
                "{} claims no extensions",
                profile.name
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Python
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_python_basics() {
        let py = profile_named("Python");
        assert_eq!(tag_at(&py, "def foo():", 0), StyleTag::Keyword);
        assert_eq!(tag_at(&py, "# note", 0), StyleTag::Comment);
        assert_eq!(tag_at(&py, "x = 'text'", 5), StyleTag::String);
        assert_eq!(tag_at(&py, "n = 0x1F", 5), StyleTag::Number);
        assert_eq!(tag_at(&py, "print(x)", 0), StyleTag::Function);
    }

    #[test]
    fn test_python_docstring_state() {
        let py = profile_named("Python");
        let result = py.highlight_line(r#"    """Summary line."#, LineState::Default);
        assert_eq!(result.end_state, LineState::Docstring);

        // A docstring continuation line styles as comment
        let cont = py.highlight_line("more prose", LineState::Docstring);
        assert_eq!(cont.spans[0].tag, StyleTag::Comment);
        assert_eq!(cont.end_state, LineState::Docstring);

        let close = py.highlight_line(r#"    done.""""#, LineState::Docstring);
        assert_eq!(close.end_state, LineState::Default);
    }

    #[test]
    fn test_python_triple_quote_mid_line_is_string_not_docstring() {
        let py = profile_named("Python");
        let result = py.highlight_line(r#"s = """starts here"#, LineState::Default);
        assert_eq!(result.end_state, LineState::TripleQuote);
        assert_eq!(result.spans.last().map(|s| s.tag), Some(StyleTag::String));
    }

    #[test]
    fn test_python_closed_docstring_on_one_line() {
        let py = profile_named("Python");
        let result = py.highlight_line(r#"    """All on one line.""""#, LineState::Default);
        assert_eq!(result.end_state, LineState::Default);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JavaScript
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_javascript_basics() {
        let js = profile_named("JavaScript");
        assert_eq!(tag_at(&js, "const x = 1;", 0), StyleTag::Keyword);
        assert_eq!(tag_at(&js, "// note", 0), StyleTag::Comment);
        assert_eq!(tag_at(&js, "console.log(1)", 0), StyleTag::Function);
        assert_eq!(tag_at(&js, "a => b", 2), StyleTag::Operator);
    }

    #[test]
    fn test_javascript_template_literal_state() {
        let js = profile_named("JavaScript");
        let result = js.highlight_line("const t = `multi", LineState::Default);
        assert_eq!(result.end_state, LineState::TemplateLiteral);

        let close = js.highlight_line("line`;", LineState::TemplateLiteral);
        assert_eq!(close.end_state, LineState::Default);
    }

    #[test]
    fn test_javascript_escaped_backtick_keeps_literal_open() {
        let js = profile_named("JavaScript");
        let result = js.highlight_line(r"const t = `with \` inside", LineState::Default);
        assert_eq!(result.end_state, LineState::TemplateLiteral);
    }

    #[test]
    fn test_javascript_block_comment_state() {
        let js = profile_named("JavaScript");
        let result = js.highlight_line("code /* starts", LineState::Default);
        assert_eq!(result.end_state, LineState::BlockComment);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTML / XML
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_html_basics() {
        let html = profile_named("HTML");
        assert_eq!(tag_at(&html, "<div class=\"a\">", 1), StyleTag::Keyword);
        assert_eq!(tag_at(&html, "<div class=\"a\">", 5), StyleTag::Function);
        assert_eq!(tag_at(&html, "<div class=\"a\">", 11), StyleTag::String);
        assert_eq!(tag_at(&html, "a &amp; b", 2), StyleTag::Number);
    }

    #[test]
    fn test_html_comment_spans_lines() {
        let html = profile_named("HTML");
        let result = html.highlight_line("<!-- open", LineState::Default);
        assert_eq!(result.end_state, LineState::BlockComment);
        let close = html.highlight_line("still --> <p>", LineState::BlockComment);
        assert_eq!(close.end_state, LineState::Default);
    }

    #[test]
    fn test_xml_cdata_state() {
        let xml = profile_named("XML");
        let result = xml.highlight_line("<data><![CDATA[raw < text", LineState::Default);
        assert_eq!(result.end_state, LineState::Cdata);

        let cont = xml.highlight_line("more raw", LineState::Cdata);
        assert_eq!(cont.spans[0].tag, StyleTag::String);

        let close = xml.highlight_line("end]]></data>", LineState::Cdata);
        assert_eq!(close.end_state, LineState::Default);
    }

    #[test]
    fn test_xml_prolog() {
        let xml = profile_named("XML");
        assert_eq!(
            tag_at(&xml, r#"<?xml version="1.0"?>"#, 1),
            StyleTag::Keyword
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CSS / JSON
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_css_basics() {
        let css = profile_named("CSS");
        assert_eq!(tag_at(&css, ".header { color: #fff; }", 0), StyleTag::Keyword);
        assert_eq!(tag_at(&css, "  color: red;", 2), StyleTag::Function);
        assert_eq!(tag_at(&css, "  width: 12px;", 11), StyleTag::Number);
        assert_eq!(tag_at(&css, "  color: #a0b1c2;", 9), StyleTag::Number);
    }

    #[test]
    fn test_json_key_beats_string_by_length() {
        let json = profile_named("JSON");
        // "name" is a key (longer match including the colon)
        assert_eq!(tag_at(&json, r#"  "name": "value""#, 3), StyleTag::Keyword);
        // "value" is a plain string
        assert_eq!(tag_at(&json, r#"  "name": "value""#, 11), StyleTag::String);
    }

    #[test]
    fn test_json_literals_and_numbers() {
        let json = profile_named("JSON");
        assert_eq!(tag_at(&json, "[true, 1.5e3]", 1), StyleTag::Keyword);
        assert_eq!(tag_at(&json, "[true, 1.5e3]", 7), StyleTag::Number);
    }
}
