//! Markdown preview rendering
//!
//! A two-phase transform from a constrained Markdown dialect to HTML:
//! block-level segmentation (fenced code extraction, blank-line splitting,
//! marker detection) followed by inline-span transformation within each
//! block. Inline matching is non-overlapping and leftmost-first.
//!
//! All text nodes are HTML-escaped before inline processing, so source
//! content that is not itself a recognized construct can never inject
//! markup into the preview.

use regex::Regex;
use std::sync::OnceLock;

use crate::string_utils::escape_html;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Render a Markdown document to an HTML fragment.
///
/// Never fails; unrecognized constructs degrade to escaped paragraph text.
/// An empty document renders to an empty string.
pub fn render(source: &str) -> String {
    if source.trim().is_empty() {
        return String::new();
    }

    // Normalize line endings before any block detection
    let text = source.replace("\r\n", "\n").replace('\r', "\n");

    let blocks = split_blocks(&text);
    let rendered: Vec<String> = blocks.iter().map(render_block).collect();
    rendered.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Segmentation
// ─────────────────────────────────────────────────────────────────────────────

/// A block-level chunk of the document.
#[derive(Debug, PartialEq, Eq)]
enum Block {
    /// Fenced code block with its (possibly empty) language tag
    FencedCode { language: String, literal: String },
    /// Indented code block (4 spaces or a tab)
    IndentedCode { literal: String },
    /// A run of non-blank lines to classify further
    Chunk(Vec<String>),
}

/// Split the document into blocks.
///
/// Fenced code blocks are extracted first so their content is protected
/// from every later transformation; remaining lines split on blank lines.
fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut chunk: Vec<String> = Vec::new();
    let mut fence: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        if let Some((language, mut code_lines)) = fence.take() {
            if line.trim_end() == "```" {
                blocks.push(Block::FencedCode {
                    language,
                    literal: code_lines.join("\n"),
                });
            } else {
                code_lines.push(line.to_string());
                fence = Some((language, code_lines));
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("```") {
            if !chunk.is_empty() {
                blocks.push(Block::Chunk(std::mem::take(&mut chunk)));
            }
            fence = Some((rest.trim().to_string(), Vec::new()));
            continue;
        }

        if line.trim().is_empty() {
            if !chunk.is_empty() {
                blocks.push(Block::Chunk(std::mem::take(&mut chunk)));
            }
        } else {
            chunk.push(line.to_string());
        }
    }

    // An unclosed fence still renders as code rather than vanishing
    if let Some((language, code_lines)) = fence {
        blocks.push(Block::FencedCode {
            language,
            literal: code_lines.join("\n"),
        });
    }
    if !chunk.is_empty() {
        blocks.push(Block::Chunk(chunk));
    }

    blocks
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_block(block: &Block) -> String {
    match block {
        Block::FencedCode { language, literal } => {
            let lang_attr = if language.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", escape_html(language))
            };
            format!("<pre><code{}>{}</code></pre>", lang_attr, escape_html(literal))
        }
        Block::IndentedCode { literal } => {
            format!("<pre><code>{}</code></pre>", escape_html(literal))
        }
        Block::Chunk(lines) => render_chunk(lines),
    }
}

/// Classify and render a run of non-blank lines. The processors are tried
/// in a fixed order; the paragraph processor accepts anything.
fn render_chunk(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    if let Some(html) = render_indented_code(lines) {
        return html;
    }
    if let Some(html) = render_heading(lines) {
        return html;
    }
    if let Some(html) = render_horizontal_rule(lines) {
        return html;
    }
    if let Some(html) = render_blockquote(lines) {
        return html;
    }
    if let Some(html) = render_list(lines) {
        return html;
    }
    render_paragraph(lines)
}

/// A chunk whose every line is indented by 4 spaces or a tab is code.
fn render_indented_code(lines: &[String]) -> Option<String> {
    let all_indented = lines
        .iter()
        .all(|l| l.starts_with("    ") || l.starts_with('\t'));
    if !all_indented {
        return None;
    }
    let stripped: Vec<&str> = lines
        .iter()
        .map(|l| l.strip_prefix("    ").or_else(|| l.strip_prefix('\t')).unwrap_or(l))
        .collect();
    Some(format!(
        "<pre><code>{}</code></pre>",
        escape_html(&stripped.join("\n"))
    ))
}

/// ATX (`# Title`) and setext (`Title\n=====`) headings.
fn render_heading(lines: &[String]) -> Option<String> {
    let atx = patterns().atx_heading.captures(&lines[0]);
    if let Some(caps) = atx {
        let level = caps.get(1).map(|m| m.len()).unwrap_or(1);
        let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let content = render_inline(&escape_html(text));
        let id = heading_slug(text);
        let mut html = format!("<h{level} id=\"{id}\">{content}</h{level}>");
        // Lines following a heading without a separating blank render as
        // their own chunk
        if lines.len() > 1 {
            html.push('\n');
            html.push_str(&render_chunk(&lines[1..]));
        }
        return Some(html);
    }

    // Setext: exactly two lines, the second an underline run
    if lines.len() == 2 {
        let underline = lines[1].trim_end();
        let level = if !underline.is_empty() && underline.chars().all(|c| c == '=') {
            Some(1)
        } else if !underline.is_empty() && underline.chars().all(|c| c == '-') {
            Some(2)
        } else {
            None
        };
        if let Some(level) = level {
            let text = lines[0].trim();
            let content = render_inline(&escape_html(text));
            let id = heading_slug(text);
            return Some(format!("<h{level} id=\"{id}\">{content}</h{level}>"));
        }
    }

    None
}

/// Anchor id for a heading: lowercase, runs of non-word characters
/// collapsed to hyphens.
fn heading_slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    for ch in lower.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn render_horizontal_rule(lines: &[String]) -> Option<String> {
    if lines.len() == 1 && patterns().horizontal_rule.is_match(lines[0].trim()) {
        Some("<hr>".to_string())
    } else {
        None
    }
}

/// A chunk whose every line starts with `>` is a blockquote; the stripped
/// content runs through the whole block pipeline again, so quotes nest.
fn render_blockquote(lines: &[String]) -> Option<String> {
    if !lines.iter().all(|l| l.trim_start().starts_with('>')) {
        return None;
    }
    let inner: Vec<String> = lines
        .iter()
        .map(|l| {
            let stripped = l.trim_start();
            stripped
                .strip_prefix("> ")
                .or_else(|| stripped.strip_prefix('>'))
                .unwrap_or(stripped)
                .to_string()
        })
        .collect();

    let inner_blocks = split_blocks(&inner.join("\n"));
    let rendered: Vec<String> = inner_blocks.iter().map(render_block).collect();
    Some(format!("<blockquote>{}</blockquote>", rendered.join("\n")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Lists
// ─────────────────────────────────────────────────────────────────────────────

struct ListItem {
    content: String,
    child: Option<ListLevel>,
}

struct ListLevel {
    indent: usize,
    ordered: bool,
    items: Vec<ListItem>,
}

/// Unordered/ordered lists with nesting by indentation.
fn render_list(lines: &[String]) -> Option<String> {
    let first = &lines[0];
    if !patterns().unordered_item.is_match(first) && !patterns().ordered_item.is_match(first) {
        return None;
    }

    // Parse marker lines into (indent, ordered, content); other lines are
    // continuations of the current item
    let mut parsed: Vec<(usize, bool, String)> = Vec::new();
    for line in lines {
        if let Some(caps) = patterns().unordered_item.captures(line) {
            let indent = caps.get(1).map(|m| m.len()).unwrap_or(0);
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
            parsed.push((indent, false, content));
        } else if let Some(caps) = patterns().ordered_item.captures(line) {
            let indent = caps.get(1).map(|m| m.len()).unwrap_or(0);
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
            parsed.push((indent, true, content));
        } else if let Some((_, _, content)) = parsed.last_mut() {
            content.push(' ');
            content.push_str(line.trim());
        }
    }

    // Build the nesting tree with an indent stack
    let mut stack: Vec<ListLevel> = Vec::new();
    for (indent, ordered, content) in parsed {
        if stack.is_empty() {
            stack.push(ListLevel {
                indent,
                ordered,
                items: Vec::new(),
            });
        } else if indent > stack.last().map(|l| l.indent).unwrap_or(0) {
            stack.push(ListLevel {
                indent,
                ordered,
                items: Vec::new(),
            });
        } else {
            while stack.len() > 1 && indent < stack.last().map(|l| l.indent).unwrap_or(0) {
                attach_child(&mut stack);
            }
        }
        if let Some(level) = stack.last_mut() {
            level.items.push(ListItem {
                content,
                child: None,
            });
        }
    }
    while stack.len() > 1 {
        attach_child(&mut stack);
    }
    let root = stack.pop()?;
    Some(render_list_level(&root))
}

/// Pop the top level and attach it as the child of the last item beneath.
fn attach_child(stack: &mut Vec<ListLevel>) {
    if let Some(child) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            match parent.items.last_mut() {
                Some(item) => item.child = Some(child),
                None => parent.items.extend(child.items),
            }
        }
    }
}

fn render_list_level(level: &ListLevel) -> String {
    let tag = if level.ordered { "ol" } else { "ul" };
    let mut html = format!("<{}>", tag);
    for item in &level.items {
        let content = render_inline(&task_list_marker(&escape_html(item.content.trim())));
        html.push_str("<li>");
        html.push_str(&content);
        if let Some(child) = &item.child {
            html.push_str(&render_list_level(child));
        }
        html.push_str("</li>");
    }
    html.push_str(&format!("</{}>", tag));
    html
}

/// Replace a leading task-list marker with a checkbox symbol.
fn task_list_marker(content: &str) -> String {
    patterns()
        .task_marker
        .replace(content, |caps: &regex::Captures| {
            let checked = caps
                .get(1)
                .map(|m| m.as_str().eq_ignore_ascii_case("x"))
                .unwrap_or(false);
            format!("{} ", if checked { "☑" } else { "☐" })
        })
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Paragraphs and Inline Spans
// ─────────────────────────────────────────────────────────────────────────────

fn render_paragraph(lines: &[String]) -> String {
    let text = lines.join("\n");
    format!("<p>{}</p>", render_inline(&escape_html(text.trim())))
}

/// Transform inline constructs in already-escaped text.
///
/// Code spans are extracted first and restored last so no other transform
/// can rewrite their content. Everything else applies in a fixed order as
/// non-overlapping leftmost-first replacements.
fn render_inline(escaped: &str) -> String {
    let p = patterns();

    // Protect code spans
    let mut code_spans: Vec<String> = Vec::new();
    let mut text = p
        .inline_code
        .replace_all(escaped, |caps: &regex::Captures| {
            let idx = code_spans.len();
            code_spans.push(format!(
                "<code>{}</code>",
                caps.get(1).map(|m| m.as_str()).unwrap_or("")
            ));
            format!("\u{FFFC}{}\u{FFFC}", idx)
        })
        .into_owned();

    // Images before links so the leading `!` binds correctly
    text = p
        .image
        .replace_all(&text, |caps: &regex::Captures| {
            let alt = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let src = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let title = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            format!("<img src=\"{}\" alt=\"{}\" title=\"{}\">", src, alt, title)
        })
        .into_owned();
    text = p
        .link
        .replace_all(&text, |caps: &regex::Captures| {
            let label = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let href = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let title = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            format!("<a href=\"{}\" title=\"{}\">{}</a>", href, title, label)
        })
        .into_owned();

    // Autolinks (the angle brackets are already escaped entities)
    text = p.auto_url.replace_all(&text, "<a href=\"$1\">$1</a>").into_owned();
    text = p
        .auto_email
        .replace_all(&text, "<a href=\"mailto:$1\">$1</a>")
        .into_owned();

    // Emphasis, strongest marker first
    text = p
        .bold_italic_stars
        .replace_all(&text, "<strong><em>$1</em></strong>")
        .into_owned();
    text = p
        .bold_italic_under
        .replace_all(&text, "<strong><em>$1</em></strong>")
        .into_owned();
    text = p.bold_stars.replace_all(&text, "<strong>$1</strong>").into_owned();
    text = p.bold_under.replace_all(&text, "<strong>$1</strong>").into_owned();
    text = p.italic_stars.replace_all(&text, "<em>$1</em>").into_owned();
    text = p.italic_under.replace_all(&text, "<em>$1</em>").into_owned();
    text = p.strikethrough.replace_all(&text, "<del>$1</del>").into_owned();

    // Restore protected code spans
    for (idx, code) in code_spans.iter().enumerate() {
        text = text.replace(&format!("\u{FFFC}{}\u{FFFC}", idx), code);
    }
    text
}

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Patterns
// ─────────────────────────────────────────────────────────────────────────────

struct Patterns {
    atx_heading: Regex,
    horizontal_rule: Regex,
    unordered_item: Regex,
    ordered_item: Regex,
    task_marker: Regex,
    inline_code: Regex,
    image: Regex,
    link: Regex,
    auto_url: Regex,
    auto_email: Regex,
    bold_italic_stars: Regex,
    bold_italic_under: Regex,
    bold_stars: Regex,
    bold_under: Regex,
    italic_stars: Regex,
    italic_under: Regex,
    strikethrough: Regex,
}

/// Compiled once on first use and shared by every render.
fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        atx_heading: compiled(r"^(#{1,6})\s+(.+?)(?:\s+#+)?$"),
        horizontal_rule: compiled(r"^ {0,3}(?:-[ ]*){3,}$|^ {0,3}(?:\*[ ]*){3,}$|^ {0,3}(?:_[ ]*){3,}$"),
        unordered_item: compiled(r"^(\s*)[-*+]\s+(.*)$"),
        ordered_item: compiled(r"^(\s*)\d+\.\s+(.*)$"),
        task_marker: compiled(r"^\[([ xX])\]\s+"),
        inline_code: compiled(r"`([^`]+)`"),
        image: compiled(r"!\[([^\]]*)\]\(([^)\s]+)(?:\s+&quot;([^&]*)&quot;)?\)"),
        link: compiled(r"\[([^\]]+)\]\(([^)\s]+)(?:\s+&quot;([^&]*)&quot;)?\)"),
        auto_url: compiled(r"&lt;(https?://[^\s&]+)&gt;"),
        auto_email: compiled(r"&lt;([^@\s&]+@[^@\s&]+\.[^@\s&]+)&gt;"),
        bold_italic_stars: compiled(r"\*\*\*([^\s*](?:[^*]*[^\s*])?)\*\*\*"),
        bold_italic_under: compiled(r"___([^\s_](?:[^_]*[^\s_])?)___"),
        bold_stars: compiled(r"\*\*([^\s*](?:[^*]*[^\s*])?)\*\*"),
        bold_under: compiled(r"__([^\s_](?:[^_]*[^\s_])?)__"),
        italic_stars: compiled(r"\*([^\s*](?:[^*]*[^\s*])?)\*"),
        italic_under: compiled(r"\b_([^\s_](?:[^_]*[^\s_])?)_\b"),
        strikethrough: compiled(r"~~([^\s~](?:[^~]*[^\s~])?)~~"),
    })
}

fn compiled(pattern: &str) -> Regex {
    // Patterns are fixed literals above; a failure here is a programming
    // error caught by the test suite
    Regex::new(pattern).expect("hard-coded markdown pattern is valid")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Paragraphs and escaping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_document() {
        assert_eq!(render(""), "");
        assert_eq!(render("  \n \n"), "");
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(render("text"), "<p>text</p>");
    }

    #[test]
    fn test_paragraph_escapes_html() {
        let html = render("a <script> & b > c");
        assert_eq!(html, "<p>a &lt;script&gt; &amp; b &gt; c</p>");
    }

    #[test]
    fn test_two_paragraphs() {
        let html = render("one\n\ntwo");
        assert_eq!(html, "<p>one</p>\n<p>two</p>");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Headings
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_heading_then_bold_paragraph() {
        let html = render("# Title\n\nSome **bold** text.");
        assert!(html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(html.contains("<p>Some <strong>bold</strong> text.</p>"));
    }

    #[test]
    fn test_heading_levels() {
        assert!(render("### Three").contains("<h3"));
        assert!(render("###### Six").contains("<h6"));
        // Seven hashes is not a heading
        assert!(render("####### Seven").starts_with("<p>"));
    }

    #[test]
    fn test_heading_trailing_hashes_stripped() {
        let html = render("## Mid ##");
        assert!(html.contains("<h2 id=\"mid\">Mid</h2>"));
    }

    #[test]
    fn test_heading_slug() {
        assert_eq!(heading_slug("Hello,  World!"), "hello-world");
        assert_eq!(heading_slug("--x--"), "x");
    }

    #[test]
    fn test_setext_headings() {
        assert!(render("Title\n=====").contains("<h1 id=\"title\">Title</h1>"));
        assert!(render("Sub\n---").contains("<h2 id=\"sub\">Sub</h2>"));
    }

    #[test]
    fn test_heading_without_blank_line_before_text() {
        let html = render("# Title\nbody line");
        assert!(html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(html.contains("<p>body line</p>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Code
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fenced_code_block() {
        let html = render("```rust\nfn main() {}\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_escapes_content() {
        let html = render("```\n<b>&\n```");
        assert!(html.contains("&lt;b&gt;&amp;"));
    }

    #[test]
    fn test_fenced_code_ignores_markers_inside() {
        let html = render("```\n# not a heading\n**not bold**\n```");
        assert!(!html.contains("<h1"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_unclosed_fence_still_renders() {
        let html = render("```\ndangling");
        assert!(html.contains("<pre><code>dangling</code></pre>"));
    }

    #[test]
    fn test_indented_code_block() {
        let html = render("    let x = 1;\n    let y = 2;");
        assert_eq!(html, "<pre><code>let x = 1;\nlet y = 2;</code></pre>");
    }

    #[test]
    fn test_inline_code_protected_from_emphasis() {
        let html = render("use `**raw**` here");
        assert!(html.contains("<code>**raw**</code>"));
        assert!(!html.contains("<strong>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Emphasis
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_and_italic() {
        assert!(render("*it*").contains("<em>it</em>"));
        assert!(render("**st**").contains("<strong>st</strong>"));
        assert!(render("***both***").contains("<strong><em>both</em></strong>"));
        assert!(render("__st__").contains("<strong>st</strong>"));
        assert!(render("_it_").contains("<em>it</em>"));
    }

    #[test]
    fn test_underscores_inside_words_untouched() {
        let html = render("snake_case_name stays");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render("~~gone~~").contains("<del>gone</del>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links and images
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link() {
        let html = render("[text](https://example.com)");
        assert!(html.contains("<a href=\"https://example.com\" title=\"\">text</a>"));
    }

    #[test]
    fn test_link_with_title() {
        let html = render("[t](https://e.com \"hi\")");
        assert!(html.contains("title=\"hi\""));
    }

    #[test]
    fn test_image() {
        let html = render("![alt](img.png)");
        assert!(html.contains("<img src=\"img.png\" alt=\"alt\" title=\"\">"));
    }

    #[test]
    fn test_autolink_url() {
        let html = render("<https://example.com>");
        assert!(html.contains("<a href=\"https://example.com\">https://example.com</a>"));
    }

    #[test]
    fn test_autolink_email() {
        let html = render("<user@example.com>");
        assert!(html.contains("mailto:user@example.com"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unordered_list() {
        let html = render("- a\n- b\n- c");
        assert_eq!(html, "<ul><li>a</li><li>b</li><li>c</li></ul>");
    }

    #[test]
    fn test_ordered_list() {
        let html = render("1. first\n2. second");
        assert_eq!(html, "<ol><li>first</li><li>second</li></ol>");
    }

    #[test]
    fn test_nested_list() {
        let html = render("- a\n  - a1\n  - a2\n- b");
        assert_eq!(
            html,
            "<ul><li>a<ul><li>a1</li><li>a2</li></ul></li><li>b</li></ul>"
        );
    }

    #[test]
    fn test_ordered_inside_unordered() {
        let html = render("- a\n  1. one\n  2. two");
        assert!(html.contains("<li>a<ol><li>one</li><li>two</li></ol></li>"));
    }

    #[test]
    fn test_task_list_markers() {
        let html = render("- [ ] open\n- [x] done");
        assert!(html.contains("<li>☐ open</li>"));
        assert!(html.contains("<li>☑ done</li>"));
    }

    #[test]
    fn test_list_item_inline_formatting() {
        let html = render("- **bold** item");
        assert!(html.contains("<li><strong>bold</strong> item</li>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blockquotes and rules
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_blockquote() {
        let html = render("> quoted text");
        assert_eq!(html, "<blockquote><p>quoted text</p></blockquote>");
    }

    #[test]
    fn test_nested_blockquote() {
        let html = render("> outer\n>\n> > inner");
        assert!(html.starts_with("<blockquote>"));
        assert!(html.contains("<blockquote><p>inner</p></blockquote>"));
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(render("---"), "<hr>");
        assert_eq!(render("* * *"), "<hr>");
        assert_eq!(render("___"), "<hr>");
    }

    #[test]
    fn test_determinism() {
        let source = "# T\n\n- a\n- b\n\n> q\n\n`c` **d**";
        assert_eq!(render(source), render(source));
    }
}
