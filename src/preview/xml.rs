//! XML preview rendering
//!
//! A hand-rolled, fault-tolerant XML parser producing an element tree, plus
//! the two views the preview pane shows: collapsible tree rows and a
//! pretty-printed text form with consistent indentation.
//!
//! Malformed input never panics; it produces an [`XmlError`] carrying the
//! line and column of the offending construct, and the caller falls back to
//! displaying the raw text.

use std::fmt;

use crate::string_utils::escape_html;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Indent width for the pretty-printed view
const INDENT: &str = "  ";

/// Maximum text preview length in tree rows
const TEXT_PREVIEW_MAX: usize = 60;

/// Attribute count above which a tree row shows a count instead of values
const ATTR_SUMMARY_MAX: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Error Type
// ─────────────────────────────────────────────────────────────────────────────

/// A structured XML parse error with source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    /// 1-based line of the offending construct
    pub line: usize,
    /// 1-based column of the offending construct
    pub column: usize,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "XML error on line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for XmlError {}

// ─────────────────────────────────────────────────────────────────────────────
// Element Tree
// ─────────────────────────────────────────────────────────────────────────────

/// One element of the parsed tree.
///
/// `attributes` preserves source order. `text` is the concatenated character
/// data directly inside this element (including CDATA content), with
/// surrounding whitespace preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Tag name, including any namespace prefix
    pub name: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Child elements in source order
    pub children: Vec<XmlElement>,
    /// Direct text content
    pub text: String,
}

impl XmlElement {
    /// Attribute value by name, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text content.
    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Total number of elements in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_size()).sum::<usize>()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse an XML document into its root element.
pub fn parse(source: &str) -> Result<XmlElement, XmlError> {
    let mut parser = Parser::new(source);
    parser.skip_misc()?;

    if parser.at_end() {
        return Err(parser.error_here("no root element found"));
    }

    let root = parser.parse_element()?;

    parser.skip_misc()?;
    if !parser.at_end() {
        return Err(parser.error_here("content after document element"));
    }

    Ok(root)
}

/// Validate a document, returning the first error if any.
pub fn validate(source: &str) -> Option<XmlError> {
    parse(source).err()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            for _ in literal.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn error_here(&self, message: &str) -> XmlError {
        XmlError {
            line: self.line,
            column: self.column,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map(|c| c.is_whitespace()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Skip whitespace, comments, processing instructions, and DOCTYPE.
    fn skip_misc(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("<?") {
                self.skip_until("?>", "unterminated processing instruction")?;
            } else if self.rest().len() >= 2
                && self.rest().starts_with("<!")
                && !self.rest().starts_with("<![CDATA[")
            {
                self.skip_until(">", "unterminated declaration")?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), XmlError> {
        let start = self.error_here("unterminated comment");
        self.eat("<!--");
        loop {
            if self.at_end() {
                return Err(start);
            }
            if self.eat("-->") {
                return Ok(());
            }
            self.bump();
        }
    }

    fn skip_until(&mut self, terminator: &str, message: &str) -> Result<(), XmlError> {
        let start = self.error_here(message);
        loop {
            if self.at_end() {
                return Err(start);
            }
            if self.eat(terminator) {
                return Ok(());
            }
            self.bump();
        }
    }

    fn parse_name(&mut self) -> Result<String, XmlError> {
        let mut name = String::new();
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {
                name.push(c);
                self.bump();
            }
            _ => return Err(self.error_here("expected a name")),
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn parse_element(&mut self) -> Result<XmlElement, XmlError> {
        if !self.eat("<") {
            return Err(self.error_here("expected '<'"));
        }
        let name = self.parse_name()?;
        let mut element = XmlElement {
            name,
            ..XmlElement::default()
        };

        // Attributes
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/') => {
                    self.bump();
                    if !self.eat(">") {
                        return Err(self.error_here("expected '>' after '/'"));
                    }
                    return Ok(element); // self-closing
                }
                Some('>') => {
                    self.bump();
                    break;
                }
                Some(c) if c.is_alphabetic() || c == '_' => {
                    let attr_name = self.parse_name()?;
                    self.skip_whitespace();
                    if !self.eat("=") {
                        return Err(self.error_here(&format!(
                            "attribute '{}' is missing a value",
                            attr_name
                        )));
                    }
                    self.skip_whitespace();
                    let value = self.parse_attribute_value()?;
                    element.attributes.push((attr_name, value));
                }
                Some(_) => return Err(self.error_here("malformed tag")),
                None => {
                    return Err(self.error_here(&format!(
                        "unexpected end of document inside <{}>",
                        element.name
                    )))
                }
            }
        }

        // Content
        loop {
            if self.at_end() {
                return Err(self.error_here(&format!(
                    "unexpected end of document, <{}> is not closed",
                    element.name
                )));
            }

            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("<![CDATA[") {
                element.text.push_str(&self.parse_cdata()?);
            } else if self.rest().starts_with("</") {
                let err_line = self.line;
                let err_column = self.column;
                self.eat("</");
                let closing = self.parse_name()?;
                if closing != element.name {
                    return Err(XmlError {
                        line: err_line,
                        column: err_column,
                        message: format!(
                            "mismatched closing tag: expected </{}>, found </{}>",
                            element.name, closing
                        ),
                    });
                }
                self.skip_whitespace();
                if !self.eat(">") {
                    return Err(self.error_here("expected '>' in closing tag"));
                }
                return Ok(element);
            } else if self.rest().starts_with("<?") {
                self.skip_until("?>", "unterminated processing instruction")?;
            } else if self.peek() == Some('<') {
                element.children.push(self.parse_element()?);
            } else {
                let text = self.parse_text();
                element.text.push_str(&text);
            }
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String, XmlError> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error_here("expected a quoted attribute value")),
        };
        let start = self.error_here("unterminated attribute value");
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(start),
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(decode_entities(&value));
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn parse_cdata(&mut self) -> Result<String, XmlError> {
        let start = self.error_here("unterminated CDATA section");
        self.eat("<![CDATA[");
        let mut content = String::new();
        loop {
            if self.at_end() {
                return Err(start);
            }
            if self.eat("]]>") {
                return Ok(content);
            }
            if let Some(c) = self.bump() {
                content.push(c);
            }
        }
    }

    /// Character data up to the next markup; entities are decoded.
    fn parse_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '<' {
                break;
            }
            text.push(c);
            self.bump();
        }
        decode_entities(&text)
    }
}

/// Decode the predefined entities and numeric character references.
/// Unknown entities pass through unchanged rather than failing the parse.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match rest.find(';') {
            Some(semi) if semi <= 12 => {
                let entity = &rest[1..semi];
                let decoded = match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                        .or_else(|| {
                            entity.strip_prefix('#').and_then(|dec| dec.parse().ok())
                        })
                        .and_then(char::from_u32),
                };
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        rest = &rest[semi + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree View Rows
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the collapsible tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Nesting depth, 0 for the root
    pub depth: usize,
    /// Element name
    pub name: String,
    /// Attribute summary: a single `key="value"`, a short joined list, or
    /// an `N attributes` count
    pub attribute_summary: String,
    /// Collapsed text content, truncated for display
    pub text_preview: String,
    /// Number of direct children (drives the expand/collapse affordance)
    pub child_count: usize,
}

/// Flatten an element tree into display rows, depth-first.
pub fn tree_rows(root: &XmlElement) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(root.subtree_size());
    flatten_into(root, 0, &mut rows);
    rows
}

fn flatten_into(element: &XmlElement, depth: usize, rows: &mut Vec<TreeRow>) {
    rows.push(TreeRow {
        depth,
        name: element.name.clone(),
        attribute_summary: summarize_attributes(&element.attributes),
        text_preview: preview_text(&element.text),
        child_count: element.children.len(),
    });
    for child in &element.children {
        flatten_into(child, depth + 1, rows);
    }
}

fn summarize_attributes(attributes: &[(String, String)]) -> String {
    match attributes.len() {
        0 => String::new(),
        n if n <= ATTR_SUMMARY_MAX => attributes
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" "),
        n => format!("{} attributes", n),
    }
}

/// Collapse whitespace and truncate for a single-line preview.
fn preview_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > TEXT_PREVIEW_MAX {
        let truncated: String = collapsed.chars().take(TEXT_PREVIEW_MAX).collect();
        format!("{}...", truncated)
    } else {
        collapsed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pretty Printing
// ─────────────────────────────────────────────────────────────────────────────

/// Format an element tree as indented XML text.
pub fn pretty_print(root: &XmlElement) -> String {
    let mut out = String::new();
    print_element(root, 0, &mut out);
    out
}

fn print_element(element: &XmlElement, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }

    let text = element.text_trimmed();
    if element.children.is_empty() && text.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push('>');
    if element.children.is_empty() {
        // Short leaf: text inline on one line
        out.push_str(&escape_html(text));
    } else {
        out.push('\n');
        if !text.is_empty() {
            out.push_str(&INDENT.repeat(depth + 1));
            out.push_str(&escape_html(text));
            out.push('\n');
        }
        for child in &element.children {
            print_element(child, depth + 1, out);
        }
        out.push_str(&pad);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
