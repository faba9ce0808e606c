//! Text encoding detection and conversion
//!
//! Files arrive as raw bytes with an optional encoding hint. Detection is
//! BOM-based, checked in order of BOM specificity (UTF-32 marks begin with
//! the UTF-16 LE mark, so the longer ones go first). Without a BOM or hint
//! the bytes are treated as UTF-8; undecodable sequences fall back to
//! replacement characters and the result is flagged as lossy so the caller
//! can surface a non-fatal warning.

use log::warn;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// UTF-8 without a byte order mark (the default)
    #[default]
    Utf8,
    /// UTF-8 with a byte order mark
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Display name for the status bar / encoding menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf8Bom => "UTF-8 BOM",
            Encoding::Utf16Le => "UTF-16 LE",
            Encoding::Utf16Be => "UTF-16 BE",
            Encoding::Utf32Le => "UTF-32 LE",
            Encoding::Utf32Be => "UTF-32 BE",
        }
    }

    /// The byte order mark this encoding writes (empty for plain UTF-8).
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf8Bom => &[0xEF, 0xBB, 0xBF],
            Encoding::Utf16Le => &[0xFF, 0xFE],
            Encoding::Utf16Be => &[0xFE, 0xFF],
            Encoding::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Encoding::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Detect an encoding from a byte order mark.
///
/// Checked in order of specificity: the UTF-32 LE mark starts with the
/// UTF-16 LE mark, so the four-byte marks must win.
pub fn detect(bytes: &[u8]) -> Option<Encoding> {
    const CANDIDATES: [Encoding; 5] = [
        Encoding::Utf32Le,
        Encoding::Utf32Be,
        Encoding::Utf16Le,
        Encoding::Utf16Be,
        Encoding::Utf8Bom,
    ];
    CANDIDATES
        .into_iter()
        .find(|encoding| bytes.starts_with(encoding.bom()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// The result of decoding file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text
    pub text: String,
    /// The encoding actually used
    pub encoding: Encoding,
    /// True if undecodable bytes were replaced with U+FFFD
    pub lossy: bool,
}

/// Decode raw file bytes into text.
///
/// The explicit `hint` wins over BOM detection; with neither, bytes are
/// read as UTF-8. Never fails: invalid sequences decode to replacement
/// characters with `lossy` set.
pub fn decode(bytes: &[u8], hint: Option<Encoding>) -> Decoded {
    let encoding = hint.or_else(|| detect(bytes)).unwrap_or(Encoding::Utf8);
    let body = bytes
        .strip_prefix(encoding.bom())
        .unwrap_or(bytes);

    let (text, lossy) = match encoding {
        Encoding::Utf8 | Encoding::Utf8Bom => decode_utf8(body),
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(body, u32::from_le_bytes),
        Encoding::Utf32Be => decode_utf32(body, u32::from_be_bytes),
    };

    if lossy {
        warn!(
            "Decoded {} bytes as {} with replacement characters",
            bytes.len(),
            encoding.display_name()
        );
    }

    Decoded {
        text,
        encoding,
        lossy,
    }
}

fn decode_utf8(bytes: &[u8]) -> (String, bool) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), true),
    }
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> (String, bool) {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    let mut lossy = bytes.len() % 2 != 0;
    if lossy {
        units.push(char::REPLACEMENT_CHARACTER as u16);
    }

    match String::from_utf16(&units) {
        Ok(text) => (text, lossy),
        Err(_) => {
            lossy = true;
            (String::from_utf16_lossy(&units), lossy)
        }
    }
}

fn decode_utf32(bytes: &[u8], combine: fn([u8; 4]) -> u32) -> (String, bool) {
    let mut lossy = bytes.len() % 4 != 0;
    let mut text = String::with_capacity(bytes.len() / 4);
    for quad in bytes.chunks_exact(4) {
        match char::from_u32(combine([quad[0], quad[1], quad[2], quad[3]])) {
            Some(ch) => text.push(ch),
            None => {
                text.push(char::REPLACEMENT_CHARACTER);
                lossy = true;
            }
        }
    }
    if bytes.len() % 4 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    (text, lossy)
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding (text → bytes)
// ─────────────────────────────────────────────────────────────────────────────

/// Encode text for saving, prefixing the encoding's BOM.
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    let mut bytes = encoding.bom().to_vec();
    match encoding {
        Encoding::Utf8 | Encoding::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
        Encoding::Utf16Le => {
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_le_bytes());
            }
        }
        Encoding::Utf16Be => {
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
        }
        Encoding::Utf32Le => {
            for ch in text.chars() {
                bytes.extend_from_slice(&(ch as u32).to_le_bytes());
            }
        }
        Encoding::Utf32Be => {
            for ch in text.chars() {
                bytes.extend_from_slice(&(ch as u32).to_be_bytes());
            }
        }
    }
    bytes
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
