//! File load/save boundary
//!
//! Loading turns raw file bytes into decoded text plus the detected
//! encoding and a lossy-decode flag; saving re-encodes in the file's
//! original encoding and replaces the target atomically (write a temporary
//! sibling, then rename), so a failed or cancelled save leaves the prior
//! contents authoritative.

mod encoding;

pub use encoding::{decode, detect, encode, Decoded, Encoding};

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Suffix for the temporary sibling written during an atomic save
const SAVE_TMP_SUFFIX: &str = ".graphite-save";

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

/// A loaded file: decoded text plus how it was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Decoded document text
    pub text: String,
    /// Encoding the file was decoded with (used again on save)
    pub encoding: Encoding,
    /// True if undecodable bytes were replaced; surfaced as a non-fatal
    /// warning, never an error
    pub lossy: bool,
}

/// Load and decode a file, detecting the encoding from its BOM.
pub fn load(path: &Path) -> Result<LoadedFile> {
    load_with_hint(path, None)
}

/// Load and decode a file with an explicit encoding hint.
///
/// I/O failures are reported as [`Error::FileRead`]; decoding itself never
/// fails (see [`decode`]).
pub fn load_with_hint(path: &Path, hint: Option<Encoding>) -> Result<LoadedFile> {
    debug!("Loading {}", path.display());
    let bytes = fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let decoded = decode(&bytes, hint);
    info!(
        "Loaded {} ({}, {} bytes{})",
        path.display(),
        decoded.encoding.display_name(),
        bytes.len(),
        if decoded.lossy { ", lossy" } else { "" }
    );

    Ok(LoadedFile {
        text: decoded.text,
        encoding: decoded.encoding,
        lossy: decoded.lossy,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Save text to `path` in the given encoding with atomic replace
/// semantics.
///
/// The bytes are written to a temporary sibling first and renamed over the
/// target, so either the full new content is committed or the prior file
/// remains untouched. Failures are reported as [`Error::FileWrite`].
pub fn save(path: &Path, text: &str, file_encoding: Encoding) -> Result<()> {
    let bytes = encode(text, file_encoding);

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(SAVE_TMP_SUFFIX);
    let tmp_path = std::path::PathBuf::from(tmp_name);

    fs::write(&tmp_path, &bytes).map_err(|e| Error::FileWrite {
        path: tmp_path.clone(),
        source: e,
    })?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        // Leave the target untouched; clean up the sibling best-effort
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!(
        "Saved {} ({}, {} bytes)",
        path.display(),
        file_encoding.display_name(),
        bytes.len()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
