//! HTML preview rendering
//!
//! HTML sources are already markup, so the transform is a pass-through: the
//! document bytes go to the host rendering surface unchanged, and the
//! source is never mutated. What this module adds is the sandbox contract
//! the surface must honor when displaying untrusted documents.

// ─────────────────────────────────────────────────────────────────────────────
// Sandbox Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Display restrictions for the host rendering surface.
///
/// The default policy is fully locked down; a host relaxes fields
/// deliberately, per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    /// Allow fetching images, stylesheets, and other external resources
    pub allow_external_resources: bool,
    /// Allow script execution
    pub allow_scripts: bool,
    /// Allow navigation away from the document (following links)
    pub allow_navigation: bool,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            allow_external_resources: false,
            allow_scripts: false,
            allow_navigation: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render an HTML document for preview.
///
/// Input bytes in, rendered visual output out: the source is handed to the
/// display surface as-is. Sandboxing is the surface's responsibility,
/// directed by the accompanying [`SandboxPolicy`].
pub fn render(source: &str) -> String {
    source.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
