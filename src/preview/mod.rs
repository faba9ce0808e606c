//! Preview rendering subsystem
//!
//! Renders a complete document into a previewable form for one of three
//! formats: HTML (pass-through markup), Markdown (custom transform to
//! HTML), and XML (parsed tree plus a formatted text view). Rendering is
//! dispatched by format kind over a closed set of variants; results are
//! cached per document revision and regeneration is debounced behind a
//! quiescence interval.
//!
//! Transform failures never propagate: they surface as
//! [`RenderOutcome::Unavailable`] with a reason message, and the host falls
//! back to showing the raw text.

mod debounce;
pub mod html;
pub mod markdown;
pub mod xml;

pub use debounce::PreviewDebouncer;
pub use html::SandboxPolicy;
pub use xml::{TreeRow, XmlElement, XmlError};

use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Format Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of preview formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewFormat {
    Html,
    Markdown,
    Xml,
}

impl PreviewFormat {
    /// Display name for menu labels and status messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            PreviewFormat::Html => "HTML",
            PreviewFormat::Markdown => "Markdown",
            PreviewFormat::Xml => "XML",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Extension → preview format mapping.
pub struct FormatRegistry {
    map: HashMap<String, PreviewFormat>,
}

impl FormatRegistry {
    /// Create a registry with the default extension bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            map: HashMap::new(),
        };
        registry.register("md", PreviewFormat::Markdown);
        registry.register("markdown", PreviewFormat::Markdown);
        registry.register("xml", PreviewFormat::Xml);
        registry.register("html", PreviewFormat::Html);
        registry.register("htm", PreviewFormat::Html);
        registry
    }

    /// Bind an extension (without the dot) to a format. Later bindings win.
    pub fn register(&mut self, extension: &str, format: PreviewFormat) {
        self.map.insert(extension.to_lowercase(), format);
    }

    /// Format for an extension, `None` if the file type has no preview.
    pub fn format_for_extension(&self, extension: &str) -> Option<PreviewFormat> {
        self.map.get(&extension.to_lowercase()).copied()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// The renderable output of a successful transform.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    /// Pass-through markup with the sandbox policy the surface must honor
    Html {
        markup: String,
        sandbox: SandboxPolicy,
    },
    /// HTML fragment produced from Markdown source
    Markdown { html: String },
    /// Parsed XML: the tree view model and the formatted text view
    Xml {
        root: XmlElement,
        formatted: String,
    },
}

/// What the preview surface should show.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// A fresh render is ready to display
    Ready(RenderOutput),
    /// The transform failed; show the raw text with this reason
    Unavailable { reason: String },
}

impl RenderOutcome {
    /// Status message for the unavailable state.
    pub fn status_message(&self) -> Option<String> {
        match self {
            RenderOutcome::Ready(_) => None,
            RenderOutcome::Unavailable { reason } => {
                Some(format!("Preview unavailable: {}", reason))
            }
        }
    }
}

/// Render `source` for the given format.
///
/// This is the renderer boundary: failures inside a transform are caught
/// here and reported as [`RenderOutcome::Unavailable`], never returned as
/// errors.
pub fn render(format: PreviewFormat, source: &str) -> RenderOutcome {
    match format {
        PreviewFormat::Html => RenderOutcome::Ready(RenderOutput::Html {
            markup: html::render(source),
            sandbox: SandboxPolicy::default(),
        }),
        PreviewFormat::Markdown => RenderOutcome::Ready(RenderOutput::Markdown {
            html: markdown::render(source),
        }),
        PreviewFormat::Xml => match xml::parse(source) {
            Ok(root) => {
                let formatted = xml::pretty_print(&root);
                RenderOutcome::Ready(RenderOutput::Xml { root, formatted })
            }
            Err(err) => RenderOutcome::Unavailable {
                reason: err.to_string(),
            },
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Revision-keyed cache of render outcomes, one slot per format.
///
/// A cached entry is valid only for the exact revision it was produced
/// from; a lookup with any other revision misses.
pub struct RenderCache {
    entries: HashMap<PreviewFormat, (u64, RenderOutcome)>,
}

impl RenderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached outcome for `format` at exactly `revision`.
    pub fn get(&self, format: PreviewFormat, revision: u64) -> Option<&RenderOutcome> {
        match self.entries.get(&format) {
            Some((cached_revision, outcome)) if *cached_revision == revision => Some(outcome),
            _ => None,
        }
    }

    /// Store an outcome for `format` at `revision`, replacing any previous
    /// entry for the format.
    pub fn insert(&mut self, format: PreviewFormat, revision: u64, outcome: RenderOutcome) {
        self.entries.insert(format, (revision, outcome));
    }

    /// Drop everything (document switched).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Session
// ─────────────────────────────────────────────────────────────────────────────

/// Preview state for the single active document: format selection, debounced
/// regeneration, and the revision-keyed cache.
pub struct PreviewSession {
    registry: FormatRegistry,
    cache: RenderCache,
    debouncer: PreviewDebouncer,
    /// Live preview: regenerate on edit (after quiescence) vs. manual only
    live: bool,
    /// Active format, derived from the document's extension
    format: Option<PreviewFormat>,
}

impl PreviewSession {
    /// Create a session with the default format registry.
    pub fn new(debounce_delay: Duration, live: bool) -> Self {
        Self {
            registry: FormatRegistry::new(),
            cache: RenderCache::new(),
            debouncer: PreviewDebouncer::new(debounce_delay),
            live,
            format: None,
        }
    }

    /// The mutable format registry, for host-registered bindings.
    pub fn registry_mut(&mut self) -> &mut FormatRegistry {
        &mut self.registry
    }

    /// Enable or disable live preview.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    /// Change the debounce interval (from settings).
    pub fn set_debounce_delay(&mut self, delay: Duration) {
        self.debouncer.set_delay(delay);
    }

    /// Active preview format, if the document type has one.
    pub fn format(&self) -> Option<PreviewFormat> {
        self.format
    }

    /// Point the session at a document by extension. Switching format
    /// drops cached output and pending regenerations.
    pub fn set_document_extension(&mut self, extension: Option<&str>) {
        let format = extension.and_then(|ext| self.registry.format_for_extension(ext));
        if format != self.format {
            debug!(
                "Preview format changed to {:?}",
                format.map(|f| f.display_name())
            );
            self.format = format;
            self.cache.clear();
            self.debouncer.reset();
        }
    }

    /// Report an edit producing `revision`. Schedules a debounced
    /// regeneration when live preview is on.
    pub fn note_edit(&mut self, revision: u64, now: Instant) {
        if self.live && self.format.is_some() {
            self.debouncer.note_edit(revision, now);
        }
    }

    /// Manual refresh: regenerate `revision` at the next poll regardless of
    /// live mode or quiescence.
    pub fn refresh(&mut self, revision: u64, now: Instant) {
        if self.format.is_some() {
            self.debouncer.request_now(revision, now);
        }
    }

    /// Poll for a due regeneration; returns the revision to render.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        self.format?;
        self.debouncer.poll(now)
    }

    /// Run the regeneration for `revision` over `source`.
    ///
    /// Returns the outcome if it is still current, or `None` if a newer
    /// edit superseded it (the stale result is discarded, not cached, and
    /// any previously displayed content stays in the cache untouched).
    pub fn regenerate(&mut self, revision: u64, source: &str) -> Option<&RenderOutcome> {
        let format = self.format?;
        let outcome = render(format, source);
        if !self.debouncer.complete(revision) {
            return None;
        }
        self.cache.insert(format, revision, outcome);
        self.cache.get(format, revision)
    }

    /// Cached outcome for the current format at `revision`.
    pub fn current(&self, revision: u64) -> Option<&RenderOutcome> {
        let format = self.format?;
        self.cache.get(format, revision)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
