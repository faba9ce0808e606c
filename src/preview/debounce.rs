//! Preview regeneration debouncing
//!
//! Rapid edits coalesce into a single regeneration: the debouncer fires
//! only after a quiescence interval has passed since the last edit. At most
//! one regeneration is in flight per document; when a newer edit arrives
//! before an in-flight regeneration completes, the completed result is
//! discarded and the newer revision is scheduled (last-writer-wins, results
//! are never merged).
//!
//! The debouncer is driven by explicit `Instant`s rather than an internal
//! timer, matching an immediate-mode host that polls once per frame and
//! keeping every code path deterministic under test.

use log::debug;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Debouncer
// ─────────────────────────────────────────────────────────────────────────────

/// Coalesces edit notifications into deferred regeneration requests.
#[derive(Debug)]
pub struct PreviewDebouncer {
    /// Quiescence interval after the last edit
    delay: Duration,
    /// Latest revision reported and the time it becomes due
    pending: Option<(u64, Instant)>,
    /// Revision currently being regenerated, if any
    in_flight: Option<u64>,
}

impl PreviewDebouncer {
    /// Create a debouncer with the given quiescence interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            in_flight: None,
        }
    }

    /// Change the quiescence interval (from settings).
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record an edit producing `revision` at time `now`.
    ///
    /// A newer edit always supersedes the pending one and restarts the
    /// quiescence window.
    pub fn note_edit(&mut self, revision: u64, now: Instant) {
        self.pending = Some((revision, now + self.delay));
    }

    /// Request an immediate regeneration of `revision` (manual refresh),
    /// bypassing the quiescence wait.
    pub fn request_now(&mut self, revision: u64, now: Instant) {
        self.pending = Some((revision, now));
    }

    /// Poll for a due regeneration.
    ///
    /// Returns the revision to regenerate once the interval has elapsed and
    /// no other regeneration is in flight. The returned revision is marked
    /// in flight; the caller reports back through
    /// [`complete`](Self::complete).
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        let (revision, due) = self.pending?;
        if now < due {
            return None;
        }
        self.pending = None;
        self.in_flight = Some(revision);
        Some(revision)
    }

    /// Report a finished regeneration of `revision`.
    ///
    /// Returns `true` if the result is still current and should be
    /// displayed, `false` if a newer edit superseded it and the result must
    /// be discarded.
    pub fn complete(&mut self, revision: u64) -> bool {
        if self.in_flight == Some(revision) {
            self.in_flight = None;
        }
        match self.pending {
            Some((newer, _)) if newer > revision => {
                debug!(
                    "Discarding superseded preview for revision {} (newer: {})",
                    revision, newer
                );
                false
            }
            _ => true,
        }
    }

    /// Drop all pending and in-flight work (document closed or switched).
    pub fn reset(&mut self) {
        self.pending = None;
        self.in_flight = None;
    }

    /// True if a regeneration is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn debouncer() -> (PreviewDebouncer, Instant) {
        (PreviewDebouncer::new(DELAY), Instant::now())
    }

    #[test]
    fn test_waits_for_quiescence() {
        let (mut d, t0) = debouncer();
        d.note_edit(1, t0);

        assert_eq!(d.poll(t0), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(d.poll(t0 + DELAY), Some(1));
    }

    #[test]
    fn test_rapid_edits_coalesce_to_one_regeneration() {
        let (mut d, t0) = debouncer();
        // Five edits inside the interval
        for i in 1..=5 {
            d.note_edit(i, t0 + Duration::from_millis(i * 50));
        }

        let last_edit = t0 + Duration::from_millis(250);
        assert_eq!(d.poll(last_edit + Duration::from_millis(100)), None);

        // Exactly one regeneration fires, for the final revision
        let due = last_edit + DELAY;
        assert_eq!(d.poll(due), Some(5));
        assert!(d.complete(5));
        assert_eq!(d.poll(due + DELAY), None);
    }

    #[test]
    fn test_each_edit_restarts_the_window() {
        let (mut d, t0) = debouncer();
        d.note_edit(1, t0);
        // A second edit 200ms later pushes the deadline out
        d.note_edit(2, t0 + Duration::from_millis(200));

        assert_eq!(d.poll(t0 + DELAY), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(200) + DELAY), Some(2));
    }

    #[test]
    fn test_at_most_one_in_flight() {
        let (mut d, t0) = debouncer();
        d.note_edit(1, t0);
        assert_eq!(d.poll(t0 + DELAY), Some(1));
        assert!(d.is_in_flight());

        // A new edit arrives while regeneration 1 runs; nothing new fires
        d.note_edit(2, t0 + DELAY);
        assert_eq!(d.poll(t0 + DELAY * 3), None);
    }

    #[test]
    fn test_superseded_result_discarded() {
        let (mut d, t0) = debouncer();
        d.note_edit(1, t0);
        assert_eq!(d.poll(t0 + DELAY), Some(1));

        // Revision 2 lands while 1 is in flight: 1's result is stale
        d.note_edit(2, t0 + DELAY);
        assert!(!d.complete(1));

        // The newer revision then regenerates normally
        assert_eq!(d.poll(t0 + DELAY * 2), Some(2));
        assert!(d.complete(2));
    }

    #[test]
    fn test_manual_refresh_bypasses_wait() {
        let (mut d, t0) = debouncer();
        d.request_now(7, t0);
        assert_eq!(d.poll(t0), Some(7));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut d, t0) = debouncer();
        d.note_edit(1, t0);
        assert_eq!(d.poll(t0 + DELAY), Some(1));
        d.reset();
        assert!(!d.is_in_flight());
        assert_eq!(d.poll(t0 + DELAY * 2), None);
    }
}
