//! Language profile registry
//!
//! Maps file extensions to language profiles. New profiles are registered
//! without touching engine code; unknown extensions fall back to the plain
//! text profile (identity pass-through, one plain span per line).

use log::debug;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::profile::LanguageProfile;

// ─────────────────────────────────────────────────────────────────────────────
// Profile Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Extension → profile lookup with a plain-text fallback.
pub struct ProfileRegistry {
    /// Loaded profiles by language name
    profiles: HashMap<String, Arc<LanguageProfile>>,
    /// Extension (lowercase, without dot) → language name
    extension_map: HashMap<String, String>,
    /// Fallback profile for unknown extensions
    plain: Arc<LanguageProfile>,
}

impl ProfileRegistry {
    /// Create a registry pre-loaded with the built-in language profiles.
    pub fn new() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
            extension_map: HashMap::new(),
            plain: Arc::new(LanguageProfile::plain_text()),
        };

        for profile in builtin::all_profiles() {
            registry.register(profile);
        }

        debug!(
            "Profile registry loaded with {} languages",
            registry.profiles.len()
        );
        registry
    }

    /// Create a registry with no built-in profiles (hosts that supply their
    /// own complete set).
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
            extension_map: HashMap::new(),
            plain: Arc::new(LanguageProfile::plain_text()),
        }
    }

    /// Register a profile, claiming its extensions.
    ///
    /// A later registration for an already-claimed extension wins, which is
    /// how a host overrides a built-in profile.
    pub fn register(&mut self, profile: LanguageProfile) {
        let name = profile.name.clone();
        for ext in &profile.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.profiles.insert(name, Arc::new(profile));
    }

    /// Look up the profile for a file extension (without the dot).
    ///
    /// Unknown extensions get the plain text profile; this never fails.
    pub fn profile_for_extension(&self, ext: &str) -> Arc<LanguageProfile> {
        self.extension_map
            .get(&ext.to_lowercase())
            .and_then(|name| self.profiles.get(name))
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.plain))
    }

    /// Look up the profile for a file path.
    pub fn profile_for_path(&self, path: &Path) -> Arc<LanguageProfile> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.profile_for_extension(ext),
            None => Arc::clone(&self.plain),
        }
    }

    /// The plain text fallback profile.
    pub fn plain_profile(&self) -> Arc<LanguageProfile> {
        Arc::clone(&self.plain)
    }

    /// Language name for an extension, `None` if unclaimed.
    pub fn language_for_extension(&self, ext: &str) -> Option<&str> {
        self.extension_map.get(&ext.to_lowercase()).map(|s| s.as_str())
    }

    /// Sorted list of registered language names.
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.profiles.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
