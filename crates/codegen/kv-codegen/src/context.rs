//! Per-function renaming of source identifiers

use crate::error::LowerError;
use kv_suggest::suggest;
use rustc_hash::{FxHashMap, FxHashSet};

/// Maps source identifiers to emitted identifiers within one lifted function
///
/// A context never looks outside itself: a lifted function only sees the
/// names bound while lowering it.
#[derive(Debug, Clone, Default)]
pub struct RenamingContext {
    names: FxHashMap<String, String>,
    emitted: FxHashSet<String>,
}

impl RenamingContext {
    /// An empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct emitted names bound so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    /// Whether nothing has been bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }

    /// Emitted name that binding `base` now would receive
    ///
    /// `base` itself when unused, otherwise `base` followed by the current
    /// binding count, counting upward past any name already taken.
    #[must_use]
    pub fn fresh(&self, base: &str) -> String {
        if !self.emitted.contains(base) {
            return base.to_string();
        }

        let mut count = self.len();
        loop {
            let candidate = format!("{base}{count}");
            if !self.emitted.contains(&candidate) {
                return candidate;
            }
            count += 1;
        }
    }

    /// Binds `base` to a fresh emitted name and returns it
    ///
    /// Rebinding a base name redirects later lookups to the newest name.
    pub fn bind(&mut self, base: &str) -> String {
        let emitted = self.fresh(base);
        self.emitted.insert(emitted.clone());
        self.names.insert(base.to_string(), emitted.clone());
        emitted
    }

    /// Emitted name for `name`
    ///
    /// # Errors
    ///
    /// Returns [`LowerError::UnresolvedSymbol`] if `name` was never bound here.
    pub fn get(&self, name: &str) -> Result<&str, LowerError> {
        self.names
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| LowerError::UnresolvedSymbol {
                name: name.to_string(),
                suggestions: suggest(name, self.names.keys().map(String::as_str)),
            })
    }
}
