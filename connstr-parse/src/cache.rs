//! In-process cache of parsed connection strings.
//!
//! Applications tend to parse the same handful of strings over and over,
//! once per connection open. [`OptionsCache`] parses each distinct
//! `(dialect, string)` once and hands out shared [`ConnectionOptions`].
//!
//! ```rust
//! use std::sync::Arc;
//! use connstr_parse::{Dialect, OptionsCache};
//!
//! let cache = OptionsCache::new();
//! let first = cache.get_or_parse("Server=db;Database=app", Dialect::sql_server()).unwrap();
//! let second = cache.get_or_parse("Server=db;Database=app", Dialect::sql_server()).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use smol_str::SmolStr;
use tracing::trace;

use crate::dialect::Dialect;
use crate::error::SyntaxError;
use crate::options::ConnectionOptions;

type Entries = HashMap<SmolStr, HashMap<String, Arc<ConnectionOptions>>>;

/// Cache of parsed options keyed by dialect name and source string.
///
/// Two dialects with the same name share entries. Strings that fail to parse
/// are not cached.
#[derive(Debug, Default)]
pub struct OptionsCache {
    entries: RwLock<Entries>,
    stats: RwLock<CacheStats>,
}

/// Statistics for an [`OptionsCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of strings currently cached.
    pub cached_count: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl OptionsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached options for `input` or parse and cache them.
    pub fn get_or_parse(
        &self,
        input: &str,
        dialect: &Dialect,
    ) -> Result<Arc<ConnectionOptions>, SyntaxError> {
        if let Some(options) = self.lookup(input, dialect) {
            self.stats.write().hits += 1;
            trace!(dialect = dialect.name(), "options cache hit");
            return Ok(options);
        }

        self.stats.write().misses += 1;
        let options = Arc::new(ConnectionOptions::parse(input, dialect)?);

        // Another thread may have raced us here; keep the first entry.
        let options = Arc::clone(
            self.entries
                .write()
                .entry(SmolStr::new(dialect.name()))
                .or_default()
                .entry(input.to_string())
                .or_insert(options),
        );
        trace!(dialect = dialect.name(), "options cache miss");
        Ok(options)
    }

    /// Check if `input` is cached for `dialect`.
    pub fn contains(&self, input: &str, dialect: &Dialect) -> bool {
        self.lookup(input, dialect).is_some()
    }

    /// Drop one entry.
    pub fn remove(&self, input: &str, dialect: &Dialect) -> bool {
        self.entries
            .write()
            .get_mut(dialect.name())
            .is_some_and(|strings| strings.remove(input).is_some())
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.read().clone();
        stats.cached_count = self.len();
        stats
    }

    /// Number of cached strings across all dialects.
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, input: &str, dialect: &Dialect) -> Option<Arc<ConnectionOptions>> {
        self.entries
            .read()
            .get(dialect.name())
            .and_then(|strings| strings.get(input))
            .map(Arc::clone)
    }
}
