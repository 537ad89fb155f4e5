//! Compiled-pattern cache.
//!
//! A fixed-capacity list of compiled patterns ordered from most- to
//! least-recently used. A hit moves the entry to the front, a miss compiles
//! the pattern and inserts it at the front, evicting the last entry when
//! the list is full.

use crate::compiler::{CompiledPattern, PatternCompiler};
use crate::config::CompileConfig;
use crate::error::{RegexpError, Result};

/// Default cache capacity.
pub const DEFAULT_CACHE_SIZE: usize = 16;

/// A pattern text and everything compiled from it.
#[derive(Debug)]
pub struct CacheEntry {
    pattern: String,
    compiled: CompiledPattern,
}

impl CacheEntry {
    /// Take ownership of `compiled`, copying the pattern text.
    ///
    /// On allocation failure `compiled` is dropped with the error.
    fn new(pattern: &str, compiled: CompiledPattern) -> Result<Self> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(pattern.len())
            .map_err(|source| RegexpError::OutOfMemory { source })?;
        owned.push_str(pattern);
        Ok(Self {
            pattern: owned,
            compiled,
        })
    }

    /// The source pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled matcher and its fast path.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }
}

/// A most-recently-used-first cache of compiled patterns.
///
/// `N` is fixed at compile time. Index 0 holds the most recently used entry.
#[derive(Debug)]
pub struct MatchCache<const N: usize = DEFAULT_CACHE_SIZE> {
    entries: Vec<CacheEntry>,
    compiler: PatternCompiler,
    hits: u64,
    misses: u64,
    failures: u64,
    evictions: u64,
}

impl MatchCache {
    /// Create a cache of the default capacity with default limits.
    ///
    /// # Errors
    ///
    /// Returns [`RegexpError::CacheAllocation`] if the slots cannot be allocated.
    pub fn new() -> Result<Self> {
        Self::with_config(CompileConfig::default())
    }
}

impl<const N: usize> MatchCache<N> {
    /// Create a cache whose compiler uses `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexpError::CacheAllocation`] if the slots cannot be allocated.
    pub fn with_config(config: CompileConfig) -> Result<Self> {
        const { assert!(N > 0, "cache capacity must be non-zero") };

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(N)
            .map_err(|source| RegexpError::CacheAllocation {
                capacity: N,
                source,
            })?;

        Ok(Self {
            entries,
            compiler: PatternCompiler::new(config),
            hits: 0,
            misses: 0,
            failures: 0,
            evictions: 0,
        })
    }

    /// Get the compiled form of `pattern`, compiling it on a miss.
    ///
    /// On success the pattern is at the front of the cache. On failure the
    /// cache is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RegexpError::PatternSyntax`] if the pattern is invalid, or
    /// [`RegexpError::OutOfMemory`] if the new entry cannot be allocated.
    pub fn resolve(&mut self, pattern: &str) -> Result<&CompiledPattern> {
        if let Some(pos) = self.position(pattern) {
            self.hits += 1;
            if pos > 0 {
                self.entries[..=pos].rotate_right(1);
            }
            tracing::trace!(pattern, pos, "cache hit");
            return Ok(&self.entries[0].compiled);
        }

        let entry = self
            .compiler
            .compile(pattern)
            .and_then(|compiled| CacheEntry::new(pattern, compiled))
            .inspect_err(|_| self.failures += 1)?;
        self.misses += 1;

        if self.entries.len() == N {
            if let Some(evicted) = self.entries.pop() {
                self.evictions += 1;
                tracing::debug!(pattern = evicted.pattern(), "cache entry evicted");
            }
        }
        self.entries.insert(0, entry);

        Ok(&self.entries[0].compiled)
    }

    fn position(&self, pattern: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.pattern == pattern)
    }

    /// Check if a pattern is cached, without promoting it.
    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.position(pattern).is_some()
    }

    /// Cached pattern texts, most recently used first.
    pub fn patterns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(CacheEntry::pattern)
    }

    /// Cached entries, most recently used first.
    #[must_use]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached patterns.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The compiler configuration.
    #[must_use]
    pub const fn config(&self) -> &CompileConfig {
        self.compiler.config()
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            capacity: N,
            hits: self.hits,
            misses: self.misses,
            failures: self.failures,
            evictions: self.evictions,
        }
    }
}

/// Statistics about a [`MatchCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of cached patterns.
    pub size: usize,
    /// Maximum number of cached patterns.
    pub capacity: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that compiled and inserted a new entry.
    pub misses: u64,
    /// Lookups whose pattern failed to compile or could not be stored.
    pub failures: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
}

impl CacheStats {
    /// Get the cache hit rate as a ratio (0.0 to 1.0).
    ///
    /// Failed lookups are not counted. Returns 1.0 if no lookups have been
    /// made.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            1.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
