//! Configuration types for sqlite-regexp.
//!
//! Only the pattern engine is configurable. The cache capacity is a
//! compile-time constant on [`MatchCache`](crate::cache::MatchCache).

pub mod env;
pub mod file;

use serde::Deserialize;

pub use env::EnvConfig;

/// Default compiled program size limit (10 MiB, the `regex` default).
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default lazy DFA cache size limit (2 MiB, the `regex` default).
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Default nesting depth limit for the pattern parser.
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// Default backtracking step limit for patterns that need a backtracker.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Configuration for the pattern compiler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Upper bound on the size of a compiled pattern, in bytes.
    pub size_limit: usize,

    /// Upper bound on the lazy DFA cache used while matching, in bytes.
    pub dfa_size_limit: usize,

    /// Maximum nesting depth of groups and repetitions.
    pub nest_limit: u32,

    /// Maximum backtracking steps per match for look-around, backreference
    /// and possessive patterns.
    pub backtrack_limit: usize,

    /// Build a substring fast path for purely literal patterns.
    pub literal_prefilter: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            literal_prefilter: true,
        }
    }
}

impl CompileConfig {
    /// Create a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiled size limit.
    #[must_use]
    pub const fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Set the lazy DFA size limit.
    #[must_use]
    pub const fn dfa_size_limit(mut self, bytes: usize) -> Self {
        self.dfa_size_limit = bytes;
        self
    }

    /// Set the nesting depth limit.
    #[must_use]
    pub const fn nest_limit(mut self, depth: u32) -> Self {
        self.nest_limit = depth;
        self
    }

    /// Set the backtracking step limit.
    #[must_use]
    pub const fn backtrack_limit(mut self, steps: usize) -> Self {
        self.backtrack_limit = steps;
        self
    }

    /// Enable or disable the literal fast path.
    #[must_use]
    pub const fn literal_prefilter(mut self, enabled: bool) -> Self {
        self.literal_prefilter = enabled;
        self
    }
}
