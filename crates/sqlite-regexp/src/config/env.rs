//! Environment-based configuration.

use super::CompileConfig;
use crate::error::{RegexpError, Result};

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "REGEXP";

/// Common environment variables (without prefix).
pub mod vars {
    /// Compiled size limit in bytes.
    pub const SIZE_LIMIT: &str = "SIZE_LIMIT";
    /// Lazy DFA size limit in bytes.
    pub const DFA_SIZE_LIMIT: &str = "DFA_SIZE_LIMIT";
    /// Parser nesting limit.
    pub const NEST_LIMIT: &str = "NEST_LIMIT";
    /// Backtracking step limit.
    pub const BACKTRACK_LIMIT: &str = "BACKTRACK_LIMIT";
    /// Literal fast path switch.
    pub const LITERAL_PREFILTER: &str = "LITERAL_PREFILTER";
}

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Environment variable reader.
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    lookup: Lookup,
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a reader over the process environment.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Create a reader over an arbitrary variable source.
    #[must_use]
    pub fn with_lookup(
        prefix: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String> + 'static,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            lookup: Box::new(lookup),
        }
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(&self.var_name(name))
    }

    /// Get a parsed value, failing on a value that does not parse.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.get(name)
            .map(|v| {
                v.trim().parse().map_err(|_| {
                    RegexpError::config(format!("{}={v:?} is not valid", self.var_name(name)))
                })
            })
            .transpose()
    }

    /// Get a boolean value.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(|v| {
            matches!(
                v.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on" | "enabled"
            )
        })
    }

    /// Apply any set variables on top of `base`.
    pub fn apply(&self, mut base: CompileConfig) -> Result<CompileConfig> {
        if let Some(v) = self.parse(vars::SIZE_LIMIT)? {
            base.size_limit = v;
        }
        if let Some(v) = self.parse(vars::DFA_SIZE_LIMIT)? {
            base.dfa_size_limit = v;
        }
        if let Some(v) = self.parse(vars::NEST_LIMIT)? {
            base.nest_limit = v;
        }
        if let Some(v) = self.parse(vars::BACKTRACK_LIMIT)? {
            base.backtrack_limit = v;
        }
        if let Some(v) = self.bool(vars::LITERAL_PREFILTER) {
            base.literal_prefilter = v;
        }
        Ok(base)
    }
}

impl CompileConfig {
    /// Defaults overridden by `REGEXP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        EnvConfig::default().apply(Self::default())
    }
}
