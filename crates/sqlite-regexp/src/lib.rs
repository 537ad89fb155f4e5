//! sqlite-regexp: a `REGEXP` predicate backed by a compiled-pattern cache
//!
//! This crate answers "does string S match pattern P?" for a host query
//! engine. Compiled patterns are kept in a small, fixed-capacity cache
//! ordered by recency, so evaluating one pattern against many rows compiles
//! it once.
//!
//! # Features
//!
//! - **Unicode-aware patterns** compiled with the `regex` crate
//! - **Precise diagnostics** with the byte offset of a syntax error
//! - **Most-recently-used cache** with move-to-front promotion and
//!   least-recently-used eviction
//! - **SQLite registration** via `rusqlite` (feature: `sqlite`, on by default)
//!
//! # Example
//!
//! ```
//! use sqlite_regexp::prelude::*;
//!
//! let mut cache = MatchCache::new()?;
//! assert!(regexp(&mut cache, Some(r"\d+"), Some("order 66"))?);
//! assert_eq!(cache.patterns().next(), Some(r"\d+"));
//! # Ok::<(), RegexpError>(())
//! ```

pub mod cache;
pub mod compiler;
pub mod config;
pub mod error;
pub mod predicate;
pub mod prelude;

/// SQLite function registration.
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cache::{CacheEntry, CacheStats, DEFAULT_CACHE_SIZE, MatchCache};
pub use compiler::{CompiledPattern, LiteralPrefilter, Matcher, PatternCompiler};
pub use config::{CompileConfig, EnvConfig};
pub use error::{Argument, RegexpError, Result};
pub use predicate::{regexp, regexp_bytes};
