//! Convenient re-exports for common sqlite-regexp usage.
//!
//! ```
//! use sqlite_regexp::prelude::*;
//!
//! let mut cache: MatchCache<4> = MatchCache::with_config(CompileConfig::default())?;
//! assert!(!regexp(&mut cache, Some("^b"), Some("abc"))?);
//! # Ok::<(), RegexpError>(())
//! ```

pub use crate::cache::{CacheStats, MatchCache};
pub use crate::compiler::CompiledPattern;
pub use crate::config::CompileConfig;
pub use crate::error::{RegexpError, Result};
pub use crate::predicate::{regexp, regexp_bytes};
