//! Error types for sqlite-regexp.
//!
//! Every message carries the `[REGEXP]` prefix so that errors surfaced
//! through a host query engine are attributable to this function.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Which argument of the predicate was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// The pattern (first) argument.
    Pattern,
    /// The subject (second) argument.
    Subject,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => f.write_str("no regexp"),
            Self::Subject => f.write_str("no string"),
        }
    }
}

/// The main error type for sqlite-regexp operations.
#[derive(Debug, Error)]
pub enum RegexpError {
    /// A predicate argument was NULL.
    #[error("[REGEXP] {0}")]
    MissingArgument(Argument),

    /// The pattern text is not a valid regular expression.
    #[error("[REGEXP] {pattern}: {message} (offset {offset})")]
    PatternSyntax {
        /// The rejected pattern text.
        pattern: String,
        /// Diagnostic from the pattern parser.
        message: String,
        /// Byte offset of the error within the pattern.
        offset: usize,
    },

    /// The cache slots could not be allocated.
    #[error("[REGEXP] cache allocation failed for {capacity} entries: {source}")]
    CacheAllocation {
        /// Requested number of slots.
        capacity: usize,
        /// The underlying allocation failure.
        #[source]
        source: TryReserveError,
    },

    /// Copying the pattern text into a new cache entry failed.
    #[error("[REGEXP] out of memory copying pattern text: {source}")]
    OutOfMemory {
        /// The underlying allocation failure.
        #[source]
        source: TryReserveError,
    },

    /// Invalid configuration.
    #[error("[REGEXP] invalid configuration: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The host database rejected the function registration.
    #[cfg(feature = "sqlite")]
    #[error("[REGEXP] sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl RegexpError {
    /// Create a missing-argument error.
    #[must_use]
    pub const fn missing(argument: Argument) -> Self {
        Self::MissingArgument(argument)
    }

    /// Create a pattern syntax error.
    pub fn pattern_syntax(
        pattern: impl Into<String>,
        message: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self::PatternSyntax {
            pattern: pattern.into(),
            message: message.into(),
            offset,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a missing-argument error.
    #[must_use]
    pub const fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument(_))
    }

    /// Check if this is a pattern syntax error.
    #[must_use]
    pub const fn is_syntax_error(&self) -> bool {
        matches!(self, Self::PatternSyntax { .. })
    }

    /// Byte offset of a pattern syntax error, if this is one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::PatternSyntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Check if this error aborts initialization rather than a single call.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::CacheAllocation { .. } | Self::Config { .. } => true,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => true,
            _ => false,
        }
    }
}

/// Result type for sqlite-regexp operations.
pub type Result<T> = std::result::Result<T, RegexpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_messages() {
        assert_eq!(
            RegexpError::missing(Argument::Pattern).to_string(),
            "[REGEXP] no regexp"
        );
        assert_eq!(
            RegexpError::missing(Argument::Subject).to_string(),
            "[REGEXP] no string"
        );
    }

    #[test]
    fn syntax_error_display() {
        let err = RegexpError::pattern_syntax("(", "unclosed group", 0);
        assert_eq!(err.to_string(), "[REGEXP] (: unclosed group (offset 0)");
        assert!(err.is_syntax_error());
        assert_eq!(err.offset(), Some(0));
        assert!(!err.is_fatal());
    }

    #[test]
    fn allocation_failure_is_fatal() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = RegexpError::CacheAllocation {
            capacity: 16,
            source,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("[REGEXP] cache allocation failed"));
        assert_eq!(err.offset(), None);
    }
}
