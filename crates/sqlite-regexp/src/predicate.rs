//! The `REGEXP` predicate, independent of any host.

use crate::cache::MatchCache;
use crate::error::{Argument, RegexpError, Result};

/// Evaluate `subject REGEXP pattern`.
///
/// Returns `true` if `pattern` matches anywhere in `subject`. Either argument
/// being `None` (SQL `NULL`) is an error.
///
/// # Errors
///
/// Returns [`RegexpError::MissingArgument`] for an absent argument, or the
/// error from [`MatchCache::resolve`] if the pattern cannot be compiled.
///
/// # Example
///
/// ```
/// use sqlite_regexp::{MatchCache, regexp};
///
/// let mut cache = MatchCache::new()?;
/// assert!(regexp(&mut cache, Some("[0-9]+"), Some("abc123"))?);
/// assert!(!regexp(&mut cache, Some("[0-9]+"), Some("abc"))?);
/// # Ok::<(), sqlite_regexp::RegexpError>(())
/// ```
pub fn regexp<const N: usize>(
    cache: &mut MatchCache<N>,
    pattern: Option<&str>,
    subject: Option<&str>,
) -> Result<bool> {
    let pattern = pattern.ok_or(RegexpError::missing(Argument::Pattern))?;
    let subject = subject.ok_or(RegexpError::missing(Argument::Subject))?;

    let matched = cache.resolve(pattern)?.is_match(subject);
    tracing::trace!(pattern, matched, "regexp evaluated");
    Ok(matched)
}

/// Evaluate `subject REGEXP pattern` for a subject given as raw bytes.
///
/// The pattern is resolved exactly as in [`regexp`]. A subject that is not
/// valid UTF-8 cannot match and yields `false`.
///
/// # Errors
///
/// Same as [`regexp`].
pub fn regexp_bytes<const N: usize>(
    cache: &mut MatchCache<N>,
    pattern: Option<&str>,
    subject: Option<&[u8]>,
) -> Result<bool> {
    let pattern = pattern.ok_or(RegexpError::missing(Argument::Pattern))?;
    let subject = subject.ok_or(RegexpError::missing(Argument::Subject))?;

    let compiled = cache.resolve(pattern)?;
    match std::str::from_utf8(subject) {
        Ok(text) => {
            let matched = compiled.is_match(text);
            tracing::trace!(pattern, matched, "regexp evaluated");
            Ok(matched)
        }
        Err(err) => {
            tracing::debug!(
                pattern,
                valid_up_to = err.valid_up_to(),
                "subject is not valid UTF-8, no match"
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        let mut cache = MatchCache::new().unwrap();
        assert!(regexp(&mut cache, Some("[0-9]+"), Some("abc123")).unwrap());
        assert!(!regexp(&mut cache, Some("[0-9]+"), Some("abc")).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn null_pattern_checked_first() {
        let mut cache = MatchCache::new().unwrap();
        let err = regexp(&mut cache, None, None).unwrap_err();
        assert_eq!(err.to_string(), "[REGEXP] no regexp");
    }

    #[test]
    fn null_subject_does_not_compile() {
        let mut cache = MatchCache::new().unwrap();
        let err = regexp(&mut cache, Some("a"), None).unwrap_err();
        assert_eq!(err.to_string(), "[REGEXP] no string");
        assert!(cache.is_empty());
    }

    #[test]
    fn invalid_utf8_subject_is_no_match() {
        let mut cache = MatchCache::new().unwrap();
        assert!(!regexp_bytes(&mut cache, Some("a"), Some(b"a\xFF".as_slice())).unwrap());
        assert!(regexp_bytes(&mut cache, Some("a"), Some(b"xa".as_slice())).unwrap());
        // the pattern is still compiled and cached
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn bytes_form_checks_arguments_in_order() {
        let mut cache = MatchCache::new().unwrap();
        let err = regexp_bytes(&mut cache, None, Some(b"\xFF".as_slice())).unwrap_err();
        assert_eq!(err.to_string(), "[REGEXP] no regexp");
        let err = regexp_bytes(&mut cache, Some("("), Some(b"\xFF".as_slice())).unwrap_err();
        assert!(err.is_syntax_error());
        let err = regexp_bytes(&mut cache, Some("a"), None).unwrap_err();
        assert_eq!(err.to_string(), "[REGEXP] no string");
    }

    #[test]
    fn invalid_pattern() {
        let mut cache = MatchCache::new().unwrap();
        let err = regexp(&mut cache, Some("("), Some("x")).unwrap_err();
        assert!(err.to_string().contains("offset"));
        assert!(cache.is_empty());
    }
}
