//! SQLite integration.
//!
//! Registers `REGEXP(pattern, subject)` on a [`rusqlite::Connection`], which
//! also enables the `subject REGEXP pattern` operator. Each registration owns
//! one [`MatchCache`]; it lives inside the function and is dropped when the
//! connection closes.
//!
//! # Example
//!
//! ```
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory()?;
//! sqlite_regexp::sqlite::register(&conn)?;
//!
//! let matched: bool = conn.query_row("SELECT 'abc123' REGEXP '[0-9]+'", [], |row| row.get(0))?;
//! assert!(matched);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::borrow::Cow;
use std::panic::AssertUnwindSafe;

use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::cache::{DEFAULT_CACHE_SIZE, MatchCache};
use crate::config::CompileConfig;
use crate::error::{Argument, RegexpError, Result};
use crate::predicate::regexp_bytes;

/// Name of the registered SQL function.
pub const FUNCTION_NAME: &str = "REGEXP";

/// Register `REGEXP` with a default-sized cache and default limits.
///
/// # Errors
///
/// Returns an error if the cache cannot be allocated or SQLite rejects
/// the registration.
pub fn register(conn: &Connection) -> Result<()> {
    register_with::<DEFAULT_CACHE_SIZE>(conn, CompileConfig::default())
}

/// Register `REGEXP` with an `N`-entry cache and the given limits.
///
/// Registering again replaces the previous function and drops its cache.
///
/// # Errors
///
/// Returns an error if the cache cannot be allocated or SQLite rejects
/// the registration.
pub fn register_with<const N: usize>(conn: &Connection, config: CompileConfig) -> Result<()> {
    // A panic inside a match leaves at worst a valid, partially reordered cache.
    let mut cache = AssertUnwindSafe(MatchCache::<N>::with_config(config)?);

    conn.create_scalar_function(
        FUNCTION_NAME,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        move |ctx| {
            let pattern = text_arg(ctx, 0);
            let subject = text_arg(ctx, 1);
            evaluate(&mut *cache, pattern.as_deref(), subject.as_deref())
                .map_err(|e| rusqlite::Error::UserFunctionError(Box::new(e)))
        },
    )?;

    tracing::debug!(capacity = N, "registered {FUNCTION_NAME} function");
    Ok(())
}

/// Run the predicate over raw argument bytes.
///
/// The pattern must be UTF-8; a subject that is not is reported as no match.
fn evaluate<const N: usize>(
    cache: &mut MatchCache<N>,
    pattern: Option<&[u8]>,
    subject: Option<&[u8]>,
) -> Result<bool> {
    let pattern = pattern.ok_or(RegexpError::missing(Argument::Pattern))?;
    let subject = subject.ok_or(RegexpError::missing(Argument::Subject))?;
    let pattern = std::str::from_utf8(pattern).map_err(|err| {
        RegexpError::pattern_syntax(
            String::from_utf8_lossy(pattern),
            "invalid UTF-8",
            err.valid_up_to(),
        )
    })?;
    regexp_bytes(cache, Some(pattern), Some(subject))
}

/// Read argument `idx` as text bytes the way SQLite coerces values to text.
fn text_arg<'a>(ctx: &'a Context<'_>, idx: usize) -> Option<Cow<'a, [u8]>> {
    match ctx.get_raw(idx) {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(Cow::Owned(i.to_string().into_bytes())),
        ValueRef::Real(f) => Some(Cow::Owned(format_real(f).into_bytes())),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(Cow::Borrowed(bytes)),
    }
}

/// Render a REAL as SQLite does (`%!.15g`): 15 significant digits, and
/// always a decimal point in the mantissa.
fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    // Rounded to 15 significant digits; the exponent reflects the rounding.
    let scientific = format!("{value:.14e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..15).contains(&exponent) {
        let decimals = usize::try_from(14 - exponent).unwrap_or(0);
        with_decimal_point(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            with_decimal_point(mantissa.to_string()),
            exponent.unsigned_abs()
        )
    }
}

/// Drop trailing zeros after the point, keeping at least one digit there.
fn with_decimal_point(mut digits: String) -> String {
    if digits.contains('.') {
        let kept = digits.trim_end_matches('0').len();
        digits.truncate(kept);
        if digits.ends_with('.') {
            digits.push('0');
        }
    } else {
        digits.push_str(".0");
    }
    digits
}
