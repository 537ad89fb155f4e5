//! Pattern compilation.
//!
//! Patterns are parsed with `regex-syntax` first so that a rejected pattern
//! reports the parser's diagnostic and the byte offset where it applies.
//! Accepted patterns are compiled into a [`regex::Regex`] with Unicode mode
//! on, so `\w`, `\d` and friends are Unicode-aware.
//!
//! Look-around, backreferences and possessive quantifiers are outside what
//! the finite-automaton engine supports. Patterns using them are compiled
//! with [`fancy_regex`] instead, behind the same [`CompiledPattern`].

use regex::{Regex, RegexBuilder};
use regex_syntax::ast::{self, Ast, RepetitionKind};
use regex_syntax::hir::translate::TranslatorBuilder;
use regex_syntax::hir::{Hir, HirKind, Literal};

use crate::config::CompileConfig;
use crate::error::{RegexpError, Result};

/// Substring fast path for patterns that are a single plain literal.
///
/// Derived from the parsed pattern; when present, matching is a substring
/// search and never disagrees with the compiled regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralPrefilter {
    needle: Box<str>,
}

impl LiteralPrefilter {
    /// Build a prefilter when `hir` is one literal.
    fn from_hir(hir: &Hir) -> Option<Self> {
        match hir.kind() {
            HirKind::Literal(Literal(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .map(|needle| Self {
                    needle: needle.into(),
                }),
            _ => None,
        }
    }

    /// The literal being searched for.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Check whether `subject` contains the literal.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        subject.contains(&*self.needle)
    }
}

/// The engine a pattern was compiled with.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Finite-automaton engine with linear-time search.
    Basic(Regex),
    /// Backtracking engine for look-around, backreferences and possessive
    /// quantifiers.
    Fancy(fancy_regex::Regex),
}

impl Matcher {
    /// Check whether the pattern matches anywhere in `subject`.
    ///
    /// A backtracking search that hits the configured step limit counts as
    /// no match.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        match self {
            Self::Basic(regex) => regex.is_match(subject),
            Self::Fancy(regex) => regex.is_match(subject).unwrap_or_else(|err| {
                tracing::warn!(pattern = regex.as_str(), %err, "match aborted, reporting no match");
                false
            }),
        }
    }

    /// Check if this is the backtracking engine.
    #[must_use]
    pub const fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }
}

/// A compiled pattern: the matcher plus its optional fast path.
///
/// Both halves are owned together and released together.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    matcher: Matcher,
    prefilter: Option<LiteralPrefilter>,
}

impl CompiledPattern {
    /// The compiled matcher.
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The optimization artifact, if one could be built.
    #[must_use]
    pub const fn prefilter(&self) -> Option<&LiteralPrefilter> {
        self.prefilter.as_ref()
    }

    /// Check whether the pattern matches anywhere in `subject`.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        match &self.prefilter {
            Some(prefilter) => prefilter.is_match(subject),
            None => self.matcher.is_match(subject),
        }
    }
}

/// Turns pattern text into [`CompiledPattern`]s.
#[derive(Debug, Clone, Default)]
pub struct PatternCompiler {
    config: CompileConfig,
}

impl PatternCompiler {
    /// Create a compiler with the given limits.
    #[must_use]
    pub const fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexpError::PatternSyntax`] if the pattern does not parse
    /// or its compiled form exceeds the configured size limit.
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        let parsed = ast::parse::ParserBuilder::new()
            .nest_limit(self.config.nest_limit)
            .build()
            .parse(pattern);
        let ast = match parsed {
            Ok(ast) if has_possessive(&ast) => return self.compile_fancy(pattern),
            Ok(ast) => ast,
            Err(err) if needs_backtracking(err.kind()) => return self.compile_fancy(pattern),
            Err(err) => {
                return Err(rejected(
                    pattern,
                    err.kind().to_string(),
                    err.span().start.offset,
                ));
            }
        };

        let hir = TranslatorBuilder::new()
            .unicode(true)
            .build()
            .translate(pattern, &ast)
            .map_err(|err| rejected(pattern, err.kind().to_string(), err.span().start.offset))?;

        let regex = RegexBuilder::new(pattern)
            .unicode(true)
            .nest_limit(self.config.nest_limit)
            .size_limit(self.config.size_limit)
            .dfa_size_limit(self.config.dfa_size_limit)
            .build()
            .map_err(|err| {
                let message = match err {
                    regex::Error::CompiledTooBig(limit) => {
                        format!("compiled pattern exceeds size limit of {limit} bytes")
                    }
                    other => other.to_string(),
                };
                rejected(pattern, message, 0)
            })?;

        let prefilter = if self.config.literal_prefilter {
            LiteralPrefilter::from_hir(&hir)
        } else {
            None
        };

        tracing::debug!(
            pattern,
            prefilter = prefilter.is_some(),
            "pattern compiled"
        );
        Ok(CompiledPattern {
            matcher: Matcher::Basic(regex),
            prefilter,
        })
    }

    fn compile_fancy(&self, pattern: &str) -> Result<CompiledPattern> {
        let regex = fancy_regex::RegexBuilder::new(pattern)
            .backtrack_limit(self.config.backtrack_limit)
            .delegate_size_limit(self.config.size_limit)
            .delegate_dfa_size_limit(self.config.dfa_size_limit)
            .build()
            .map_err(|err| match err {
                fancy_regex::Error::ParseError(offset, kind) => {
                    rejected(pattern, kind.to_string(), offset)
                }
                other => rejected(pattern, other.to_string(), 0),
            })?;

        tracing::debug!(pattern, "pattern compiled with backtracking engine");
        Ok(CompiledPattern {
            matcher: Matcher::Fancy(regex),
            prefilter: None,
        })
    }
}

fn rejected(pattern: &str, message: String, offset: usize) -> RegexpError {
    tracing::debug!(pattern, offset, %message, "pattern rejected");
    RegexpError::pattern_syntax(pattern, message, offset)
}

/// Parse failures that the backtracking engine can handle.
const fn needs_backtracking(kind: &ast::ErrorKind) -> bool {
    matches!(
        kind,
        ast::ErrorKind::UnsupportedLookAround | ast::ErrorKind::UnsupportedBackreference
    )
}

/// Find `x++`, `x*+`, `x?+`, `x{n}+`: a `+` applied directly to a repetition.
///
/// `regex-syntax` reads these as nested greedy repetitions, which matches
/// more than the possessive form does.
fn has_possessive(ast: &Ast) -> bool {
    match ast {
        Ast::Repetition(rep) => {
            let possessive = rep.greedy
                && matches!(rep.op.kind, RepetitionKind::OneOrMore)
                && matches!(*rep.ast, Ast::Repetition(_));
            possessive || has_possessive(&rep.ast)
        }
        Ast::Group(group) => has_possessive(&group.ast),
        Ast::Alternation(alt) => alt.asts.iter().any(has_possessive),
        Ast::Concat(concat) => concat.asts.iter().any(has_possessive),
        _ => false,
    }
}
