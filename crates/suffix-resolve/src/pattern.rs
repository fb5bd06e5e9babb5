//! Path eligibility predicates.
//!
//! Options accept either a literal predicate function or a list of regular
//! expressions. Both forms are resolved here, once, into a [`PatternSet`]
//! that the engine queries on every request.

use crate::error::Error;
use regex_lite::Regex;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied predicate over a path string.
pub type PathPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A set of path patterns compiled into a single predicate.
///
/// An empty pattern list matches nothing: an empty exclude set excludes
/// nothing, and an empty include set includes nothing.
pub enum PatternSet {
    /// Delegate to the caller's function as-is.
    Predicate(PathPredicate),
    /// True iff at least one regex in the list matches.
    Patterns(Vec<Regex>),
}

impl PatternSet {
    /// Compile a list of regex sources.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] naming the first pattern that
    /// fails to compile.
    pub fn compile<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            compiled.push(regex);
        }
        Ok(Self::Patterns(compiled))
    }

    /// Wrap an already-compiled regex list.
    #[must_use]
    pub fn regexes(patterns: Vec<Regex>) -> Self {
        Self::Patterns(patterns)
    }

    /// Wrap a literal predicate function.
    #[must_use]
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// A set that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::Patterns(Vec::new())
    }

    /// Test a path against the set. Pure and synchronous.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Predicate(f) => f(path),
            Self::Patterns(patterns) => patterns.iter().any(|p| p.is_match(path)),
        }
    }
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("PatternSet::Predicate(..)"),
            Self::Patterns(patterns) => f
                .debug_tuple("PatternSet::Patterns")
                .field(&patterns.iter().map(Regex::as_str).collect::<Vec<_>>())
                .finish(),
        }
    }
}
