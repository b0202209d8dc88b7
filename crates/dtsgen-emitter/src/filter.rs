//! Member-exclusion policy.
//!
//! Exactly one policy is configured per emitter: a caller-supplied
//! predicate or a compiled pattern. Pattern matching is unanchored, so
//! `"priv"` excludes `isPrivate` as well as `private`.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::FilterError;

/// Names matching this pattern are excluded unless configured otherwise.
pub const DEFAULT_IGNORE_MEMBERS: &str = "^_.*";

#[derive(Clone)]
pub enum MemberFilter {
    /// Exclude when the predicate returns `true`.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
    /// Exclude when the pattern matches anywhere in the name.
    Pattern(Regex),
    /// Keep every member.
    None,
}

impl MemberFilter {
    pub fn pattern(pattern: &str) -> Result<Self, FilterError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn excludes(&self, name: &str) -> bool {
        match self {
            Self::Predicate(predicate) => predicate(name),
            Self::Pattern(regex) => regex.is_match(name),
            Self::None => false,
        }
    }
}

impl Default for MemberFilter {
    fn default() -> Self {
        match Regex::new(DEFAULT_IGNORE_MEMBERS) {
            Ok(regex) => Self::Pattern(regex),
            Err(_) => Self::predicate(|name| name.starts_with('_')),
        }
    }
}

impl fmt::Debug for MemberFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("MemberFilter::Predicate(..)"),
            Self::Pattern(regex) => write!(f, "MemberFilter::Pattern({:?})", regex.as_str()),
            Self::None => f.write_str("MemberFilter::None"),
        }
    }
}
