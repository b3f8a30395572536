//! Bypass rule matching.
//!
//! # Responsibilities
//! - Match path prefixes for framework, API and asset routes
//! - Match paths that look like files (contain a `.`)
//! - Combine rules with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes match with plain `starts_with`, so `/api` also covers `/apiary`
//! - No regex to guarantee O(n) matching

use crate::config::LocaleConfig;

/// Trait for matching request paths against bypass conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches any path containing a `.`, treated as a file request.
///
/// This is a heuristic: a document route such as `/v1.2/page` also matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedPathMatcher;

impl Matcher for DottedPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path.contains('.')
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Build the bypass rules described by the locale configuration.
    pub fn bypass_rules(config: &LocaleConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = config
            .bypass_prefixes
            .iter()
            .map(|prefix| Box::new(PathPrefixMatcher::new(prefix.as_str())) as Box<dyn Matcher>)
            .collect();

        if config.bypass_dotted_paths {
            matchers.push(Box::new(DottedPathMatcher));
        }

        Self::new(matchers)
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}
