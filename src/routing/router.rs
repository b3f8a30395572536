//! Locale routing decisions.
//!
//! # Responsibilities
//! - Decide whether a request needs locale handling at all
//! - Detect an existing locale prefix
//! - Resolve the best locale (cookie, then Accept-Language, then default)
//! - Build the locale-prefixed redirect target
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Pure: no I/O, no side effects; the HTTP layer emits the redirect
//! - The cookie is only read here, never written

use std::sync::Arc;

use axum::http::header::ACCEPT_LANGUAGE;
use url::form_urlencoded;

use crate::config::LocaleConfig;
use crate::http::request::IncomingRequest;
use crate::locale::{
    parse_accept_language, BestFitMatcher, Locale, LocaleMatcher, LocaleSet, LocaleSetError,
};
use crate::routing::matcher::{AnyMatcher, Matcher};

/// Why a request is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough<'a> {
    /// Framework, API, asset or file request.
    Bypassed,
    /// Already carries this locale's prefix.
    Prefixed(&'a Locale),
}

/// Result of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<'a> {
    Continue(PassThrough<'a>),
    /// Path and query of the locale-prefixed equivalent URL.
    RedirectTo(String),
}

impl RouteOutcome<'_> {
    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteOutcome::Continue(PassThrough::Bypassed) => "bypass",
            RouteOutcome::Continue(PassThrough::Prefixed(_)) => "prefixed",
            RouteOutcome::RedirectTo(_) => "redirect",
        }
    }
}

/// Ensures every document request carries an explicit locale prefix.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    locales: Arc<LocaleSet>,
    bypass: Arc<AnyMatcher>,
    cookie_name: String,
    matcher: Arc<dyn LocaleMatcher>,
}

impl LocaleRouter {
    /// Build a router over an existing locale set.
    pub fn new(locales: Arc<LocaleSet>, config: &LocaleConfig) -> Self {
        Self {
            locales,
            bypass: Arc::new(AnyMatcher::bypass_rules(config)),
            cookie_name: config.cookie_name.clone(),
            matcher: Arc::new(BestFitMatcher),
        }
    }

    /// Build the locale set and router from configuration.
    pub fn from_config(config: &LocaleConfig) -> Result<Self, LocaleSetError> {
        let locales = LocaleSet::new(&config.supported, &config.default)?;
        Ok(Self::new(Arc::new(locales), config))
    }

    /// Replace the language negotiation strategy.
    pub fn with_matcher(mut self, matcher: Arc<dyn LocaleMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// True for paths that never get locale handling.
    pub fn should_bypass(&self, path: &str) -> bool {
        self.bypass.matches(path)
    }

    /// True if `path` is `/{locale}` or starts with `/{locale}/`.
    pub fn has_locale_prefix(&self, path: &str) -> bool {
        self.locales.prefix_of(path).is_some()
    }

    /// Pick the locale for a request. Never fails.
    pub fn resolve_locale(&self, request: &IncomingRequest) -> &Locale {
        if let Some(locale) = request
            .cookie(&self.cookie_name)
            .and_then(|code| self.locales.get(code))
        {
            return locale;
        }

        let Some(header) = request.header(ACCEPT_LANGUAGE) else {
            return self.locales.default_locale();
        };

        let requested = parse_accept_language(&header);
        if requested.is_empty() {
            tracing::debug!(header = %header, "No usable Accept-Language range");
        }
        self.matcher.match_locale(&requested, &self.locales)
    }

    /// Classify a request: pass it through or redirect it to its locale.
    pub fn route(&self, request: &IncomingRequest) -> RouteOutcome<'_> {
        let path = request.path();

        if self.should_bypass(path) {
            return RouteOutcome::Continue(PassThrough::Bypassed);
        }

        if let Some(locale) = self.locales.prefix_of(path) {
            return RouteOutcome::Continue(PassThrough::Prefixed(locale));
        }

        let locale = self.resolve_locale(request);
        RouteOutcome::RedirectTo(redirect_target(locale, path, request.query_params()))
    }

    /// Rewrite a same-site target (`path[?query]`) into `locale`.
    ///
    /// An existing locale prefix is replaced; an unprefixed path gets one.
    pub fn localize_target(&self, target: &str, locale: &Locale) -> String {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };

        let rest = match self.locales.prefix_of(path) {
            Some(current) => &path[current.code().len() + 1..],
            None if path == "/" => "",
            None => path,
        };

        let mut localized = format!("/{}{}", locale.code(), rest);
        if let Some(query) = query {
            localized.push('?');
            localized.push_str(query);
        }
        localized
    }
}

fn redirect_target(locale: &Locale, path: &str, query: &[(String, String)]) -> String {
    let mut target = format!("/{}{}", locale.code(), path);

    let params = collapse_repeated_keys(query);
    if !params.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        target.push('?');
        target.push_str(&encoded);
    }
    target
}

// A repeated key is kept once, at its first position, with its last value.
fn collapse_repeated_keys(query: &[(String, String)]) -> Vec<(&str, &str)> {
    let mut params: Vec<(&str, &str)> = Vec::with_capacity(query.len());
    for (key, value) in query {
        match params.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some(slot) => slot.1 = value.as_str(),
            None => params.push((key.as_str(), value.as_str())),
        }
    }
    params
}
