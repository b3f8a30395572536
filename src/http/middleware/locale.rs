//! Locale routing middleware.
//! Redirects unprefixed document requests to their locale.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::http::request::{IncomingRequest, X_LOCALE, X_TEXT_DIRECTION};
use crate::http::response::locale_redirect;
use crate::http::server::AppState;
use crate::locale::{Direction, Locale};
use crate::observability::metrics;
use crate::routing::{PassThrough, RouteOutcome};

/// Context attached to requests that carry a locale prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleContext {
    pub locale: String,
    pub direction: Direction,
}

impl From<&Locale> for LocaleContext {
    fn from(locale: &Locale) -> Self {
        Self {
            locale: locale.code().to_string(),
            direction: locale.direction(),
        }
    }
}

impl LocaleContext {
    /// Write the context as `x-locale` / `x-text-direction`, replacing any
    /// client-supplied values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.locale) {
            Ok(value) => {
                headers.insert(X_LOCALE, value);
            }
            Err(_) => {
                headers.remove(X_LOCALE);
            }
        }
        headers.insert(
            X_TEXT_DIRECTION,
            HeaderValue::from_static(self.direction.as_str()),
        );
    }

    /// Drop client-supplied `x-locale` / `x-text-direction` from a request
    /// that carries no locale.
    pub fn clear(headers: &mut HeaderMap) {
        headers.remove(X_LOCALE);
        headers.remove(X_TEXT_DIRECTION);
    }
}

pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let incoming = IncomingRequest::from_request(&req);
    let outcome = state.router.route(&incoming);
    let kind = outcome.kind();

    match outcome {
        RouteOutcome::Continue(PassThrough::Bypassed) => {
            metrics::record_decision(kind, "");
            LocaleContext::clear(req.headers_mut());
            next.run(req).await
        }
        RouteOutcome::Continue(PassThrough::Prefixed(locale)) => {
            metrics::record_decision(kind, locale.code());
            req.extensions_mut().insert(LocaleContext::from(locale));
            next.run(req).await
        }
        RouteOutcome::RedirectTo(target) => {
            let locale = state
                .router
                .locales()
                .prefix_of(&target)
                .map(Locale::code)
                .unwrap_or_default();
            tracing::debug!(path = %incoming.path(), locale = %locale, target = %target, "Redirecting to locale");
            metrics::record_decision(kind, locale);
            locale_redirect(state.redirect_status, &target)
        }
    }
}
