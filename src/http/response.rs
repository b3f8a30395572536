//! Response construction.
//!
//! # Responsibilities
//! - Turn a locale redirect decision into an HTTP redirect
//! - Build the locale cookie written by the language switch
//!
//! # Design Decisions
//! - `Location` is relative to the requested origin
//! - Redirects vary on `Accept-Language` and `Cookie` so caches keep
//!   per-visitor answers apart

use axum::http::header::{LOCATION, SET_COOKIE, VARY};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// One year, the lifetime of an explicit locale choice.
pub const LOCALE_COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Redirect to a locale-prefixed target.
pub fn locale_redirect(status: StatusCode, location: &str) -> Response {
    let Ok(location) = HeaderValue::from_str(location) else {
        tracing::warn!(location = %location, "Redirect target is not a valid header value");
        return (StatusCode::BAD_REQUEST, "Invalid redirect target").into_response();
    };

    (
        status,
        [
            (LOCATION, location),
            (VARY, HeaderValue::from_static("Accept-Language, Cookie")),
        ],
    )
        .into_response()
}

/// `Set-Cookie` value persisting a visitor's locale choice.
pub fn locale_cookie(name: &str, code: &str) -> String {
    format!("{name}={code}; Path=/; Max-Age={LOCALE_COOKIE_MAX_AGE_SECS}; SameSite=Lax")
}

/// Redirect that also stores the chosen locale.
pub fn switch_redirect(cookie: &str, location: &str) -> Response {
    match (HeaderValue::from_str(cookie), HeaderValue::from_str(location)) {
        (Ok(cookie), Ok(location)) => (
            StatusCode::SEE_OTHER,
            [(SET_COOKIE, cookie), (LOCATION, location)],
        )
            .into_response(),
        _ => (StatusCode::BAD_REQUEST, "Invalid locale switch").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_redirect_headers() {
        let response = locale_redirect(StatusCode::TEMPORARY_REDIRECT, "/en/about?x=1");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/en/about?x=1");
        assert_eq!(response.headers()[VARY], "Accept-Language, Cookie");
    }

    #[test]
    fn test_invalid_location_rejected() {
        let response = locale_redirect(StatusCode::FOUND, "/en/\nsplit");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_locale_cookie_format() {
        assert_eq!(
            locale_cookie("NEXT_LOCALE", "ar"),
            "NEXT_LOCALE=ar; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }

    #[test]
    fn test_switch_redirect() {
        let response = switch_redirect(&locale_cookie("NEXT_LOCALE", "ar"), "/ar/about");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/ar/about");
        assert!(response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("NEXT_LOCALE=ar;"));
    }
}
