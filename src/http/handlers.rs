//! Endpoints the gateway answers itself.
//!
//! Both live under `/api`, which the locale router bypasses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::{locale_cookie, switch_redirect};
use crate::http::server::AppState;

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Path prefix of the language switch, followed by the locale code.
pub const SWITCH_PATH_PREFIX: &str = "/api/locale/";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub locales: Vec<String>,
    pub default_locale: String,
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    let locales = state.router.locales();
    Json(HealthStatus {
        status: "operational".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        locales: locales.codes().map(str::to_string).collect(),
        default_locale: locales.default_locale().code().to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct SwitchParams {
    /// Page to return to, e.g. `/en/about`.
    pub return_to: Option<String>,
}

/// Store the visitor's locale choice and send them back to the page they
/// were on, in the new locale.
pub async fn switch_locale(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<SwitchParams>,
) -> Response {
    let router = &state.router;
    let Some(locale) = router.locales().get(&code) else {
        tracing::debug!(locale = %code, "Rejected switch to unsupported locale");
        return (StatusCode::BAD_REQUEST, "Unsupported locale").into_response();
    };

    let target = match params.return_to.as_deref() {
        Some(page) if is_page_target(page) && !router.should_bypass(page_path(page)) => {
            router.localize_target(page, locale)
        }
        _ => format!("/{}", locale.code()),
    };

    tracing::info!(locale = %locale.code(), target = %target, "Locale switched");
    switch_redirect(&locale_cookie(router.cookie_name(), locale.code()), &target)
}

// Same-origin absolute path only: no scheme, no `//host`, no backslashes
fn is_page_target(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

fn page_path(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_target_rules() {
        assert!(is_page_target("/en/about"));
        assert!(is_page_target("/"));
        assert!(!is_page_target("//evil.example/en"));
        assert!(!is_page_target("https://evil.example/"));
        assert!(!is_page_target("/\\evil.example"));
        assert!(!is_page_target("en/about"));
    }

    #[test]
    fn test_page_path_strips_query() {
        assert_eq!(page_path("/en/donate?c=1"), "/en/donate");
        assert_eq!(page_path("/en"), "/en");
    }
}
