//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the locale set invariants (non-empty, unique, default included)
//! - Validate addresses, prefixes and status codes
//! - Keep the gateway's own `/api` endpoints out of locale routing
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::http::handlers::{HEALTH_PATH, SWITCH_PATH_PREFIX};
use crate::locale::{LocaleSet, LocaleSetError};
use crate::routing::matcher::{AnyMatcher, Matcher};

/// Redirect statuses the locale router may emit.
pub const REDIRECT_STATUSES: &[u16] = &[302, 303, 307, 308];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A socket address field does not parse.
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    /// The locale list or default violates a locale set invariant.
    #[error("locale: {0}")]
    Locales(#[from] LocaleSetError),

    /// The cookie name is empty or not an HTTP token.
    #[error("locale.cookie_name: invalid cookie name {0:?}")]
    InvalidCookieName(String),

    /// A bypass prefix does not start with `/`.
    #[error("locale.bypass_prefixes: prefix {0:?} must start with '/'")]
    InvalidBypassPrefix(String),

    /// A gateway endpoint would be locale-redirected instead of answered.
    #[error("locale.bypass_prefixes: gateway route {0:?} is not bypassed")]
    GatewayRouteNotBypassed(String),

    /// The redirect status is not a redirection the router can emit.
    #[error("locale.redirect_status: {0} is not one of 302, 303, 307, 308")]
    InvalidRedirectStatus(u16),

    /// A timeout is zero.
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The log level is unknown.
    #[error("observability.log_level: unknown level {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if let Some(address) = &config.upstream.address {
        check_address(&mut errors, "upstream.address", address);
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let locale = &config.locale;
    if let Err(e) = LocaleSet::new(&locale.supported, &locale.default) {
        errors.push(e.into());
    }

    if !is_cookie_token(&locale.cookie_name) {
        errors.push(ValidationError::InvalidCookieName(locale.cookie_name.clone()));
    }

    for prefix in &locale.bypass_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidBypassPrefix(prefix.clone()));
        }
    }

    let bypass = AnyMatcher::bypass_rules(locale);
    let switch_paths = locale
        .supported
        .iter()
        .map(|code| format!("{SWITCH_PATH_PREFIX}{code}"));
    for path in std::iter::once(HEALTH_PATH.to_string()).chain(switch_paths) {
        if !bypass.matches(&path) {
            errors.push(ValidationError::GatewayRouteNotBypassed(path));
        }
    }

    if !REDIRECT_STATUSES.contains(&locale.redirect_status) {
        errors.push(ValidationError::InvalidRedirectStatus(locale.redirect_status));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

// RFC 6265 cookie-name: an RFC 7230 token
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.locale.default = "fr".into();
        config.locale.cookie_name = "bad cookie".into();
        config.locale.bypass_prefixes.push("static".into());
        config.locale.redirect_status = 200;
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ValidationError::Locales(
            LocaleSetError::DefaultNotSupported("fr".into())
        )));
        assert!(errors.contains(&ValidationError::InvalidRedirectStatus(200)));
    }

    #[test]
    fn test_upstream_address_checked_when_set() {
        let mut config = GatewayConfig::default();
        config.upstream.address = Some("localhost".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "upstream.address",
                value: "localhost".into(),
            }]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_gateway_routes_must_stay_bypassed() {
        let mut config = GatewayConfig::default();
        config.locale.bypass_prefixes = vec!["/_next".into(), "/images".into()];
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![
                ValidationError::GatewayRouteNotBypassed("/api/health".into()),
                ValidationError::GatewayRouteNotBypassed("/api/locale/en".into()),
                ValidationError::GatewayRouteNotBypassed("/api/locale/ar".into()),
            ]
        );

        config.locale.bypass_prefixes = vec!["/api/".into()];
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_duplicate_locales_rejected() {
        let mut config = GatewayConfig::default();
        config.locale.supported = vec!["en".into(), "ar".into(), "ar".into()];
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::Locales(LocaleSetError::Duplicate("ar".into()))]
        );
    }
}
