//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locale gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Supported locales and routing rules.
    pub locale: LocaleConfig,

    /// Site renderer that pass-through requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Locale routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale codes, in display order.
    pub supported: Vec<String>,

    /// Locale used when neither cookie nor header picks one.
    pub default: String,

    /// Cookie holding the visitor's explicit locale choice.
    pub cookie_name: String,

    /// Path prefixes that are never locale-routed (framework, API, assets).
    pub bypass_prefixes: Vec<String>,

    /// Skip locale routing for any path containing a `.`.
    pub bypass_dotted_paths: bool,

    /// Status code for locale redirects (302, 303, 307 or 308).
    pub redirect_status: u16,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "ar".to_string()],
            default: "en".to_string(),
            cookie_name: "NEXT_LOCALE".to_string(),
            bypass_prefixes: vec![
                "/_next".to_string(),
                "/api".to_string(),
                "/images".to_string(),
            ],
            bypass_dotted_paths: true,
            redirect_status: 307,
        }
    }
}

/// Upstream site configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Renderer address (e.g., "127.0.0.1:3000"). Unset means pass-through
    /// requests are answered with 404.
    pub address: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
