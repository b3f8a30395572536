//! Locale Gateway Library
//!
//! Keeps every document URL of a bilingual site locale-prefixed: requests
//! without a prefix are redirected to `/{locale}{path}`, picking the locale
//! from the `NEXT_LOCALE` cookie, then `Accept-Language`, then the default.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{LocaleRouter, RouteOutcome};
