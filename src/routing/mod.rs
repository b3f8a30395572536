//! Locale routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query, cookies, headers)
//!     → matcher.rs (bypass rules: framework, API, assets, dotted paths)
//!     → LocaleSet::prefix_of (already locale-prefixed?)
//!     → router.rs (cookie → Accept-Language → default)
//!     → Return: Continue or RedirectTo("/{locale}{path}?{query}")
//!
//! Router Compilation (at startup):
//!     LocaleConfig
//!     → Build LocaleSet and bypass matchers
//!     → Freeze as immutable LocaleRouter
//! ```
//!
//! # Design Decisions
//! - Router compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always produces the same outcome
//! - Resolution never fails; malformed input falls back to the default locale

pub mod matcher;
pub mod router;

pub use router::{LocaleRouter, PassThrough, RouteOutcome};
