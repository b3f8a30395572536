//! Locale model and language negotiation.
//!
//! # Data Flow
//! ```text
//! [locale] config (codes + default)
//!     → set.rs (validate, freeze as LocaleSet)
//!
//! Accept-Language header
//!     → accept_language.rs (parse tags + quality weights)
//!     → matcher.rs (best-fit match against LocaleSet)
//!     → &Locale (always a member of the set)
//! ```
//!
//! # Design Decisions
//! - LocaleSet is built once at startup and shared via Arc
//! - Tags are compared as parsed BCP-47 identifiers, never as raw strings
//! - Path prefixes and cookies use the configured code verbatim (case-sensitive)

pub mod accept_language;
pub mod direction;
pub mod matcher;
pub mod set;

pub use accept_language::{
    parse_accept_language, parse_language_range, LanguagePreference, NegotiationError,
};
pub use direction::Direction;
pub use matcher::{BestFitMatcher, LocaleMatcher};
pub use set::{Locale, LocaleSet, LocaleSetError};
