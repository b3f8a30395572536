//! `Accept-Language` header parsing.
//!
//! # Responsibilities
//! - Split the header into language ranges with quality weights
//! - Order ranges by weight, keeping header order on ties
//! - Reduce extended BCP-47 tags to their language, script and region
//!
//! # Design Decisions
//! - `q=0` ranges mean "not acceptable" and are dropped
//! - The `*` wildcard carries no usable preference and is dropped
//! - A malformed range is skipped; the rest of the header still counts
//! - Extensions and private use (`-u-`, `-t-`, `-x-`) do not affect matching

use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// A malformed `Accept-Language` range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// A range is not a BCP-47 language tag.
    #[error("invalid language tag {0:?}")]
    InvalidTag(String),

    /// A `q` parameter is not a number in `0..=1`.
    #[error("invalid quality value {0:?}")]
    InvalidQuality(String),
}

/// One requested language and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    pub tag: LanguageIdentifier,
    pub quality: f32,
}

/// Parse an `Accept-Language` value into preferences, most preferred first.
///
/// Ranges that cannot be understood are skipped, so a header with no usable
/// range yields an empty list.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences = Vec::new();

    for range in header.split(',') {
        match parse_language_range(range) {
            Ok(Some(preference)) => preferences.push(preference),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "Skipping Accept-Language range"),
        }
    }

    // sort_by is stable: equal weights keep header order
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

/// Parse one `tag[;q=weight]` range.
///
/// `Ok(None)` for ranges that express no preference: empty, `*` or `q=0`.
pub fn parse_language_range(range: &str) -> Result<Option<LanguagePreference>, NegotiationError> {
    let range = range.trim();
    if range.is_empty() {
        return Ok(None);
    }

    let (tag, params) = range.split_once(';').unwrap_or((range, ""));
    let tag = tag.trim();

    let mut quality = 1.0;
    for param in params.split(';') {
        let param = param.trim();
        if let Some(raw) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
            quality = parse_quality(raw)?;
        }
    }

    if tag == "*" || quality == 0.0 {
        return Ok(None);
    }

    let core = strip_extensions(tag);
    if core.is_empty() {
        return Err(NegotiationError::InvalidTag(tag.to_string()));
    }

    let parsed: LanguageIdentifier = core
        .parse()
        .map_err(|_| NegotiationError::InvalidTag(tag.to_string()))?;

    Ok(Some(LanguagePreference {
        tag: parsed,
        quality,
    }))
}

// Everything from the first singleton subtag on: `ar-EG-u-nu-latn` -> `ar-EG`.
// A tag that starts with a singleton (`x-foo`, `i-klingon`) reduces to "".
fn strip_extensions(tag: &str) -> &str {
    let mut end = 0;
    for subtag in tag.split(['-', '_']) {
        if subtag.len() == 1 {
            break;
        }
        end += subtag.len() + 1;
    }
    tag.get(..end.saturating_sub(1)).unwrap_or(tag)
}

fn parse_quality(raw: &str) -> Result<f32, NegotiationError> {
    let raw = raw.trim();
    let quality: f32 = raw
        .parse()
        .map_err(|_| NegotiationError::InvalidQuality(raw.to_string()))?;

    if (0.0..=1.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(NegotiationError::InvalidQuality(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(prefs: &[LanguagePreference]) -> Vec<String> {
        prefs.iter().map(|p| p.tag.to_string()).collect()
    }

    #[test]
    fn test_parses_weighted_list() {
        let prefs = parse_accept_language("fr-FR,fr;q=0.9,en;q=0.5");
        assert_eq!(tags(&prefs), vec!["fr-FR", "fr", "en"]);
        assert_eq!(prefs[0].quality, 1.0);
        assert_eq!(prefs[2].quality, 0.5);
    }

    #[test]
    fn test_orders_by_quality_stably() {
        let prefs = parse_accept_language("en;q=0.5, ar, de;q=0.5, fr");
        assert_eq!(tags(&prefs), vec!["ar", "fr", "en", "de"]);
    }

    #[test]
    fn test_drops_wildcard_and_zero_quality() {
        let prefs = parse_accept_language("ar, *;q=0.1, en;q=0");
        assert_eq!(tags(&prefs), vec!["ar"]);
    }

    #[test]
    fn test_tolerates_whitespace_and_empty_ranges() {
        let prefs = parse_accept_language(" en-US ; q=0.8 ,, ar ");
        assert_eq!(tags(&prefs), vec!["ar", "en-US"]);
    }

    #[test]
    fn test_empty_header_has_no_preferences() {
        assert!(parse_accept_language("").is_empty());
    }

    #[test]
    fn test_extensions_are_stripped() {
        let prefs = parse_accept_language("ar-EG-u-nu-latn, en-US-x-twain;q=0.5, de-t-en;q=0.2");
        assert_eq!(tags(&prefs), vec!["ar-EG", "en-US", "de"]);
    }

    #[test]
    fn test_malformed_ranges_are_skipped() {
        let prefs = parse_accept_language("en;q=abc, !!!, i-klingon;q=0.1, x-private, ar;q=1.5, ar;q=0.3");
        assert_eq!(tags(&prefs), vec!["ar"]);
        assert_eq!(prefs[0].quality, 0.3);
    }

    #[test]
    fn test_nothing_usable_is_empty() {
        assert!(parse_accept_language("!!!, en;q=abc").is_empty());
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            parse_language_range("!!!").unwrap_err(),
            NegotiationError::InvalidTag("!!!".into())
        );
        assert_eq!(
            parse_language_range("i-klingon").unwrap_err(),
            NegotiationError::InvalidTag("i-klingon".into())
        );
        assert!(matches!(
            parse_language_range("en;q=abc"),
            Err(NegotiationError::InvalidQuality(_))
        ));
        assert!(matches!(
            parse_language_range("en;q=1.5"),
            Err(NegotiationError::InvalidQuality(_))
        ));
        assert_eq!(parse_language_range("*"), Ok(None));
    }
}
