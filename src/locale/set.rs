//! The set of locales the site is published in.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::locale::direction::Direction;

/// Errors raised while building a [`LocaleSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleSetError {
    /// No locales were supplied.
    #[error("at least one supported locale is required")]
    Empty,

    /// The same code appears more than once.
    #[error("duplicate locale code {0:?}")]
    Duplicate(String),

    /// The code is not a BCP-47 language tag or cannot be used as a path segment.
    #[error("invalid locale code {0:?}")]
    InvalidCode(String),

    /// The code parses but is not written in canonical form.
    #[error("locale code {code:?} is not canonical, use {canonical:?}")]
    NonCanonical { code: String, canonical: String },

    /// The default locale is not one of the supported codes.
    #[error("default locale {0:?} is not in the supported set")]
    DefaultNotSupported(String),
}

/// A supported locale: the code used in URLs and cookies plus its parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    code: String,
    langid: LanguageIdentifier,
}

impl Locale {
    /// Parse a locale code such as `en` or `pt-BR`.
    ///
    /// The code must be canonical so that the URL prefix, the cookie value and
    /// the parsed tag all agree.
    pub fn parse(code: &str) -> Result<Self, LocaleSetError> {
        if code.is_empty() || code.contains('/') {
            return Err(LocaleSetError::InvalidCode(code.to_string()));
        }

        let langid: LanguageIdentifier = code
            .parse()
            .map_err(|_| LocaleSetError::InvalidCode(code.to_string()))?;

        let canonical = langid.to_string();
        if canonical != code {
            return Err(LocaleSetError::NonCanonical {
                code: code.to_string(),
                canonical,
            });
        }

        Ok(Self {
            code: code.to_string(),
            langid,
        })
    }

    /// The code as it appears in URL prefixes and the locale cookie.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn langid(&self) -> &LanguageIdentifier {
        &self.langid
    }

    /// Text direction for pages rendered in this locale.
    pub fn direction(&self) -> Direction {
        Direction::of(&self.langid)
    }
}

/// Ordered, non-empty set of supported locales with a designated default.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default: usize,
}

impl LocaleSet {
    /// Build a locale set, checking every invariant.
    pub fn new<I, S>(codes: I, default: &str) -> Result<Self, LocaleSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales: Vec<Locale> = Vec::new();
        for code in codes {
            let locale = Locale::parse(code.as_ref())?;
            if locales.iter().any(|l| l.code == locale.code) {
                return Err(LocaleSetError::Duplicate(locale.code));
            }
            locales.push(locale);
        }

        if locales.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        let default = locales
            .iter()
            .position(|l| l.code == default)
            .ok_or_else(|| LocaleSetError::DefaultNotSupported(default.to_string()))?;

        Ok(Self { locales, default })
    }

    /// The fallback locale used when nothing else matches.
    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default]
    }

    /// Look up a locale by its exact code.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Locales in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.code())
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Always false: an empty set cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// The locale whose prefix `path` carries, if any.
    ///
    /// Matches `/{code}` exactly or `/{code}/...`. Case-sensitive, so `/arx`
    /// and `/AR` do not match `ar`.
    pub fn prefix_of(&self, path: &str) -> Option<&Locale> {
        let rest = path.strip_prefix('/')?;
        self.locales.iter().find(|locale| {
            rest.strip_prefix(locale.code.as_str())
                .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_ar() -> LocaleSet {
        LocaleSet::new(["en", "ar"], "en").unwrap()
    }

    #[test]
    fn test_builds_ordered_set() {
        let set = en_ar();
        assert_eq!(set.codes().collect::<Vec<_>>(), vec!["en", "ar"]);
        assert_eq!(set.default_locale().code(), "en");
        assert_eq!(set.len(), 2);
        assert!(set.contains("ar"));
        assert!(!set.contains("fr"));
    }

    #[test]
    fn test_rejects_empty_set() {
        let codes: [&str; 0] = [];
        assert_eq!(LocaleSet::new(codes, "en").unwrap_err(), LocaleSetError::Empty);
    }

    #[test]
    fn test_rejects_duplicates() {
        assert_eq!(
            LocaleSet::new(["en", "ar", "en"], "en").unwrap_err(),
            LocaleSetError::Duplicate("en".into())
        );
    }

    #[test]
    fn test_rejects_default_outside_set() {
        assert_eq!(
            LocaleSet::new(["en", "ar"], "fr").unwrap_err(),
            LocaleSetError::DefaultNotSupported("fr".into())
        );
    }

    #[test]
    fn test_rejects_invalid_codes() {
        assert!(matches!(Locale::parse(""), Err(LocaleSetError::InvalidCode(_))));
        assert!(matches!(Locale::parse("en/us"), Err(LocaleSetError::InvalidCode(_))));
        assert!(matches!(Locale::parse("not a tag"), Err(LocaleSetError::InvalidCode(_))));
    }

    #[test]
    fn test_rejects_non_canonical_codes() {
        assert_eq!(
            Locale::parse("EN").unwrap_err(),
            LocaleSetError::NonCanonical {
                code: "EN".into(),
                canonical: "en".into()
            }
        );
        assert!(Locale::parse("pt-BR").is_ok());
    }

    #[test]
    fn test_prefix_of() {
        let set = en_ar();
        assert_eq!(set.prefix_of("/en").map(Locale::code), Some("en"));
        assert_eq!(set.prefix_of("/ar/about").map(Locale::code), Some("ar"));
        assert_eq!(set.prefix_of("/en/").map(Locale::code), Some("en"));
        assert!(set.prefix_of("/arx").is_none());
        assert!(set.prefix_of("/AR/about").is_none());
        assert!(set.prefix_of("/about/en").is_none());
        assert!(set.prefix_of("/").is_none());
        assert!(set.prefix_of("en/about").is_none());
    }
}
