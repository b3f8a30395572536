//! Best-fit locale matching.

use std::fmt;

use crate::locale::accept_language::LanguagePreference;
use crate::locale::set::{Locale, LocaleSet};

/// Picks the supported locale that best serves a list of requested languages.
pub trait LocaleMatcher: Send + Sync + fmt::Debug {
    /// Returns a member of `locales`, falling back to its default.
    fn match_locale<'a>(&self, requested: &[LanguagePreference], locales: &'a LocaleSet) -> &'a Locale;
}

/// BCP-47 best-fit matching.
///
/// Requested languages are tried in preference order. For each one an exact
/// tag match wins, then a supported locale that is the bare language
/// (`en` for `en-GB`), then any supported locale sharing the primary
/// language subtag.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFitMatcher;

impl LocaleMatcher for BestFitMatcher {
    fn match_locale<'a>(&self, requested: &[LanguagePreference], locales: &'a LocaleSet) -> &'a Locale {
        for preference in requested {
            let wanted = &preference.tag;

            if let Some(exact) = locales.iter().find(|l| l.langid() == wanted) {
                return exact;
            }

            let mut bare = wanted.clone();
            bare.script = None;
            bare.region = None;
            bare.clear_variants();
            if let Some(language) = locales.iter().find(|l| *l.langid() == bare) {
                return language;
            }

            if let Some(related) = locales
                .iter()
                .find(|l| l.langid().language == wanted.language)
            {
                return related;
            }
        }

        locales.default_locale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::accept_language::parse_accept_language;

    fn best(header: &str, locales: &LocaleSet) -> String {
        let requested = parse_accept_language(header);
        BestFitMatcher.match_locale(&requested, locales).code().to_string()
    }

    #[test]
    fn test_primary_subtag_match() {
        let set = LocaleSet::new(["en", "ar"], "en").unwrap();
        assert_eq!(best("ar-EG,en;q=0.8", &set), "ar");
        assert_eq!(best("en-US,en;q=0.9", &set), "en");
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let set = LocaleSet::new(["en", "ar"], "en").unwrap();
        assert_eq!(best("fr-FR,fr;q=0.9,de;q=0.5", &set), "en");
        assert_eq!(best("", &set), "en");
    }

    #[test]
    fn test_unsupported_top_choice_skipped() {
        let set = LocaleSet::new(["en", "ar"], "en").unwrap();
        assert_eq!(best("fr-FR,fr;q=0.9,ar;q=0.5", &set), "ar");
    }

    #[test]
    fn test_exact_match_preferred() {
        let set = LocaleSet::new(["en-GB", "en-US", "en"], "en").unwrap();
        assert_eq!(best("en-US", &set), "en-US");
        assert_eq!(best("en-AU", &set), "en");
    }

    #[test]
    fn test_related_region_when_no_bare_language() {
        let set = LocaleSet::new(["pt-BR", "ar"], "ar").unwrap();
        assert_eq!(best("pt-PT", &set), "pt-BR");
    }

    #[test]
    fn test_preference_order_beats_match_quality() {
        // a weaker match for the preferred language wins over an exact
        // match for a less preferred one
        let set = LocaleSet::new(["en", "ar"], "en").unwrap();
        assert_eq!(best("ar-SA, en", &set), "ar");
    }
}
