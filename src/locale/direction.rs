//! Text direction for rendered pages.

use std::fmt;

use unic_langid::LanguageIdentifier;

/// Languages written right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ur"];

/// Text direction, rendered as the HTML `dir` attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn of(langid: &LanguageIdentifier) -> Self {
        if RTL_LANGUAGES.contains(&langid.language.as_str()) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
