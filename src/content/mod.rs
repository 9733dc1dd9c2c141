pub mod loader;
pub mod source;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of a page data file, as it appears on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawItem {
    pub tr: String,
    pub en: String,
}

/// A sentence pair tagged with the page it was loaded from.
/// Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceItem {
    pub tr: String,
    pub en: String,
    pub page: u32,
}

impl SentenceItem {
    pub fn new(raw: RawItem, page: u32) -> Self {
        Self {
            tr: raw.tr,
            en: raw.en,
            page,
        }
    }

    pub fn key(&self) -> CardKey {
        CardKey::new(self.page, &self.en)
    }
}

/// Composite identity key for status tracking: page number plus the English
/// field text. The persisted wire form is `"{page}_{text}"`, matching the
/// original storage format; the struct keeps the two parts separate so a key
/// never collides when the text itself contains the separator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardKey {
    pub page: u32,
    pub text: String,
}

impl CardKey {
    pub fn new(page: u32, text: &str) -> Self {
        Self {
            page,
            text: text.to_string(),
        }
    }

    /// Parse the stored wire form. Entries that don't split into a page
    /// number and text are dropped by callers rather than surfaced.
    pub fn parse(s: &str) -> Option<Self> {
        let (page, text) = s.split_once('_')?;
        let page = page.parse().ok()?;
        Some(Self {
            page,
            text: text.to_string(),
        })
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.page, self.text)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("page {page} does not exist")]
    Missing { page: u32 },
    #[error("page {page} could not be read")]
    Io {
        page: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("page {page} is not valid JSON")]
    Parse {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn page(&self) -> u32 {
        match self {
            LoadError::Missing { page } => *page,
            LoadError::Io { page, .. } => *page,
            LoadError::Parse { page, .. } => *page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_wire_form_round_trip() {
        let key = CardKey::new(3, "Hello");
        assert_eq!(key.to_string(), "3_Hello");
        assert_eq!(CardKey::parse("3_Hello"), Some(key));
    }

    #[test]
    fn test_key_text_containing_separator() {
        // "well_known" must survive the split on the first underscore
        let key = CardKey::parse("12_well_known").unwrap();
        assert_eq!(key.page, 12);
        assert_eq!(key.text, "well_known");
        assert_eq!(key.to_string(), "12_well_known");
    }

    #[test]
    fn test_key_parse_rejects_garbage() {
        assert_eq!(CardKey::parse("no separator"), None);
        assert_eq!(CardKey::parse("abc_text"), None);
        assert_eq!(CardKey::parse(""), None);
    }

    #[test]
    fn test_item_key_uses_english_field() {
        let item = SentenceItem::new(
            RawItem {
                tr: "Merhaba".to_string(),
                en: "Hello".to_string(),
            },
            1,
        );
        assert_eq!(item.key(), CardKey::new(1, "Hello"));
    }
}
