//! Localized station names.

use std::fmt;

/// A station name in the network's three display languages.
///
/// All three fields are required; a missing translation in the source data
/// is a data error, not an empty string here by convention. Equality and
/// hashing cover every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedName {
    /// English name
    pub en: String,
    /// Chinese name
    pub zh: String,
    /// Tamil name
    pub ta: String,
}

impl LocalizedName {
    /// Creates a localized name from its three translations.
    pub fn new(en: impl Into<String>, zh: impl Into<String>, ta: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
            ta: ta.into(),
        }
    }
}

impl fmt::Display for LocalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.en)
    }
}
