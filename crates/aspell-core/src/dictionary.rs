// Installed-dictionary records.

use serde::{Deserialize, Serialize};

/// One entry of the native dictionary enumeration, copied out of the
/// native record so it outlives the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictionaryInfo {
    /// Full dictionary name, e.g. `en_US-w_accents`.
    pub name: String,
    /// Language code, e.g. `en_US`.
    pub code: String,
    /// Jargon, empty when the dictionary has none.
    pub jargon: String,
    /// Numeric dictionary size (10..=80 in stock Aspell data).
    pub size: u32,
    /// Size as spelled in the dictionary name, e.g. `60`.
    pub size_str: String,
}

impl DictionaryInfo {
    /// Record whose name equals its code, with no jargon and the stock size.
    pub fn for_code(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            jargon: String::new(),
            size: 60,
            size_str: "60".to_string(),
        }
    }

    /// Whether a `lang` value selects this dictionary.
    pub fn matches_language(&self, language: &str) -> bool {
        self.code == language || self.name == language
    }
}
