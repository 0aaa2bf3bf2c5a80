// Suggestion modes accepted under the `sug-mode` key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Breadth of suggestion generation, from fastest to most thorough.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionMode {
    Ultra,
    Fast,
    #[default]
    Normal,
    BadSpellers,
}

impl SuggestionMode {
    /// Every mode, in increasing order of breadth.
    pub const ALL: [SuggestionMode; 4] = [
        SuggestionMode::Ultra,
        SuggestionMode::Fast,
        SuggestionMode::Normal,
        SuggestionMode::BadSpellers,
    ];

    /// The value stored under `sug-mode`.
    pub const fn as_str(self) -> &'static str {
        match self {
            SuggestionMode::Ultra => "ultra",
            SuggestionMode::Fast => "fast",
            SuggestionMode::Normal => "normal",
            SuggestionMode::BadSpellers => "bad-spellers",
        }
    }
}

impl fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SuggestionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidSuggestionMode {
                value: s.to_string(),
            })
    }
}
