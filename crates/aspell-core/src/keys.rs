// Configuration key names.
//
// Keys travel to the native layer as strings. `ConfigKey` is the symbolic
// form of the commonly used ones; it normalizes to the same string, so
// `speller.get("personal")` and `speller.get(ConfigKey::Personal)` are the
// same call. Keys outside this list are still accepted as plain strings.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const KEY_LANG: &str = "lang";
pub const KEY_PERSONAL: &str = "personal";
pub const KEY_ENCODING: &str = "encoding";
pub const KEY_SUG_MODE: &str = "sug-mode";
pub const KEY_MASTER: &str = "master";
pub const KEY_JARGON: &str = "jargon";
pub const KEY_SIZE: &str = "size";
pub const KEY_IGNORE: &str = "ignore";
pub const KEY_IGNORE_CASE: &str = "ignore-case";
pub const KEY_RUN_TOGETHER: &str = "run-together";
pub const KEY_DICT_DIR: &str = "dict-dir";
pub const KEY_HOME_DIR: &str = "home-dir";

/// Symbolic configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Language code of the main dictionary (`lang`).
    Lang,
    /// Personal word list file (`personal`).
    Personal,
    /// Encoding of words exchanged with the checker (`encoding`).
    Encoding,
    /// Suggestion mode (`sug-mode`).
    SugMode,
    /// Explicit main word list (`master`).
    Master,
    /// Dictionary jargon (`jargon`).
    Jargon,
    /// Dictionary size (`size`).
    Size,
    /// Ignore words of this length or shorter (`ignore`).
    Ignore,
    /// Case-insensitive checking (`ignore-case`).
    IgnoreCase,
    /// Accept run-together words (`run-together`).
    RunTogether,
    /// Dictionary search directory (`dict-dir`).
    DictDir,
    /// Directory holding personal files (`home-dir`).
    HomeDir,
}

impl ConfigKey {
    /// Every symbolic key, in declaration order.
    pub const ALL: [ConfigKey; 12] = [
        ConfigKey::Lang,
        ConfigKey::Personal,
        ConfigKey::Encoding,
        ConfigKey::SugMode,
        ConfigKey::Master,
        ConfigKey::Jargon,
        ConfigKey::Size,
        ConfigKey::Ignore,
        ConfigKey::IgnoreCase,
        ConfigKey::RunTogether,
        ConfigKey::DictDir,
        ConfigKey::HomeDir,
    ];

    /// The key's name in the native schema.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Lang => KEY_LANG,
            ConfigKey::Personal => KEY_PERSONAL,
            ConfigKey::Encoding => KEY_ENCODING,
            ConfigKey::SugMode => KEY_SUG_MODE,
            ConfigKey::Master => KEY_MASTER,
            ConfigKey::Jargon => KEY_JARGON,
            ConfigKey::Size => KEY_SIZE,
            ConfigKey::Ignore => KEY_IGNORE,
            ConfigKey::IgnoreCase => KEY_IGNORE_CASE,
            ConfigKey::RunTogether => KEY_RUN_TOGETHER,
            ConfigKey::DictDir => KEY_DICT_DIR,
            ConfigKey::HomeDir => KEY_HOME_DIR,
        }
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_and_string_forms_agree() {
        assert_eq!(ConfigKey::Lang.as_ref(), "lang");
        assert_eq!(ConfigKey::SugMode.to_string(), "sug-mode");
        assert_eq!(ConfigKey::IgnoreCase.as_str(), KEY_IGNORE_CASE);
    }

    #[test]
    fn parse_round_trips_every_key() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>(), Ok(key));
        }
    }

    #[test]
    fn parse_unknown_key() {
        assert_eq!(
            "foo".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey { key: "foo".into() })
        );
    }
}
