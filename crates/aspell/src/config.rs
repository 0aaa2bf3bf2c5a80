// Configuration handle: typed key/value facade over a native configuration.
//
// All validation happens here, before any native call:
// - keys and values must be NUL-free,
// - `sug-mode` values must name a `SuggestionMode`.
// A failed `set` or `reset` leaves the stored value untouched.
//
// The handle does not know about checkers. Rebuilding after a successful
// mutation is the speller's job.

use std::ffi::CString;

use aspell_core::keys::KEY_SUG_MODE;
use aspell_core::{AspellError, ConfigError, InputKind, Result, SuggestionMode};

use crate::backend::RawConfig;

/// Owns one native configuration exclusively.
#[derive(Debug)]
pub struct ConfigHandle<C> {
    raw: C,
}

impl<C: RawConfig> ConfigHandle<C> {
    pub fn new(raw: C) -> Self {
        Self { raw }
    }

    /// The native configuration, for building checkers and listing dictionaries.
    pub fn raw(&self) -> &C {
        &self.raw
    }

    #[cfg(test)]
    pub(crate) fn raw_mut(&mut self) -> &mut C {
        &mut self.raw
    }

    /// Write `value` under `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key == KEY_SUG_MODE {
            value.parse::<SuggestionMode>()?;
        }
        let c_key = to_c_string(InputKind::Key, key)?;
        let c_value = to_c_string(InputKind::Value, value)?;

        self.raw
            .replace(&c_key, &c_value)
            .map_err(|message| ConfigError::Rejected {
                key: key.to_string(),
                value: value.to_string(),
                message,
            })?;
        tracing::trace!(key, value, "configuration item replaced");
        Ok(())
    }

    /// Current value of `key`. Unknown keys are an error, never an empty
    /// string.
    pub fn get(&self, key: &str) -> Result<String> {
        let c_key = to_c_string(InputKind::Key, key)?;
        self.raw
            .retrieve(&c_key)
            .ok_or_else(|| unknown_key(key))
    }

    /// Schema default of `key`, irrespective of its current value.
    pub fn get_default(&self, key: &str) -> Result<String> {
        let c_key = to_c_string(InputKind::Key, key)?;
        self.raw
            .retrieve_default(&c_key)
            .ok_or_else(|| unknown_key(key))
    }

    /// Restore `key` to its default.
    pub fn reset(&mut self, key: &str) -> Result<()> {
        let c_key = to_c_string(InputKind::Key, key)?;
        if !self.raw.remove(&c_key) {
            return Err(ConfigError::ResetFailed {
                key: key.to_string(),
            }
            .into());
        }
        tracing::trace!(key, "configuration item reset");
        Ok(())
    }
}

fn unknown_key(key: &str) -> AspellError {
    ConfigError::UnknownKey {
        key: key.to_string(),
    }
    .into()
}

pub(crate) fn to_c_string(kind: InputKind, value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| AspellError::InvalidInput {
        kind,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use crate::memory::MemoryBackend;

    fn handle() -> ConfigHandle<<MemoryBackend as Backend>::Config> {
        ConfigHandle::new(MemoryBackend::new().new_config().unwrap())
    }

    #[test]
    fn set_then_get() {
        let mut config = handle();
        config.set("personal", "foo.pws").unwrap();
        assert_eq!(config.get("personal").unwrap(), "foo.pws");
    }

    #[test]
    fn unknown_keys_are_signalled() {
        let mut config = handle();
        let unknown: AspellError = ConfigError::UnknownKey { key: "foo".into() }.into();
        assert_eq!(config.get("foo"), Err(unknown.clone()));
        assert_eq!(config.get_default("foo"), Err(unknown));
        assert!(matches!(
            config.set("foo", "bar"),
            Err(AspellError::Config(ConfigError::Rejected { ref key, .. })) if key == "foo"
        ));
        assert_eq!(
            config.reset("foo"),
            Err(ConfigError::ResetFailed { key: "foo".into() }.into())
        );
    }

    #[test]
    fn empty_value_is_not_unknown() {
        let mut config = handle();
        config.set("jargon", "").unwrap();
        assert_eq!(config.get("jargon").unwrap(), "");
    }

    #[test]
    fn invalid_suggestion_mode_leaves_value_untouched() {
        let mut config = handle();
        config.set("sug-mode", "fast").unwrap();
        assert_eq!(
            config.set("sug-mode", "slow"),
            Err(ConfigError::InvalidSuggestionMode { value: "slow".into() }.into())
        );
        assert_eq!(config.get("sug-mode").unwrap(), "fast");
    }

    #[test]
    fn rejected_value_leaves_value_untouched() {
        let mut config = handle();
        config.set("ignore-case", "true").unwrap();
        let err = config.set("ignore-case", "maybe").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("ignore-case"));
        assert_eq!(config.get("ignore-case").unwrap(), "true");
    }

    #[test]
    fn default_is_independent_of_current_value() {
        let mut config = handle();
        config.set("personal", "foo").unwrap();
        assert_eq!(config.get("personal").unwrap(), "foo");
        assert_eq!(config.get_default("personal").unwrap(), ".aspell.en_US.pws");
    }

    #[test]
    fn reset_restores_default() {
        let mut config = handle();
        config.set("personal", "foo").unwrap();
        config.reset("personal").unwrap();
        assert_eq!(
            config.get("personal").unwrap(),
            config.get_default("personal").unwrap()
        );
    }

    #[test]
    fn nul_bytes_never_reach_the_native_layer() {
        let mut config = handle();
        assert_eq!(
            config.set("lang\0", "en"),
            Err(AspellError::InvalidInput {
                kind: InputKind::Key,
                value: "lang\0".into(),
            })
        );
        assert_eq!(
            config.set("lang", "e\0n"),
            Err(AspellError::InvalidInput {
                kind: InputKind::Value,
                value: "e\0n".into(),
            })
        );
        assert_eq!(config.get("lang").unwrap(), "en_US");
    }
}
