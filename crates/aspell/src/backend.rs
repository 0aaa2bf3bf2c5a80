// Backend seam: the handle-based interface the speller drives.
//
// A backend owns nothing itself; it hands out configuration and checker
// handles whose `Drop` releases the underlying resource exactly once. The
// libaspell backend lives in `native` (feature `native`), the in-process test
// double in `memory`.

use std::ffi::CStr;

use aspell_core::{DictionaryInfo, Result};

/// Factory for configuration and checker handles.
pub trait Backend {
    /// Owned configuration handle.
    type Config: RawConfig;

    /// Owned checker handle built from a configuration snapshot.
    type Checker: RawChecker;

    /// Create a configuration holding the schema defaults.
    fn new_config(&self) -> Result<Self::Config>;

    /// Build a checker from the current state of `config`.
    ///
    /// The checker does not observe later changes to `config`.
    fn new_checker(&self, config: &Self::Config) -> Result<Self::Checker>;

    /// Dictionaries visible to `config` (its `dict-dir`, `data-dir`, ...).
    fn dictionaries(&self, config: &Self::Config) -> Result<Vec<DictionaryInfo>>;
}

/// Native configuration: a string-keyed map with schema defaults.
///
/// Keys and values arrive as C strings; NUL validation happens once, in
/// [`ConfigHandle`](crate::config::ConfigHandle).
pub trait RawConfig {
    /// Current value of `key`, or `None` when the key is not in the schema.
    fn retrieve(&self, key: &CStr) -> Option<String>;

    /// Schema default of `key`, or `None` when the key is not in the schema.
    fn retrieve_default(&self, key: &CStr) -> Option<String>;

    /// Replace the value of `key`. On failure the previous value is kept and
    /// the native error message is returned.
    fn replace(&mut self, key: &CStr, value: &CStr) -> std::result::Result<(), String>;

    /// Restore the default of `key`. Returns `false` when the native layer
    /// refuses (typically an unknown key).
    fn remove(&mut self, key: &CStr) -> bool;
}

/// Native checker. Words are byte strings in the configured encoding.
pub trait RawChecker {
    /// Pull-style enumeration of suggestions, borrowing the checker.
    type Enumeration<'a>: RawEnumeration
    where
        Self: 'a;

    fn check(&self, word: &[u8]) -> Result<bool>;

    /// Start a suggestion enumeration for `word`.
    ///
    /// Takes `&mut self`: the native word list is overwritten by the next
    /// suggestion call, so only one enumeration may be live at a time.
    fn suggest(&mut self, word: &[u8]) -> Result<Self::Enumeration<'_>>;

    fn add_to_personal(&mut self, word: &[u8]) -> Result<()>;

    fn add_to_session(&mut self, word: &[u8]) -> Result<()>;

    fn clear_session(&mut self) -> Result<()>;

    /// Persist the personal word list and the replacement list.
    fn save_all_word_lists(&mut self) -> Result<()>;

    /// Record that `misspelled` should be suggested as `correct`.
    fn store_replacement(&mut self, misspelled: &[u8], correct: &[u8]) -> Result<()>;
}

/// Next-or-sentinel enumeration. Dropping it releases the native resource.
pub trait RawEnumeration {
    /// The next element, or `None` once the native null sentinel is reached.
    fn next_element(&mut self) -> Option<Vec<u8>>;
}
