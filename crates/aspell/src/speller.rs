// Speller: owning facade over one configuration and one checker.
//
// Lifecycle:
// - Open at construction, Closed after `close()`; Closed is terminal.
// - Every operation except `close` and `is_closed` fails with
//   `AspellError::Closed` once closed, before touching any handle.
// - A checker is a snapshot of the configuration. Each successful `set` or
//   `reset` releases the current checker and builds a new one, so at most
//   one checker is live per speller.
// - Release order is checker first, then configuration, exactly once each,
//   whether through `close`, the scoped `open`, or `Drop`.

use std::borrow::Cow;
use std::ffi::c_int;
use std::fmt;

use aspell_core::keys::{KEY_ENCODING, KEY_LANG};
use aspell_core::{AspellError, Codec, ConfigKey, DictionaryInfo, InputKind, Result, SuggestionMode};

use crate::backend::{Backend, RawChecker};
use crate::config::ConfigHandle;
use crate::options::SpellerOptions;
use crate::suggestions::decode_all;

/// Spell checker owning its native configuration and checker handles.
pub struct Speller<B: Backend> {
    backend: B,
    /// `None` once closed.
    state: Option<Open<B>>,
    validate_dictionary: bool,
}

/// Handles held while the speller is open.
struct Open<B: Backend> {
    /// `None` only after a failed rebuild. Declared before `config` so it is
    /// dropped first.
    checker: Option<B::Checker>,
    config: ConfigHandle<B::Config>,
}

impl<B: Backend> Open<B> {
    /// Codec for the encoding the current checker was built with.
    fn codec(&self) -> Result<Codec> {
        Codec::from_name(&self.config.get(KEY_ENCODING)?)
    }

    fn checker(&self) -> Result<&B::Checker> {
        self.checker.as_ref().ok_or(AspellError::CheckerUnavailable)
    }

    fn checker_mut(&mut self) -> Result<&mut B::Checker> {
        self.checker.as_mut().ok_or(AspellError::CheckerUnavailable)
    }

    fn release(self) {
        let Open { checker, config } = self;
        drop(checker);
        drop(config);
    }
}

impl<B: Backend> Speller<B> {
    /// Create a speller.
    ///
    /// `options.language` is written as `lang` first, then every pair in
    /// `options.options` in order, then the checker is built once. Handles
    /// created before a failure are released.
    pub fn new(backend: B, options: SpellerOptions) -> Result<Self> {
        let config = ConfigHandle::new(backend.new_config()?);
        let mut speller = Self {
            backend,
            state: Some(Open {
                checker: None,
                config,
            }),
            validate_dictionary: options.validate_dictionary,
        };

        let open = speller.open_mut()?;
        if let Some(language) = &options.language {
            open.config.set(KEY_LANG, language)?;
        }
        for (key, value) in &options.options {
            open.config.set(key, value)?;
        }
        speller.rebuild()?;

        tracing::debug!(language = ?options.language, pairs = options.options.len(), "speller opened");
        Ok(speller)
    }

    /// Scoped acquisition: build a speller, run `scope` with it, and close it
    /// on every exit from `scope`, including unwinding.
    ///
    /// Returns the value produced by `scope`; a `Result` returned by the
    /// closure is passed through untouched.
    pub fn open<R>(
        backend: B,
        options: SpellerOptions,
        scope: impl FnOnce(&mut Self) -> R,
    ) -> Result<R> {
        let mut speller = Self::new(backend, options)?;
        let guard = CloseOnExit(&mut speller);
        Ok(scope(&mut *guard.0))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Release the checker and the configuration. Fails when already closed.
    pub fn close(&mut self) -> Result<()> {
        let open = self.state.take().ok_or(AspellError::Closed)?;
        open.release();
        tracing::debug!("speller closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    fn open_ref(&self) -> Result<&Open<B>> {
        self.state.as_ref().ok_or(AspellError::Closed)
    }

    fn open_mut(&mut self) -> Result<&mut Open<B>> {
        self.state.as_mut().ok_or(AspellError::Closed)
    }

    /// Replace the checker with one built from the current configuration.
    ///
    /// When dictionary validation fails the new checker stays installed and
    /// the error is returned; there is no rollback to the previous checker.
    fn rebuild(&mut self) -> Result<()> {
        let open = self.state.as_mut().ok_or(AspellError::Closed)?;
        if open.checker.take().is_some() {
            tracing::trace!("released superseded checker");
        }
        open.checker = Some(self.backend.new_checker(open.config.raw())?);

        let language = open.config.get(KEY_LANG)?;
        tracing::debug!(%language, "checker rebuilt");

        if self.validate_dictionary {
            let dictionaries = self.backend.dictionaries(open.config.raw())?;
            if !dictionaries.iter().any(|d| d.matches_language(&language)) {
                tracing::warn!(%language, "no installed dictionary matches; checker left installed");
                return Err(AspellError::UnavailableDictionary {
                    language,
                    available: dictionaries.into_iter().map(|d| d.code).collect(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Checking
    // =========================================================================

    /// Whether `word` is spelled correctly.
    pub fn is_correct(&self, word: &str) -> Result<bool> {
        let open = self.open_ref()?;
        reject_nul(InputKind::Word, word)?;
        let codec = open.codec()?;
        let bytes = encode_word(codec, word)?;
        let correct = open.checker()?.check(&bytes)?;
        tracing::trace!(word, correct, "checked word");
        Ok(correct)
    }

    /// Replacement candidates for `word`, in the order the checker ranks them.
    ///
    /// Returns an empty list when there are no candidates.
    pub fn suggestions(&mut self, word: &str) -> Result<Vec<String>> {
        let open = self.open_mut()?;
        reject_nul(InputKind::Word, word)?;
        let codec = open.codec()?;
        let bytes = encode_word(codec, word)?;
        let enumeration = open.checker_mut()?.suggest(&bytes)?;
        let suggestions = decode_all(enumeration, codec)?;
        tracing::trace!(word, count = suggestions.len(), "collected suggestions");
        Ok(suggestions)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Write a configuration item and rebuild the checker.
    ///
    /// `sug-mode` values are validated before anything is written. Errors from
    /// the rebuild (`Native`, `UnavailableDictionary`) are reported after the
    /// write, so the new value stays stored.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl fmt::Display) -> Result<()> {
        self.open_mut()?.config.set(key.as_ref(), &value.to_string())?;
        self.rebuild()
    }

    /// Current value of a configuration item.
    pub fn get(&self, key: impl AsRef<str>) -> Result<String> {
        self.open_ref()?.config.get(key.as_ref())
    }

    /// Schema default of a configuration item.
    pub fn get_default(&self, key: impl AsRef<str>) -> Result<String> {
        self.open_ref()?.config.get_default(key.as_ref())
    }

    /// Restore a configuration item to its default and rebuild the checker.
    pub fn reset(&mut self, key: impl AsRef<str>) -> Result<()> {
        self.open_mut()?.config.reset(key.as_ref())?;
        self.rebuild()
    }

    pub fn set_suggestion_mode(&mut self, mode: SuggestionMode) -> Result<()> {
        self.set(ConfigKey::SugMode, mode)
    }

    /// The stored `sug-mode`, parsed.
    ///
    /// Fails with `InvalidSuggestionMode` when the stored value is not one of
    /// the four modes, which can only happen if the native configuration
    /// was given it by other means (an Aspell config file, for instance).
    pub fn suggestion_mode(&self) -> Result<SuggestionMode> {
        Ok(self.get(ConfigKey::SugMode)?.parse()?)
    }

    /// The configured `lang`.
    pub fn language(&self) -> Result<String> {
        self.get(ConfigKey::Lang)
    }

    /// Dictionaries visible to the current configuration.
    pub fn dictionaries(&self) -> Result<Vec<DictionaryInfo>> {
        let open = self.open_ref()?;
        self.backend.dictionaries(open.config.raw())
    }

    // =========================================================================
    // Word lists
    //
    // These act on the current checker. A rebuild starts from the files on
    // disk, so unsaved personal words and all session words are lost.
    // =========================================================================

    pub fn add_to_personal(&mut self, word: &str) -> Result<()> {
        self.with_word(word, |checker, bytes| checker.add_to_personal(bytes))
    }

    pub fn add_to_session(&mut self, word: &str) -> Result<()> {
        self.with_word(word, |checker, bytes| checker.add_to_session(bytes))
    }

    pub fn clear_session(&mut self) -> Result<()> {
        self.open_mut()?.checker_mut()?.clear_session()
    }

    /// Write the personal word list and replacement list to disk.
    pub fn save_all_word_lists(&mut self) -> Result<()> {
        self.open_mut()?.checker_mut()?.save_all_word_lists()
    }

    /// Teach the checker that `misspelled` should be suggested as `correct`.
    pub fn store_replacement(&mut self, misspelled: &str, correct: &str) -> Result<()> {
        let open = self.open_mut()?;
        reject_nul(InputKind::Word, misspelled)?;
        reject_nul(InputKind::Word, correct)?;
        let codec = open.codec()?;
        let misspelled = encode_word(codec, misspelled)?;
        let correct = encode_word(codec, correct)?;
        open.checker_mut()?.store_replacement(&misspelled, &correct)
    }

    fn with_word(
        &mut self,
        word: &str,
        op: impl FnOnce(&mut B::Checker, &[u8]) -> Result<()>,
    ) -> Result<()> {
        let open = self.open_mut()?;
        reject_nul(InputKind::Word, word)?;
        let codec = open.codec()?;
        let bytes = encode_word(codec, word)?;
        op(open.checker_mut()?, &bytes)
    }
}

impl<B: Backend> Drop for Speller<B> {
    fn drop(&mut self) {
        if let Some(open) = self.state.take() {
            tracing::debug!("speller dropped while open; releasing handles");
            open.release();
        }
    }
}

impl<B: Backend> fmt::Debug for Speller<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speller")
            .field("closed", &self.is_closed())
            .field("validate_dictionary", &self.validate_dictionary)
            .finish_non_exhaustive()
    }
}

/// Closes the borrowed speller when dropped, unless it is already closed.
struct CloseOnExit<'a, B: Backend>(&'a mut Speller<B>);

impl<B: Backend> Drop for CloseOnExit<'_, B> {
    fn drop(&mut self) {
        if !self.0.is_closed() {
            // Cannot fail: the only error is `Closed`, excluded above.
            let _ = self.0.close();
        }
    }
}

fn reject_nul(kind: InputKind, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(AspellError::InvalidInput {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Encode a word and make sure its byte length fits the native `int`.
fn encode_word(codec: Codec, word: &str) -> Result<Cow<'_, [u8]>> {
    let bytes = codec.encode(word)?;
    if c_int::try_from(bytes.len()).is_err() {
        return Err(AspellError::TooLong {
            kind: InputKind::Word,
            len: bytes.len(),
        });
    }
    Ok(bytes)
}
