// libaspell backend.
//
// Every native pointer is wrapped in an owned `foreign_type!` handle whose
// `Drop` calls the matching `delete_*` function, so releases happen exactly
// once and in reverse order of ownership. Strings returned by the library are
// borrowed from the object they came from and are copied out immediately.

pub mod sys;

use std::ffi::{CStr, c_char, c_int};
use std::marker::PhantomData;

use foreign_types::{ForeignType, foreign_type};

use aspell_core::{AspellError, DictionaryInfo, InputKind, Result};

use crate::backend::{Backend, RawChecker, RawConfig, RawEnumeration};
use crate::speller::Speller;

/// Speller backed by the system libaspell.
pub type AspellSpeller = Speller<Aspell>;

foreign_type! {
    /// Owned `AspellConfig`.
    pub unsafe type NativeConfig: Send {
        type CType = sys::AspellConfig;
        fn drop = sys::delete_aspell_config;
    }

    /// Owned `AspellSpeller`.
    pub unsafe type NativeChecker: Send {
        type CType = sys::AspellSpeller;
        fn drop = sys::delete_aspell_speller;
    }

    /// Owned `AspellStringEnumeration` over a checker's word list.
    pub unsafe type StringEnumeration {
        type CType = sys::AspellStringEnumeration;
        fn drop = sys::delete_aspell_string_enumeration;
    }

    /// Owned `AspellDictInfoEnumeration`.
    pub unsafe type DictInfoEnumeration {
        type CType = sys::AspellDictInfoEnumeration;
        fn drop = sys::delete_aspell_dict_info_enumeration;
    }
}

/// The libaspell library.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aspell;

impl Backend for Aspell {
    type Config = NativeConfig;
    type Checker = NativeChecker;

    fn new_config(&self) -> Result<NativeConfig> {
        let ptr = unsafe { sys::new_aspell_config() };
        if ptr.is_null() {
            return Err(AspellError::native(
                "new_aspell_config",
                "no configuration returned",
            ));
        }
        Ok(unsafe { NativeConfig::from_ptr(ptr) })
    }

    fn new_checker(&self, config: &NativeConfig) -> Result<NativeChecker> {
        let possible = unsafe { sys::new_aspell_speller(config.as_ptr()) };
        if possible.is_null() {
            return Err(AspellError::native(
                "new_aspell_speller",
                "no checker returned",
            ));
        }
        if unsafe { sys::aspell_error_number(possible) } != 0 {
            let message = unsafe { owned_string(sys::aspell_error_message(possible)) };
            unsafe { sys::delete_aspell_can_have_error(possible) };
            return Err(AspellError::native(
                "new_aspell_speller",
                message.unwrap_or_default(),
            ));
        }
        let checker = unsafe { sys::to_aspell_speller(possible) };
        Ok(unsafe { NativeChecker::from_ptr(checker) })
    }

    fn dictionaries(&self, config: &NativeConfig) -> Result<Vec<DictionaryInfo>> {
        // The list itself belongs to the configuration.
        let list = unsafe { sys::get_aspell_dict_info_list(config.as_ptr()) };
        if list.is_null() {
            return Ok(Vec::new());
        }
        let elements = unsafe { sys::aspell_dict_info_list_elements(list) };
        if elements.is_null() {
            return Ok(Vec::new());
        }
        let elements = unsafe { DictInfoEnumeration::from_ptr(elements) };

        let mut dictionaries = Vec::new();
        loop {
            let info = unsafe { sys::aspell_dict_info_enumeration_next(elements.as_ptr()) };
            let Some(info) = (unsafe { info.as_ref() }) else {
                break;
            };
            dictionaries.push(unsafe { dictionary_info(info) });
        }
        tracing::trace!(count = dictionaries.len(), "listed installed dictionaries");
        Ok(dictionaries)
    }
}

impl RawConfig for NativeConfig {
    fn retrieve(&self, key: &CStr) -> Option<String> {
        unsafe { owned_string(sys::aspell_config_retrieve(self.as_ptr(), key.as_ptr())) }
    }

    fn retrieve_default(&self, key: &CStr) -> Option<String> {
        unsafe { owned_string(sys::aspell_config_get_default(self.as_ptr(), key.as_ptr())) }
    }

    fn replace(&mut self, key: &CStr, value: &CStr) -> std::result::Result<(), String> {
        let ok = unsafe { sys::aspell_config_replace(self.as_ptr(), key.as_ptr(), value.as_ptr()) };
        if ok == 0 {
            return Err(self.error_message());
        }
        Ok(())
    }

    fn remove(&mut self, key: &CStr) -> bool {
        unsafe { sys::aspell_config_remove(self.as_ptr(), key.as_ptr()) != 0 }
    }
}

impl NativeConfig {
    fn error_message(&self) -> String {
        unsafe { owned_string(sys::aspell_config_error_message(self.as_ptr())) }.unwrap_or_default()
    }
}

impl NativeChecker {
    fn error(&self, operation: &'static str) -> AspellError {
        let message = unsafe { owned_string(sys::aspell_speller_error_message(self.as_ptr())) };
        AspellError::native(operation, message.unwrap_or_default())
    }

    /// Map a native `0 = failure` status to a result.
    fn status(&self, operation: &'static str, status: c_int) -> Result<()> {
        if status == 0 {
            return Err(self.error(operation));
        }
        Ok(())
    }
}

impl RawChecker for NativeChecker {
    type Enumeration<'a> = Suggestions<'a>;

    fn check(&self, word: &[u8]) -> Result<bool> {
        let len = word_len(word)?;
        let status = unsafe { sys::aspell_speller_check(self.as_ptr(), word_ptr(word), len) };
        match status {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(self.error("aspell_speller_check")),
        }
    }

    fn suggest(&mut self, word: &[u8]) -> Result<Suggestions<'_>> {
        let len = word_len(word)?;
        let list = unsafe { sys::aspell_speller_suggest(self.as_ptr(), word_ptr(word), len) };
        if list.is_null() {
            return Err(self.error("aspell_speller_suggest"));
        }
        let elements = unsafe { sys::aspell_word_list_elements(list) };
        if elements.is_null() {
            return Err(self.error("aspell_word_list_elements"));
        }
        Ok(Suggestions {
            elements: unsafe { StringEnumeration::from_ptr(elements) },
            _checker: PhantomData,
        })
    }

    fn add_to_personal(&mut self, word: &[u8]) -> Result<()> {
        let len = word_len(word)?;
        let status =
            unsafe { sys::aspell_speller_add_to_personal(self.as_ptr(), word_ptr(word), len) };
        self.status("aspell_speller_add_to_personal", status)
    }

    fn add_to_session(&mut self, word: &[u8]) -> Result<()> {
        let len = word_len(word)?;
        let status =
            unsafe { sys::aspell_speller_add_to_session(self.as_ptr(), word_ptr(word), len) };
        self.status("aspell_speller_add_to_session", status)
    }

    fn clear_session(&mut self) -> Result<()> {
        let status = unsafe { sys::aspell_speller_clear_session(self.as_ptr()) };
        self.status("aspell_speller_clear_session", status)
    }

    fn save_all_word_lists(&mut self) -> Result<()> {
        let status = unsafe { sys::aspell_speller_save_all_word_lists(self.as_ptr()) };
        self.status("aspell_speller_save_all_word_lists", status)
    }

    fn store_replacement(&mut self, misspelled: &[u8], correct: &[u8]) -> Result<()> {
        let mis_len = word_len(misspelled)?;
        let cor_len = word_len(correct)?;
        let status = unsafe {
            sys::aspell_speller_store_replacement(
                self.as_ptr(),
                word_ptr(misspelled),
                mis_len,
                word_ptr(correct),
                cor_len,
            )
        };
        self.status("aspell_speller_store_replacement", status)
    }
}

/// Suggestion enumeration borrowing the checker whose word list it walks.
pub struct Suggestions<'a> {
    elements: StringEnumeration,
    _checker: PhantomData<&'a mut NativeChecker>,
}

impl RawEnumeration for Suggestions<'_> {
    fn next_element(&mut self) -> Option<Vec<u8>> {
        let ptr = unsafe { sys::aspell_string_enumeration_next(self.elements.as_ptr()) };
        if ptr.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(ptr) }.to_bytes().to_vec())
    }
}

fn word_ptr(word: &[u8]) -> *const c_char {
    word.as_ptr().cast()
}

fn word_len(word: &[u8]) -> Result<c_int> {
    c_int::try_from(word.len()).map_err(|_| AspellError::TooLong {
        kind: InputKind::Word,
        len: word.len(),
    })
}

/// Copy a library-owned string. `None` for a null pointer.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// # Safety
/// The string fields of `info` must be null or valid C strings.
unsafe fn dictionary_info(info: &sys::AspellDictInfo) -> DictionaryInfo {
    unsafe {
        DictionaryInfo {
            name: owned_string(info.name).unwrap_or_default(),
            code: owned_string(info.code).unwrap_or_default(),
            jargon: owned_string(info.jargon).unwrap_or_default(),
            size: u32::try_from(info.size).unwrap_or(0),
            size_str: owned_string(info.size_str).unwrap_or_default(),
        }
    }
}
