// Raw declarations for the subset of the libaspell C API the backend uses.
//
// Ownership, as documented by aspell.h:
// - `new_*` results are owned by the caller and freed with the matching
//   `delete_*`.
// - `const char *` results are owned by the object they came from and stay
//   valid until the next call on that object.
// - Word lists returned by `aspell_speller_suggest` belong to the speller and
//   are invalidated by the next suggestion call.
// - The dictionary info list belongs to the configuration.

use std::ffi::{c_char, c_int, c_uint};
use std::marker::{PhantomData, PhantomPinned};

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _data: [u8; 0],
                _marker: PhantomData<(*mut u8, PhantomPinned)>,
            }
        )*
    };
}

opaque!(
    AspellConfig,
    AspellCanHaveError,
    AspellSpeller,
    AspellWordList,
    AspellStringEnumeration,
    AspellDictInfoList,
    AspellDictInfoEnumeration,
    AspellModuleInfo,
);

#[repr(C)]
pub struct AspellDictInfo {
    /// Full dictionary name, e.g. `en_US-w_accents`.
    pub name: *const c_char,
    pub code: *const c_char,
    pub jargon: *const c_char,
    pub size: c_int,
    pub size_str: *const c_char,
    pub module: *mut AspellModuleInfo,
}

#[link(name = "aspell")]
unsafe extern "C" {
    // Configuration
    pub fn new_aspell_config() -> *mut AspellConfig;
    pub fn delete_aspell_config(config: *mut AspellConfig);
    pub fn aspell_config_retrieve(config: *mut AspellConfig, key: *const c_char) -> *const c_char;
    pub fn aspell_config_get_default(
        config: *mut AspellConfig,
        key: *const c_char,
    ) -> *const c_char;
    pub fn aspell_config_replace(
        config: *mut AspellConfig,
        key: *const c_char,
        value: *const c_char,
    ) -> c_int;
    pub fn aspell_config_remove(config: *mut AspellConfig, key: *const c_char) -> c_int;
    pub fn aspell_config_error_message(config: *const AspellConfig) -> *const c_char;

    // Checker creation
    pub fn new_aspell_speller(config: *mut AspellConfig) -> *mut AspellCanHaveError;
    pub fn aspell_error_number(possible: *const AspellCanHaveError) -> c_uint;
    pub fn aspell_error_message(possible: *const AspellCanHaveError) -> *const c_char;
    pub fn to_aspell_speller(possible: *mut AspellCanHaveError) -> *mut AspellSpeller;
    pub fn delete_aspell_can_have_error(possible: *mut AspellCanHaveError);

    // Checker
    pub fn delete_aspell_speller(speller: *mut AspellSpeller);
    pub fn aspell_speller_check(
        speller: *mut AspellSpeller,
        word: *const c_char,
        word_size: c_int,
    ) -> c_int;
    pub fn aspell_speller_suggest(
        speller: *mut AspellSpeller,
        word: *const c_char,
        word_size: c_int,
    ) -> *const AspellWordList;
    pub fn aspell_speller_error_message(speller: *const AspellSpeller) -> *const c_char;
    pub fn aspell_speller_add_to_personal(
        speller: *mut AspellSpeller,
        word: *const c_char,
        word_size: c_int,
    ) -> c_int;
    pub fn aspell_speller_add_to_session(
        speller: *mut AspellSpeller,
        word: *const c_char,
        word_size: c_int,
    ) -> c_int;
    pub fn aspell_speller_clear_session(speller: *mut AspellSpeller) -> c_int;
    pub fn aspell_speller_save_all_word_lists(speller: *mut AspellSpeller) -> c_int;
    pub fn aspell_speller_store_replacement(
        speller: *mut AspellSpeller,
        mis: *const c_char,
        mis_size: c_int,
        cor: *const c_char,
        cor_size: c_int,
    ) -> c_int;

    // Word lists
    pub fn aspell_word_list_elements(list: *const AspellWordList) -> *mut AspellStringEnumeration;
    pub fn aspell_string_enumeration_next(
        enumeration: *mut AspellStringEnumeration,
    ) -> *const c_char;
    pub fn delete_aspell_string_enumeration(enumeration: *mut AspellStringEnumeration);

    // Installed dictionaries
    pub fn get_aspell_dict_info_list(config: *mut AspellConfig) -> *mut AspellDictInfoList;
    pub fn aspell_dict_info_list_elements(
        list: *const AspellDictInfoList,
    ) -> *mut AspellDictInfoEnumeration;
    pub fn aspell_dict_info_enumeration_next(
        enumeration: *mut AspellDictInfoEnumeration,
    ) -> *const AspellDictInfo;
    pub fn delete_aspell_dict_info_enumeration(enumeration: *mut AspellDictInfoEnumeration);
}
