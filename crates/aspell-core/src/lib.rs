//! Shared types for the Aspell bindings.
//!
//! Nothing in this crate touches native code. It defines the vocabulary the
//! `aspell` crate and its backends agree on.
//!
//! - [`error`] -- Error taxonomy shared by every operation
//! - [`keys`] -- Configuration key names, string and symbolic forms
//! - [`mode`] -- The `sug-mode` enumeration
//! - [`dictionary`] -- Installed-dictionary records
//! - [`codec`] -- Conversion between Rust strings and the configured encoding

pub mod codec;
pub mod dictionary;
pub mod error;
pub mod keys;
pub mod mode;

pub use codec::Codec;
pub use dictionary::DictionaryInfo;
pub use error::{AspellError, ConfigError, InputKind, Result};
pub use keys::ConfigKey;
pub use mode::SuggestionMode;
