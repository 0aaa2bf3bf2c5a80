//! Safe owning wrapper around GNU Aspell.
//!
//! A [`Speller`] owns one configuration and one checker built from it.
//! Changing the configuration rebuilds the checker; closing the speller
//! releases both, after which every operation fails with
//! [`AspellError::Closed`].
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> aspell::Result<()> {
//! use aspell::native::Aspell;
//! use aspell::{Speller, SpellerOptions, SuggestionMode};
//!
//! let words = Speller::open(Aspell, SpellerOptions::for_language("en"), |speller| {
//!     speller.set_suggestion_mode(SuggestionMode::BadSpellers)?;
//!     speller.suggestions("cookei")
//! })??;
//! assert!(words.iter().any(|w| w == "cookie"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```
//!
//! - [`backend`] -- Traits a native library implementation provides
//! - [`config`] -- Validated key/value access to a configuration handle
//! - [`speller`] -- The owning facade and its rebuild protocol
//! - [`suggestions`] -- Enumeration adapter and decoding
//! - [`options`] -- Construction options
//! - [`memory`] -- In-process backend used by the tests and benches
//! - `native` -- libaspell backend (feature `native`)

pub mod backend;
pub mod config;
pub mod memory;
#[cfg(feature = "native")]
pub mod native;
pub mod options;
pub mod speller;
pub mod suggestions;

pub use aspell_core::{
    AspellError, Codec, ConfigError, ConfigKey, DictionaryInfo, InputKind, Result, SuggestionMode,
};
pub use backend::Backend;
pub use memory::MemoryBackend;
pub use options::SpellerOptions;
pub use speller::Speller;

#[cfg(feature = "native")]
pub use native::AspellSpeller;
