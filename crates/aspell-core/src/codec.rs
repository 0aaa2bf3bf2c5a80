// Conversion between Rust strings and the encoding named by the `encoding` key.
//
// Aspell exchanges words as byte strings in the configured encoding. Rust
// strings are UTF-8, so UTF-8 configurations pass through unchanged and the
// single-byte encodings map code points directly.

use std::borrow::Cow;

use crate::error::{AspellError, Result};

/// A text encoding the bindings can convert to and from.
///
/// Only UTF-8, ISO-8859-1 and ASCII are covered. Other encodings Aspell
/// supports (`iso-8859-2` to `iso-8859-15`, `koi8-r`, `cp125x`, ...) fail
/// with `UnsupportedEncoding` on every word operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Utf8,
    /// ISO-8859-1; code points U+0000..=U+00FF map to the same byte.
    Latin1,
    Ascii,
}

impl Codec {
    /// Resolve an encoding name as reported by the native configuration.
    ///
    /// Matching ignores case and the `-`/`_` separators, so `UTF-8`, `utf8`
    /// and `utf_8` all resolve to [`Codec::Utf8`].
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Codec::Utf8),
            "iso88591" | "latin1" | "l1" => Ok(Codec::Latin1),
            "ascii" | "usascii" | "ansix3.41968" => Ok(Codec::Ascii),
            _ => Err(AspellError::UnsupportedEncoding(name.to_string())),
        }
    }

    /// Canonical name, as written back to the configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Codec::Utf8 => "utf-8",
            Codec::Latin1 => "iso-8859-1",
            Codec::Ascii => "ascii",
        }
    }

    /// Encode `text` for the native layer.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>> {
        match self {
            Codec::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            Codec::Ascii if text.is_ascii() => Ok(Cow::Borrowed(text.as_bytes())),
            Codec::Ascii => Err(self.unrepresentable(text)),
            Codec::Latin1 => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                text.chars()
                    .map(|c| u8::try_from(u32::from(c)).ok())
                    .collect::<Option<Vec<u8>>>()
                    .map(Cow::Owned)
                    .ok_or_else(|| self.unrepresentable(text))
            }
        }
    }

    /// Decode a native byte string into a Rust string.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Codec::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|_| self.unrepresentable(&String::from_utf8_lossy(bytes))),
            Codec::Ascii if bytes.is_ascii() => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Codec::Ascii => Err(self.unrepresentable(&String::from_utf8_lossy(bytes))),
            Codec::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    fn unrepresentable(self, text: &str) -> AspellError {
        AspellError::Encoding {
            text: text.to_string(),
            encoding: self.name(),
        }
    }
}
