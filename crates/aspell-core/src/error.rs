// Error taxonomy for configuration, checking and lifecycle failures.

use std::fmt;

/// Convenience alias used throughout the bindings.
pub type Result<T> = std::result::Result<T, AspellError>;

/// What kind of caller-supplied value an input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A word passed to a check or suggestion call.
    Word,
    /// A configuration key.
    Key,
    /// A configuration value.
    Value,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Word => "word",
            InputKind::Key => "configuration key",
            InputKind::Value => "configuration value",
        })
    }
}

/// Configuration failures. Every variant names the offending key or value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The key is not part of the native configuration schema.
    #[error("the configuration item {key} does not exist")]
    UnknownKey { key: String },

    /// `sug-mode` was given a value outside the supported modes.
    #[error("the suggestion mode {value} is invalid")]
    InvalidSuggestionMode { value: String },

    /// The native layer refused the replacement.
    #[error("failed to set the configuration item {key} to {value:?}: {message}")]
    Rejected {
        key: String,
        value: String,
        message: String,
    },

    /// The native layer refused to restore the default.
    #[error("the configuration item {key} could not be reset, most likely it doesn't exist")]
    ResetFailed { key: String },
}

/// Error type for every fallible operation in the bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AspellError {
    /// A string cannot cross into C because it contains a NUL byte.
    #[error("{kind} must not contain a NUL byte: {value:?}")]
    InvalidInput { kind: InputKind, value: String },

    /// The encoded input does not fit the native `int` length parameter.
    #[error("{kind} is too long for the native layer ({len} bytes)")]
    TooLong { kind: InputKind, len: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured language has no installed dictionary.
    #[error("no installed dictionary matches language {language:?} (available: {})", .available.join(", "))]
    UnavailableDictionary {
        language: String,
        available: Vec<String>,
    },

    /// The speller was closed before this call.
    #[error("speller has already been closed")]
    Closed,

    /// The previous rebuild failed and no checker is installed.
    #[error("no checker is installed because the last rebuild failed")]
    CheckerUnavailable,

    /// A native call reported failure.
    #[error("{operation} failed: {message}")]
    Native {
        operation: &'static str,
        message: String,
    },

    /// Text cannot be represented in the configured encoding.
    #[error("cannot represent {text:?} in {encoding}")]
    Encoding {
        text: String,
        encoding: &'static str,
    },

    /// The `encoding` key names an encoding the bindings cannot convert.
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
}

impl AspellError {
    /// Build a [`AspellError::Native`] from an operation name and message.
    pub fn native(operation: &'static str, message: impl Into<String>) -> Self {
        AspellError::Native {
            operation,
            message: message.into(),
        }
    }

    /// Whether this is the uniform "already closed" failure.
    pub fn is_closed(&self) -> bool {
        matches!(self, AspellError::Closed)
    }

    /// Whether this is a configuration failure of any kind.
    pub fn is_config(&self) -> bool {
        matches!(self, AspellError::Config(_))
    }
}
