use thiserror::Error;

/// Failure writing preferences to durable storage.
///
/// Reads never produce an error: a missing or unreadable entry is treated as
/// "nothing saved".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("writing `{key}` failed: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized language code `{0}`")]
pub struct UnknownLanguage(pub String);

/// Problems found while reading the options object handed to `init`.
///
/// None of these abort initialization; the offending entry is ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("init options must be an object")]
    NotAnObject,
    #[error("unrecognized option `{0}`")]
    UnknownKey(String),
    #[error("unrecognized position `{0}`, expected bottom-right, bottom-left, top-right or top-left")]
    InvalidPosition(String),
    #[error("unrecognized theme `{0}`, expected light, dark or auto")]
    InvalidTheme(String),
}
