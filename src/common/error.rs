use crate::languages::LanguagePair;
use std::fmt;

/// Failures surfaced by the translation layer.
///
/// Every failure is returned as a value; nothing in this crate panics across
/// the API boundary. The host decides how to render each variant.
#[derive(Debug)]
pub enum TranslatorError {
    /// Request text was empty or whitespace-only. User-correctable; no
    /// history entry is created.
    EmptyInput,

    /// The requested (source, target) combination has no configured model.
    UnsupportedPair { source: String, target: String },

    /// Loading the model for a direction failed. The registry keeps no
    /// partial entry, so a later call may retry.
    ModelLoad { pair: LanguagePair, cause: String },

    /// A usable model could not be obtained for the request's direction.
    ModelUnavailable(LanguagePair),

    /// Encoding, generation or decoding failed.
    Inference(String),

    /// Gave up waiting for another caller's in-flight load of this pair.
    Timeout { pair: LanguagePair },

    IOError(String),

    InvalidConfiguration(String),
}

impl fmt::Display for TranslatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslatorError::EmptyInput => write!(f, "input text is empty"),
            TranslatorError::UnsupportedPair { source, target } => {
                write!(f, "no translation model configured for {} -> {}", source, target)
            }
            TranslatorError::ModelLoad { pair, cause } => {
                write!(f, "failed to load {} model: {}", pair, cause)
            }
            TranslatorError::ModelUnavailable(pair) => {
                write!(f, "translation model for {} is not available", pair)
            }
            TranslatorError::Inference(msg) => write!(f, "inference error: {}", msg),
            TranslatorError::Timeout { pair } => {
                write!(f, "timed out waiting for the {} model to load", pair)
            }
            TranslatorError::IOError(msg) => write!(f, "IO error: {}", msg),
            TranslatorError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for TranslatorError {}

impl From<std::io::Error> for TranslatorError {
    fn from(error: std::io::Error) -> Self {
        TranslatorError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(error: serde_json::Error) -> Self {
        TranslatorError::InvalidConfiguration(error.to_string())
    }
}
