//! Language vocabulary and direction keys for the supported model set.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Languages this crate translates between.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub fn get_iso_639_1_code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// Label shown to users, in the language's own script where that is the
    /// convention.
    pub fn native_label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी (Hindi)",
        }
    }

    pub fn from_iso_639_1_code(code: &str) -> Option<Language> {
        CODE_LOOKUP.get(code).copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

lazy_static! {
    static ref CODE_LOOKUP: HashMap<&'static str, Language> = {
        let mut languages = HashMap::new();
        languages.insert("en", Language::English);
        languages.insert("hi", Language::Hindi);
        languages
    };
}

/// Display-name to ISO-code mapping exposed to the host layer's language
/// selectors, in presentation order.
pub const LANGUAGE_OPTIONS: [(&str, &str); 2] = [("English", "en"), ("हिंदी (Hindi)", "hi")];

/// Ordered (source, target) pair identifying one translation model.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub const ENGLISH2HINDI: LanguagePair = LanguagePair {
        source: Language::English,
        target: Language::Hindi,
    };
    pub const HINDI2ENGLISH: LanguagePair = LanguagePair {
        source: Language::Hindi,
        target: Language::English,
    };

    /// Every pair a model is configured for.
    pub const SUPPORTED: [LanguagePair; 2] = [Self::ENGLISH2HINDI, Self::HINDI2ENGLISH];

    pub fn new(source: Language, target: Language) -> LanguagePair {
        LanguagePair { source, target }
    }

    /// Resolve raw ISO codes into a pair. `None` if either code is unknown.
    pub fn from_codes(source: &str, target: &str) -> Option<LanguagePair> {
        let source = Language::from_iso_639_1_code(source)?;
        let target = Language::from_iso_639_1_code(target)?;
        Some(LanguagePair { source, target })
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Subdirectory of the local models directory holding this pair's files.
    pub fn cache_subdir(&self) -> String {
        format!(
            "{}-{}",
            self.source.get_iso_639_1_code(),
            self.target.get_iso_639_1_code()
        )
    }

    /// Checkpoint identifier on the remote model hub.
    pub fn remote_identifier(&self) -> String {
        format!(
            "Helsinki-NLP/opus-mt-{}-{}",
            self.source.get_iso_639_1_code(),
            self.target.get_iso_639_1_code()
        )
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.source.get_iso_639_1_code(),
            self.target.get_iso_639_1_code()
        )
    }
}
