// Copyright 2024 opus-translate authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turning requests into translations.

use crate::common::error::TranslatorError;
use crate::history::HistoryEntry;
use crate::languages::LanguagePair;
use crate::registry::ModelRegistry;
use crate::session::SessionContext;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Confidence reported with every successful translation.
///
/// A fixed placeholder carried over from the deployed service, not a
/// model-derived estimate. Real confidence would have to come from the
/// generation scores of the model provider.
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.85;

/// One translation request. Built per call, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(text: &str, source_lang: &str, target_lang: &str) -> TranslationRequest {
        TranslationRequest {
            text: text.to_owned(),
            source_lang: source_lang.to_owned(),
            target_lang: target_lang.to_owned(),
        }
    }
}

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub input_text: String,
    pub output_text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Always [`PLACEHOLDER_CONFIDENCE`]; see that constant's documentation.
    pub confidence: f64,
}

impl Translation {
    /// Whitespace-separated word count of the input, as shown in the stats
    /// row.
    pub fn word_count(&self) -> usize {
        self.input_text.split_whitespace().count()
    }

    /// Character count of the input.
    pub fn char_count(&self) -> usize {
        self.input_text.chars().count()
    }
}

/// Stateless request handler.
///
/// Resolves a session's selected direction to a cached model through the
/// shared [`ModelRegistry`], runs inference and records successes in the
/// calling session's history. One service instance serves every session.
pub struct TranslationService {
    registry: Arc<ModelRegistry>,
}

impl TranslationService {
    pub fn new(registry: Arc<ModelRegistry>) -> TranslationService {
        TranslationService { registry }
    }

    /// Translate `text` using the session's selected language pair.
    ///
    /// On success the translation is appended to the session's history,
    /// stamped with the current wall-clock time. Failures leave the history
    /// untouched and are returned as values for the host to render.
    ///
    /// The input is trimmed before validation, and anything beyond the
    /// configured maximum token length is silently truncated by the model's
    /// tokenizer rather than rejected.
    pub fn translate(
        &self,
        session: &mut SessionContext,
        text: &str,
    ) -> Result<Translation, TranslatorError> {
        let request = TranslationRequest::new(text, session.source_lang(), session.target_lang());
        let translation = self.run(&request)?;
        session.history_mut().append(HistoryEntry {
            input_text: translation.input_text.clone(),
            output_text: translation.output_text.clone(),
            source_lang: translation.source_lang.clone(),
            target_lang: translation.target_lang.clone(),
            timestamp: Utc::now(),
        });
        Ok(translation)
    }

    fn run(&self, request: &TranslationRequest) -> Result<Translation, TranslatorError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(TranslatorError::EmptyInput);
        }

        let pair = resolve_pair(request)?;
        let handle = match self.registry.acquire(pair) {
            Ok(handle) => handle,
            Err(err @ TranslatorError::UnsupportedPair { .. }) => return Err(err),
            Err(err @ TranslatorError::Timeout { .. }) => return Err(err),
            Err(err) => {
                log::warn!("model for {} unavailable: {}", pair, err);
                return Err(TranslatorError::ModelUnavailable(pair));
            }
        };

        let output_text = handle.translate(text)?;
        Ok(Translation {
            input_text: text.to_owned(),
            output_text,
            source_lang: pair.source.get_iso_639_1_code().to_owned(),
            target_lang: pair.target.get_iso_639_1_code().to_owned(),
            confidence: PLACEHOLDER_CONFIDENCE,
        })
    }
}

fn resolve_pair(request: &TranslationRequest) -> Result<LanguagePair, TranslatorError> {
    LanguagePair::from_codes(&request.source_lang, &request.target_lang)
        .filter(|pair| pair.is_supported())
        .ok_or_else(|| TranslatorError::UnsupportedPair {
            source: request.source_lang.clone(),
            target: request.target_lang.clone(),
        })
}
