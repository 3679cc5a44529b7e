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

//! Cached bidirectional English-Hindi machine translation on top of
//! pretrained Opus-MT models.
//!
//! This crate is the orchestration around a pretrained sequence-to-sequence
//! translation stack:
//!
//! - [`registry::ModelRegistry`] loads each supported direction's
//!   model/tokenizer pair at most once per process, trying local files
//!   before a remote fetch, and shares the cached handles with every
//!   session. Concurrent requests for the same direction trigger a single
//!   load.
//! - [`service::TranslationService`] validates a request, resolves the
//!   (source, target) pair to a cached model, runs generation with fixed
//!   decoding parameters and returns a structured result.
//! - [`history::HistoryLog`] keeps a session-scoped, insertion-ordered
//!   record of successful translations for the recent-history panel.
//! - [`session::SessionContext`] carries one session's selected languages
//!   and history, passed explicitly into every call.
//!
//! Model weights, tokenization and beam search are delegated to the
//! pretrained-model stack behind the [`models`] traits. Enable the `marian`
//! feature for the real implementation backed by the Helsinki-NLP opus-mt
//! checkpoints; without it the crate builds without libtorch, which is how
//! the orchestration tests run.
//!
//! ```ignore
//! use opus_translate::{
//!     MarianLoader, ModelRegistry, SessionContext, TranslationService, TranslatorConfig,
//! };
//! use std::sync::Arc;
//!
//! let config = TranslatorConfig::default();
//! let loader = Box::new(MarianLoader::new(config.decoding.clone()));
//! let registry = Arc::new(ModelRegistry::new(loader, &config));
//! let service = TranslationService::new(registry);
//!
//! let mut session = SessionContext::new();
//! let translation = service.translate(&mut session, "Hello world")?;
//! println!("{}", translation.output_text);
//! ```

pub mod common;
pub mod history;
pub mod languages;
pub mod models;
pub mod registry;
pub mod service;
pub mod session;

pub use common::config::{default_models_dir, DecodingOptions, TranslatorConfig};
pub use common::error::TranslatorError;
pub use history::{HistoryEntry, HistoryLog, RECENT_DISPLAY_COUNT};
pub use languages::{Language, LanguagePair, LANGUAGE_OPTIONS};
#[cfg(feature = "marian")]
pub use models::MarianLoader;
pub use models::{ModelLoader, TranslationEngine};
pub use registry::{ModelHandle, ModelRegistry};
pub use service::{Translation, TranslationRequest, TranslationService, PLACEHOLDER_CONFIDENCE};
pub use session::SessionContext;
