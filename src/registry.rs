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

//! Process-wide cache of loaded translation models.

use crate::common::config::TranslatorConfig;
use crate::common::error::TranslatorError;
use crate::languages::LanguagePair;
use crate::models::{ModelLoader, TranslationEngine};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// A cached, ready-to-use model for one translation direction.
///
/// Handles are immutable once cached and shared between sessions. The
/// underlying engine is `Send` but not `Sync` (torch tensors), so inference
/// on one model is serialized behind its own lock; models for different
/// pairs never contend with each other.
pub struct ModelHandle {
    pair: LanguagePair,
    engine: Mutex<Box<dyn TranslationEngine>>,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("pair", &self.pair)
            .finish_non_exhaustive()
    }
}

impl ModelHandle {
    fn new(pair: LanguagePair, engine: Box<dyn TranslationEngine>) -> ModelHandle {
        ModelHandle {
            pair,
            engine: Mutex::new(engine),
        }
    }

    pub fn pair(&self) -> LanguagePair {
        self.pair
    }

    /// Run inference on this direction's model.
    pub fn translate(&self, text: &str) -> Result<String, TranslatorError> {
        let engine = match self.engine.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        engine.translate(text)
    }
}

enum LoadState {
    /// A load for this pair is running on some caller's thread.
    Loading,
    Ready(Arc<ModelHandle>),
}

type StateMap = HashMap<LanguagePair, LoadState>;

/// Lazily loads and caches one model per supported direction.
///
/// Shared process-wide behind an [`Arc`]; every session's `acquire` goes
/// through the same cache. Loading a given pair happens at most once even
/// under concurrent calls: the first caller inserts a loading marker and
/// performs the load with the cache lock released, and later callers block
/// on the marker until the load settles. A failed load clears the marker,
/// leaving the pair eligible for a retry on a future call.
pub struct ModelRegistry {
    loader: Box<dyn ModelLoader>,
    models_dir: PathBuf,
    load_timeout: Option<Duration>,
    state: Mutex<StateMap>,
    settled: Condvar,
}

impl ModelRegistry {
    pub fn new(loader: Box<dyn ModelLoader>, config: &TranslatorConfig) -> ModelRegistry {
        ModelRegistry {
            loader,
            models_dir: config.models_dir.clone(),
            load_timeout: config.load_timeout(),
            state: Mutex::new(HashMap::new()),
            settled: Condvar::new(),
        }
    }

    /// The directory searched for local model files.
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Get the cached model for `pair`, loading it first if necessary.
    ///
    /// A cached entry is returned immediately with no I/O. Otherwise the
    /// pair's subdirectory of the models directory is tried first, loading
    /// from local files only; if it does not exist the pretrained checkpoint
    /// is fetched by its remote identifier. The engine is switched to
    /// inference mode before it is cached.
    pub fn acquire(&self, pair: LanguagePair) -> Result<Arc<ModelHandle>, TranslatorError> {
        if !pair.is_supported() {
            return Err(TranslatorError::UnsupportedPair {
                source: pair.source.get_iso_639_1_code().to_owned(),
                target: pair.target.get_iso_639_1_code().to_owned(),
            });
        }

        let mut state = self.lock_state();
        loop {
            match state.get(&pair) {
                Some(LoadState::Ready(handle)) => {
                    log::debug!("model cache hit for {}", pair);
                    return Ok(Arc::clone(handle));
                }
                Some(LoadState::Loading) => {}
                None => break,
            }
            state = self.wait_for_load(state, pair)?;
        }
        state.insert(pair, LoadState::Loading);
        drop(state);

        let loaded = self.load(pair);

        let mut state = self.lock_state();
        let result = match loaded {
            Ok(mut engine) => {
                engine.set_inference_mode();
                let handle = Arc::new(ModelHandle::new(pair, engine));
                state.insert(pair, LoadState::Ready(Arc::clone(&handle)));
                Ok(handle)
            }
            Err(err) => {
                // Leave no trace of the failed attempt so a later call can
                // retry the load.
                state.remove(&pair);
                Err(err)
            }
        };
        drop(state);
        self.settled.notify_all();
        result
    }

    /// Eagerly load every supported pair, returning the ones that failed.
    ///
    /// Hosts that want both directions ready before the first request call
    /// this at startup; `acquire` stays lazy for anything missed here.
    pub fn warm_up(&self) -> Vec<(LanguagePair, TranslatorError)> {
        let mut failures = Vec::new();
        for &pair in LanguagePair::SUPPORTED.iter() {
            if let Err(err) = self.acquire(pair) {
                log::warn!("warm-up load for {} failed: {}", pair, err);
                failures.push((pair, err));
            }
        }
        failures
    }

    fn lock_state(&self) -> MutexGuard<'_, StateMap> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Block until the in-flight load for `pair` settles, honoring the
    /// configured wait bound.
    fn wait_for_load<'a>(
        &'a self,
        guard: MutexGuard<'a, StateMap>,
        pair: LanguagePair,
    ) -> Result<MutexGuard<'a, StateMap>, TranslatorError> {
        match self.load_timeout {
            None => match self.settled.wait(guard) {
                Ok(guard) => Ok(guard),
                Err(poisoned) => Ok(poisoned.into_inner()),
            },
            Some(timeout) => {
                let (guard, wait) = match self.settled.wait_timeout(guard, timeout) {
                    Ok(result) => result,
                    Err(poisoned) => poisoned.into_inner(),
                };
                if wait.timed_out() && matches!(guard.get(&pair), Some(LoadState::Loading)) {
                    return Err(TranslatorError::Timeout { pair });
                }
                Ok(guard)
            }
        }
    }

    fn load(&self, pair: LanguagePair) -> Result<Box<dyn TranslationEngine>, TranslatorError> {
        let local_dir = self.models_dir.join(pair.cache_subdir());
        let loaded = if local_dir.exists() {
            log::info!("loading {} model from {}", pair, local_dir.display());
            self.loader.load_local(pair, &local_dir)
        } else {
            log::info!("fetching {} model ({})", pair, pair.remote_identifier());
            self.loader.load_remote(pair)
        };
        loaded.map_err(|err| match err {
            already @ TranslatorError::ModelLoad { .. } => already,
            other => TranslatorError::ModelLoad {
                pair,
                cause: other.to_string(),
            },
        })
    }
}
