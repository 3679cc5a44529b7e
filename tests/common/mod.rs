//! Test doubles for the model-provider seam.

use opus_translate::{
    LanguagePair, ModelLoader, ModelRegistry, TranslationEngine, TranslatorConfig, TranslatorError,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Engine double that "translates" by tagging the token-truncated input with
/// the target language code. Refuses to run until the registry has switched
/// it to inference mode, so a missing switch fails every test loudly.
pub struct EchoEngine {
    pair: LanguagePair,
    max_tokens: usize,
    inference_mode: bool,
}

impl EchoEngine {
    pub fn new(pair: LanguagePair, max_tokens: usize) -> EchoEngine {
        EchoEngine {
            pair,
            max_tokens,
            inference_mode: false,
        }
    }
}

impl TranslationEngine for EchoEngine {
    fn set_inference_mode(&mut self) {
        self.inference_mode = true;
    }

    fn translate(&self, text: &str) -> Result<String, TranslatorError> {
        if !self.inference_mode {
            return Err(TranslatorError::Inference(
                "engine still in training mode".to_owned(),
            ));
        }
        let tokens: Vec<&str> = text.split_whitespace().take(self.max_tokens).collect();
        Ok(format!(
            "[{}] {}",
            self.pair.target.get_iso_639_1_code(),
            tokens.join(" ")
        ))
    }
}

/// Loader double with per-pair call counting, failure injection and an
/// optional artificial load delay.
pub struct MockLoader {
    local_loads: Mutex<HashMap<LanguagePair, usize>>,
    remote_loads: Mutex<HashMap<LanguagePair, usize>>,
    failing_remotes: Mutex<HashSet<LanguagePair>>,
    delay: Mutex<Option<Duration>>,
    max_tokens: usize,
}

impl MockLoader {
    pub fn new() -> MockLoader {
        MockLoader {
            local_loads: Mutex::new(HashMap::new()),
            remote_loads: Mutex::new(HashMap::new()),
            failing_remotes: Mutex::new(HashSet::new()),
            delay: Mutex::new(None),
            max_tokens: 512,
        }
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_remote(&self, pair: LanguagePair) {
        self.failing_remotes.lock().unwrap().insert(pair);
    }

    pub fn restore_remote(&self, pair: LanguagePair) {
        self.failing_remotes.lock().unwrap().remove(&pair);
    }

    pub fn local_load_count(&self, pair: LanguagePair) -> usize {
        *self.local_loads.lock().unwrap().get(&pair).unwrap_or(&0)
    }

    pub fn remote_load_count(&self, pair: LanguagePair) -> usize {
        *self.remote_loads.lock().unwrap().get(&pair).unwrap_or(&0)
    }

    pub fn load_count(&self, pair: LanguagePair) -> usize {
        self.local_load_count(pair) + self.remote_load_count(pair)
    }

    fn simulate_work(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
    }
}

/// Adapter handing a shared [`MockLoader`] to the registry while the test
/// keeps its own reference for assertions.
pub struct SharedLoader(pub Arc<MockLoader>);

impl ModelLoader for SharedLoader {
    fn load_local(
        &self,
        pair: LanguagePair,
        _dir: &Path,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError> {
        self.0.simulate_work();
        *self.0.local_loads.lock().unwrap().entry(pair).or_insert(0) += 1;
        Ok(Box::new(EchoEngine::new(pair, self.0.max_tokens)))
    }

    fn load_remote(
        &self,
        pair: LanguagePair,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError> {
        self.0.simulate_work();
        *self.0.remote_loads.lock().unwrap().entry(pair).or_insert(0) += 1;
        if self.0.failing_remotes.lock().unwrap().contains(&pair) {
            return Err(TranslatorError::IOError("connection refused".to_owned()));
        }
        Ok(Box::new(EchoEngine::new(pair, self.0.max_tokens)))
    }
}

/// Registry over a shared mock loader.
pub fn registry_with(loader: &Arc<MockLoader>, config: &TranslatorConfig) -> ModelRegistry {
    ModelRegistry::new(Box::new(SharedLoader(Arc::clone(loader))), config)
}

/// Configuration pointing at a models directory that does not exist, so
/// every load takes the remote path unless a test creates the directory.
pub fn remote_only_config() -> TranslatorConfig {
    let mut config = TranslatorConfig::default();
    config.models_dir = std::env::temp_dir().join("opus-translate-test-no-models");
    config
}
