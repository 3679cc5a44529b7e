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

use crate::common::error::TranslatorError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the local models directory.
pub const MODELS_DIR_ENV: &str = "OPUS_TRANSLATE_MODELS";

/// Decoding parameters applied to every generation call.
///
/// The values reproduce the deployed configuration: beam search of width 4
/// with early stopping, and sampling enabled at temperature 0.7. Beam search
/// and sampling are normally mutually exclusive decoding strategies; the
/// combination is kept as observed in production, so output for identical
/// input is not guaranteed to be repeatable across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingOptions {
    /// Maximum sequence length in subword tokens. Longer inputs are silently
    /// truncated before encoding rather than rejected; generation is bounded
    /// by the same limit.
    pub max_length: i64,
    /// Number of beams explored during generation.
    pub num_beams: i64,
    /// Stop the beam search as soon as `num_beams` hypotheses are complete.
    pub early_stopping: bool,
    /// Sample generated tokens instead of picking greedily.
    pub do_sample: bool,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for DecodingOptions {
    fn default() -> DecodingOptions {
        DecodingOptions {
            max_length: 512,
            num_beams: 4,
            early_stopping: true,
            do_sample: true,
            temperature: 0.7,
        }
    }
}

/// Runtime configuration for the registry and service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Directory searched for per-pair local model files before any remote
    /// fetch is attempted.
    pub models_dir: PathBuf,
    /// Generation parameters shared by every direction.
    pub decoding: DecodingOptions,
    /// Upper bound, in seconds, on how long a caller waits for another
    /// caller's in-flight model load. `None` waits indefinitely.
    pub load_timeout_secs: Option<u64>,
}

impl Default for TranslatorConfig {
    fn default() -> TranslatorConfig {
        TranslatorConfig {
            models_dir: default_models_dir(),
            decoding: DecodingOptions::default(),
            load_timeout_secs: None,
        }
    }
}

impl TranslatorConfig {
    /// Read a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<TranslatorConfig, TranslatorError> {
        let f = File::open(path)?;
        let br = BufReader::new(f);
        let config = serde_json::from_reader(br)?;
        Ok(config)
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_secs.map(Duration::from_secs)
    }
}

/// Resolve the local models directory: the `OPUS_TRANSLATE_MODELS`
/// environment variable if set, a `./models` directory if one exists, the
/// user cache directory otherwise.
pub fn default_models_dir() -> PathBuf {
    match std::env::var(MODELS_DIR_ENV) {
        Ok(value) => PathBuf::from(value),
        Err(_) => {
            let local = PathBuf::from("./models");
            if local.exists() {
                local
            } else {
                let mut dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
                dir.push("opus-translate");
                dir.push("models");
                dir
            }
        }
    }
}
