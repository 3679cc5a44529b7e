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

//! Marian-backed model loading over the rust-bert translation pipeline.
//!
//! Local loads expect the four-file Marian layout produced by the checkpoint
//! conversion utilities: `rust_model.ot`, `config.json`, `vocab.json` and
//! `spiece.model` in the pair's subdirectory of the models directory. Remote
//! loads pull the Helsinki-NLP opus-mt checkpoints through rust-bert's
//! resource cache.

use crate::common::config::DecodingOptions;
use crate::common::error::TranslatorError;
use crate::languages::{Language, LanguagePair};
use crate::models::{ModelLoader, TranslationEngine};
use rust_bert::marian::{
    MarianConfigResources, MarianModelResources, MarianSpmResources, MarianVocabResources,
};
use rust_bert::pipelines::common::ModelType;
use rust_bert::pipelines::translation::{
    Language as ProviderLanguage, TranslationConfig, TranslationModel,
};
use rust_bert::resources::{LocalResource, RemoteResource, ResourceProvider};
use std::path::Path;
use tch::Device;

/// Loads Marian translation models for the supported pairs.
pub struct MarianLoader {
    device: Device,
    decoding: DecodingOptions,
}

impl MarianLoader {
    /// Loader targeting CUDA when available, CPU otherwise.
    pub fn new(decoding: DecodingOptions) -> MarianLoader {
        MarianLoader {
            device: Device::cuda_if_available(),
            decoding,
        }
    }

    pub fn with_device(mut self, device: Device) -> MarianLoader {
        self.device = device;
        self
    }

    fn build<R>(
        &self,
        pair: LanguagePair,
        model_resource: R,
        config_resource: R,
        vocab_resource: R,
        spm_resource: R,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError>
    where
        R: ResourceProvider + Send + 'static,
    {
        let source = provider_language(pair.source);
        let target = provider_language(pair.target);

        let mut config = TranslationConfig::new(
            ModelType::Marian,
            model_resource,
            config_resource,
            vocab_resource,
            Some(spm_resource),
            [source],
            [target],
            self.device,
        );
        config.max_length = Some(self.decoding.max_length);
        config.num_beams = self.decoding.num_beams;
        config.early_stopping = self.decoding.early_stopping;
        config.do_sample = self.decoding.do_sample;
        config.temperature = self.decoding.temperature;

        let model = TranslationModel::new(config).map_err(|e| TranslatorError::ModelLoad {
            pair,
            cause: e.to_string(),
        })?;
        Ok(Box::new(MarianEngine {
            model,
            source,
            target,
        }))
    }
}

impl ModelLoader for MarianLoader {
    fn load_local(
        &self,
        pair: LanguagePair,
        dir: &Path,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError> {
        let model_resource = LocalResource {
            local_path: dir.join("rust_model.ot"),
        };
        let config_resource = LocalResource {
            local_path: dir.join("config.json"),
        };
        let vocab_resource = LocalResource {
            local_path: dir.join("vocab.json"),
        };
        let spm_resource = LocalResource {
            local_path: dir.join("spiece.model"),
        };
        self.build(
            pair,
            model_resource,
            config_resource,
            vocab_resource,
            spm_resource,
        )
    }

    fn load_remote(
        &self,
        pair: LanguagePair,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError> {
        let (model, config, vocab, spm) = match pair {
            LanguagePair::ENGLISH2HINDI => (
                MarianModelResources::ENGLISH2HINDI,
                MarianConfigResources::ENGLISH2HINDI,
                MarianVocabResources::ENGLISH2HINDI,
                MarianSpmResources::ENGLISH2HINDI,
            ),
            LanguagePair::HINDI2ENGLISH => (
                MarianModelResources::HINDI2ENGLISH,
                MarianConfigResources::HINDI2ENGLISH,
                MarianVocabResources::HINDI2ENGLISH,
                MarianSpmResources::HINDI2ENGLISH,
            ),
            other => {
                return Err(TranslatorError::UnsupportedPair {
                    source: other.source.get_iso_639_1_code().to_owned(),
                    target: other.target.get_iso_639_1_code().to_owned(),
                });
            }
        };
        self.build(
            pair,
            RemoteResource::from_pretrained(model),
            RemoteResource::from_pretrained(config),
            RemoteResource::from_pretrained(vocab),
            RemoteResource::from_pretrained(spm),
        )
    }
}

fn provider_language(language: Language) -> ProviderLanguage {
    match language {
        Language::English => ProviderLanguage::English,
        Language::Hindi => ProviderLanguage::Hindi,
    }
}

struct MarianEngine {
    model: TranslationModel,
    source: ProviderLanguage,
    target: ProviderLanguage,
}

impl TranslationEngine for MarianEngine {
    fn set_inference_mode(&mut self) {
        // Generation runs under no_grad and the loaded variable store carries
        // no training-time state to disable.
    }

    fn translate(&self, text: &str) -> Result<String, TranslatorError> {
        let mut outputs = self
            .model
            .translate(&[text], self.source, self.target)
            .map_err(|e| TranslatorError::Inference(e.to_string()))?;
        match outputs.pop() {
            Some(output) => Ok(output.trim().to_owned()),
            None => Err(TranslatorError::Inference(
                "model returned no output".to_owned(),
            )),
        }
    }
}
