//! End-to-end tests against the real Marian checkpoints.
//!
//! These download the opus-mt models on first run and need libtorch, so they
//! only exist with the `marian` feature and only run with `all-tests`.

#![cfg(feature = "marian")]

use opus_translate::{
    MarianLoader, ModelRegistry, SessionContext, TranslationService, TranslatorConfig,
};
use std::sync::Arc;

fn service() -> TranslationService {
    let config = TranslatorConfig::default();
    let loader = Box::new(MarianLoader::new(config.decoding.clone()));
    let registry = Arc::new(ModelRegistry::new(loader, &config));
    TranslationService::new(registry)
}

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn english_to_hindi_end_to_end() -> anyhow::Result<()> {
    let service = service();
    let mut session = SessionContext::new();

    let translation = service.translate(&mut session, "Hello world")?;

    assert!(!translation.output_text.is_empty());
    assert_eq!(translation.source_lang, "en");
    assert_eq!(translation.target_lang, "hi");
    assert_eq!(session.history().len(), 1);
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn hindi_to_english_end_to_end() -> anyhow::Result<()> {
    let service = service();
    let mut session = SessionContext::new();
    session.swap_languages();

    let translation = service.translate(&mut session, "नमस्ते दुनिया")?;

    assert!(!translation.output_text.is_empty());
    assert_eq!(translation.source_lang, "hi");
    assert_eq!(translation.target_lang, "en");
    Ok(())
}
