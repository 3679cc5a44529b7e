//! Interfaces to the pretrained model provider.
//!
//! The registry and service only ever talk to these traits; model weights,
//! tokenization and beam search stay behind them. The real implementation
//! backed by pretrained Marian checkpoints lives in [`MarianLoader`] behind
//! the `marian` feature, and tests substitute lightweight doubles.

use crate::common::error::TranslatorError;
use crate::languages::LanguagePair;
use std::path::Path;

/// A loaded tokenizer/model pair for one translation direction.
///
/// Implementations own both halves of a single pretrained checkpoint and
/// perform the full encode, generate, decode round trip. Input longer than
/// the configured maximum token length is truncated before encoding, not
/// rejected; decoded output has model control tokens stripped.
pub trait TranslationEngine: Send {
    /// Switch off training-time behaviors such as dropout. Called once by
    /// the registry before the engine is cached and shared.
    fn set_inference_mode(&mut self);

    /// Translate one text.
    fn translate(&self, text: &str) -> Result<String, TranslatorError>;
}

/// Materializes engines, either from files on disk or from a remote model
/// hub.
pub trait ModelLoader: Send + Sync {
    /// Load the pair's model from local files only; no network access is
    /// attempted.
    fn load_local(
        &self,
        pair: LanguagePair,
        dir: &Path,
    ) -> Result<Box<dyn TranslationEngine>, TranslatorError>;

    /// Fetch the pair's pretrained checkpoint by its well-known identifier.
    fn load_remote(&self, pair: LanguagePair)
        -> Result<Box<dyn TranslationEngine>, TranslatorError>;
}

#[cfg(feature = "marian")]
mod marian;
#[cfg(feature = "marian")]
pub use marian::MarianLoader;
