//! Per-session state: selected language pair and translation history.

use crate::history::HistoryLog;
use crate::languages::Language;
use uuid::Uuid;

/// Mutable state owned by one user session.
///
/// Constructed by the host when a session starts and passed explicitly into
/// every translation call; nothing here is process-global. Discarded with the
/// session, so history does not survive restarts.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    source_lang: String,
    target_lang: String,
    history: HistoryLog,
}

impl SessionContext {
    /// New session with the default direction, English to Hindi.
    pub fn new() -> SessionContext {
        SessionContext::with_languages(
            Language::English.get_iso_639_1_code(),
            Language::Hindi.get_iso_639_1_code(),
        )
    }

    pub fn with_languages(source_lang: &str, target_lang: &str) -> SessionContext {
        SessionContext {
            id: Uuid::new_v4(),
            source_lang: source_lang.to_owned(),
            target_lang: target_lang.to_owned(),
            history: HistoryLog::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn set_source_lang(&mut self, code: &str) {
        self.source_lang = code.to_owned();
    }

    pub fn set_target_lang(&mut self, code: &str) {
        self.target_lang = code.to_owned();
    }

    /// Exchange the source and target selections.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }
}

impl Default for SessionContext {
    fn default() -> SessionContext {
        SessionContext::new()
    }
}
