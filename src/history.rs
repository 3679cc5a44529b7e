//! Session-scoped record of successful translations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries the recent-translations panel shows.
pub const RECENT_DISPLAY_COUNT: usize = 3;

/// One successful translation, as recorded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input_text: String,
    pub output_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Timestamp formatted the way the history panel renders it.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Append-only, insertion-ordered log of successful translations.
///
/// Storage is unbounded for the lifetime of the owning session; readers
/// interested in the display surface ask for the last few entries via
/// [`recent`](HistoryLog::recent). Entries are never removed or mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> HistoryLog {
        HistoryLog {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries, most recent first. Fewer than `n` recorded
    /// entries yields all of them.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(input: &str) -> HistoryEntry {
        HistoryEntry {
            input_text: input.to_owned(),
            output_text: format!("{} (translated)", input),
            source_lang: "en".to_owned(),
            target_lang: "hi".to_owned(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn recent_returns_most_recent_first() {
        let mut log = HistoryLog::new();
        log.append(entry("first"));
        log.append(entry("second"));
        log.append(entry("third"));

        let recent = log.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].input_text, "third");
        assert_eq!(recent[1].input_text, "second");
        assert_eq!(recent[2].input_text, "first");
    }

    #[test]
    fn recent_is_clamped_to_available_entries() {
        let mut log = HistoryLog::new();
        log.append(entry("only"));

        let recent = log.recent(2);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].input_text, "only");
    }

    #[test]
    fn recent_does_not_mutate_the_log() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.append(entry(&format!("text {}", i)));
        }
        let _ = log.recent(RECENT_DISPLAY_COUNT);
        let _ = log.recent(0);
        assert_eq!(log.len(), 5);
        assert_eq!(log.iter().count(), 5);
    }

    #[test]
    fn display_time_is_wall_clock_only() {
        let e = entry("text");
        let display = e.display_time();
        assert_eq!(display.len(), 8);
        assert_eq!(display.matches(':').count(), 2);
    }
}
