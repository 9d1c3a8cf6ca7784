//! Survey progress record and its best-effort persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::survey::Answers;

use super::store::ProgressStore;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "newsletter-survey-progress";

/// Where one user is in the survey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyProgress {
    /// Index of the question on screen.
    pub current_step: usize,

    /// Question id to chosen answer id.
    #[serde(default)]
    pub answers: Answers,

    /// Set once the last question has been submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SurveyProgress {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Reads and writes [`SurveyProgress`] under one fixed key.
///
/// The `try_*` methods report failures. `save`, `load` and `clear` log them
/// and carry on as if storage were empty.
#[derive(Debug)]
pub struct ProgressKeeper<S> {
    store: S,
    key: String,
}

impl<S: ProgressStore> ProgressKeeper<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_save(&self, progress: &SurveyProgress) -> Result<()> {
        let json = serde_json::to_string(progress)?;
        self.store.set(&self.key, &json)
    }

    /// Load saved progress. Unparseable data is an error here.
    pub fn try_load(&self) -> Result<Option<SurveyProgress>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::ProgressCorrupt {
                message: e.to_string(),
            })
    }

    pub fn try_clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    pub fn save(&self, progress: &SurveyProgress) {
        match self.try_save(progress) {
            Ok(()) => debug!(
                key = %self.key,
                step = progress.current_step,
                answered = progress.answers.len(),
                "Progress saved"
            ),
            Err(e) => warn!(
                key = %self.key,
                error = %e.format_for_log(),
                "Failed to save progress"
            ),
        }
    }

    pub fn load(&self) -> Option<SurveyProgress> {
        match self.try_load() {
            Ok(progress) => progress,
            Err(e) => {
                warn!(key = %self.key, error = %e.format_for_log(), "Failed to load progress");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            warn!(key = %self.key, error = %e.format_for_log(), "Failed to clear progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::store::MemoryProgressStore;

    fn sample() -> SurveyProgress {
        let mut progress = SurveyProgress {
            current_step: 2,
            ..Default::default()
        };
        progress.answers.insert("q1".into(), "q1a".into());
        progress.answers.insert("q2".into(), "q2c".into());
        progress
    }

    #[test]
    fn test_save_load_clear() {
        let keeper = ProgressKeeper::with_default_key(MemoryProgressStore::new());
        assert_eq!(keeper.load(), None);

        keeper.save(&sample());
        assert_eq!(keeper.load(), Some(sample()));

        keeper.clear();
        assert_eq!(keeper.load(), None);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let store = MemoryProgressStore::new();
        let keeper = ProgressKeeper::new(&store, "k");
        keeper.save(&sample());

        let raw = store.raw("k").unwrap();
        assert!(raw.contains("\"currentStep\":2"));
        assert!(raw.contains("\"q2\":\"q2c\""));
        assert!(!raw.contains("completedAt"));
    }

    #[test]
    fn test_reads_completed_record() {
        let store = MemoryProgressStore::new();
        store
            .set(
                "k",
                r#"{"currentStep":6,"answers":{"q7":"q7a"},"completedAt":"2026-01-05T10:00:00.000Z"}"#,
            )
            .unwrap();

        let progress = ProgressKeeper::new(&store, "k").load().unwrap();
        assert!(progress.is_completed());
        assert_eq!(progress.current_step, 6);
    }

    #[test]
    fn test_corrupt_progress_is_discarded() {
        let store = MemoryProgressStore::new();
        store.set("k", "{not json").unwrap();
        let keeper = ProgressKeeper::new(&store, "k");

        assert!(matches!(keeper.try_load(), Err(Error::ProgressCorrupt { .. })));
        assert_eq!(keeper.load(), None);
    }

    #[test]
    fn test_unavailable_store_is_swallowed() {
        let store = MemoryProgressStore::new();
        let keeper = ProgressKeeper::new(&store, "k");
        keeper.save(&sample());

        store.set_unavailable(true);
        assert!(keeper.try_save(&SurveyProgress::default()).is_err());
        keeper.save(&SurveyProgress::default());
        keeper.clear();
        assert_eq!(keeper.load(), None);

        // Prior state is untouched once storage comes back.
        store.set_unavailable(false);
        assert_eq!(keeper.load(), Some(sample()));
    }
}
