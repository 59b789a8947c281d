use async_trait::async_trait;
use quiz_core::model::ProgressSnapshot;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage key for the single persisted snapshot. There is at most one
/// in-progress session at a time; every save overwrites the previous value.
pub const PROGRESS_KEY: &str = "quizProgress";

/// Errors surfaced by progress stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Serialize a snapshot to its stored JSON form.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_snapshot(snapshot: &ProgressSnapshot) -> Result<String, StorageError> {
    serde_json::to_string(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a stored payload back into a snapshot.
///
/// Undecodable or internally inconsistent data means the user has no
/// resumable progress; it is reported as `None`, never as an error.
#[must_use]
pub fn decode_snapshot(payload: &str) -> Option<ProgressSnapshot> {
    let snapshot: ProgressSnapshot = serde_json::from_str(payload).ok()?;
    snapshot.validate().ok()?;
    Some(snapshot)
}

/// Durable store for the one progress snapshot.
///
/// The store knows nothing about the question bank; reconstructing a
/// runnable session from a loaded snapshot is the caller's job.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Persist the snapshot, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;

    /// Fetch the stored snapshot, if any. Corrupt data reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for store access failures, never for
    /// undecodable content.
    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError>;

    /// Remove the stored snapshot. Removing an absent snapshot is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn clear_snapshot(&self) -> Result<(), StorageError>;
}

/// In-memory store for tests and prototyping.
///
/// Holds the raw stored string rather than the decoded snapshot so tests
/// can inject corrupt payloads.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    cell: Arc<Mutex<Option<String>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Arc::new(Mutex::new(None)),
        }
    }

    /// Overwrite the stored payload with arbitrary text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the cell is poisoned.
    pub fn put_raw(&self, payload: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(payload.into());
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let payload = encode_snapshot(snapshot)?;
        let mut guard = self
            .cell
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(payload);
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let guard = self
            .cell
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.as_deref().and_then(decode_snapshot))
    }

    async fn clear_snapshot(&self) -> Result<(), StorageError> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Outcome;

    fn snapshot() -> ProgressSnapshot {
        ProgressSnapshot::new(
            "iamyouare",
            1,
            1,
            vec![Outcome::new("Q1", "am", "am", true, false)],
        )
    }

    #[tokio::test]
    async fn save_load_round_trips() {
        let store = InMemoryProgressStore::new();
        store.save_snapshot(&snapshot()).await.unwrap();

        let loaded = store.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded, snapshot());
    }

    #[tokio::test]
    async fn save_overwrites_prior_value() {
        let store = InMemoryProgressStore::new();
        store.save_snapshot(&snapshot()).await.unwrap();

        let later = ProgressSnapshot::new(
            "iamyouare",
            2,
            1,
            vec![
                Outcome::new("Q1", "am", "am", true, false),
                Outcome::new("Q2", "is", "are", false, false),
            ],
        );
        store.save_snapshot(&later).await.unwrap();

        let loaded = store.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.current_question_index, 2);
    }

    #[tokio::test]
    async fn corrupt_payload_reads_as_no_snapshot() {
        let store = InMemoryProgressStore::new();
        store.put_raw("{not json").unwrap();
        assert!(store.load_snapshot().await.unwrap().is_none());

        // Decodable but inconsistent is equally corrupt.
        store
            .put_raw(r#"{"topic":"t","currentQuestionIndex":3,"score":1,"sessionResults":[]}"#)
            .unwrap();
        assert!(store.load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = InMemoryProgressStore::new();
        store.clear_snapshot().await.unwrap();

        store.save_snapshot(&snapshot()).await.unwrap();
        store.clear_snapshot().await.unwrap();
        store.clear_snapshot().await.unwrap();
        assert!(store.load_snapshot().await.unwrap().is_none());
    }
}
