use chrono::Utc;
use quiz_core::model::ProgressSnapshot;
use sqlx::Row;

use super::SqliteProgressStore;
use crate::repository::{PROGRESS_KEY, ProgressStore, StorageError, decode_snapshot, encode_snapshot};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl ProgressStore for SqliteProgressStore {
    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let payload = encode_snapshot(snapshot)?;

        sqlx::query(
            r"
                INSERT INTO saved_progress (key, payload, saved_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    payload = excluded.payload,
                    saved_at = excluded.saved_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT payload FROM saved_progress WHERE key = ?1
            ",
        )
        .bind(PROGRESS_KEY)
        .fetch_optional(self.pool())
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let payload: String = row.try_get("payload").map_err(conn)?;

        // Undecodable content is "no snapshot", never an error.
        Ok(decode_snapshot(&payload))
    }

    async fn clear_snapshot(&self) -> Result<(), StorageError> {
        sqlx::query(
            r"
                DELETE FROM saved_progress WHERE key = ?1
            ",
        )
        .bind(PROGRESS_KEY)
        .execute(self.pool())
        .await
        .map_err(conn)?;

        Ok(())
    }
}
