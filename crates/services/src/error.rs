//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SnapshotError;
use quiz_core::parser::ParseError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors that prevent the question bank from loading.
///
/// All of these are load-fatal: the app shows an error screen with a retry
/// affordance instead of the topic selection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question source request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors emitted by quiz sessions and their workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this topic")]
    EmptyTopic,
    #[error("no active session")]
    Idle,
    #[error("session already completed")]
    Completed,
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("saved progress does not match the loaded question bank")]
    SnapshotMismatch,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the result submission sink. Internal only: the sink
/// logs these and swallows them, they never reach a caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("submission endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
