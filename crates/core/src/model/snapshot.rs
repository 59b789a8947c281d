use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Outcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("answered count ({answered}) does not match outcome count ({outcomes})")]
    CountMismatch { answered: usize, outcomes: usize },

    #[error("score ({score}) exceeds answered count ({answered})")]
    ScoreOutOfRange { score: u32, answered: usize },
}

/// Minimal serialized state needed to resume an interrupted session.
///
/// Written after every answered question, read once at startup to offer
/// resumption, deleted on completion or abandonment. The questions
/// themselves are not stored; the caller re-filters the bank by `topic`.
///
/// Field names are camelCase to stay compatible with the snapshot shape the
/// app has always persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub topic: String,
    pub current_question_index: usize,
    pub score: u32,
    pub session_results: Vec<Outcome>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn new(
        topic: impl Into<String>,
        current_question_index: usize,
        score: u32,
        session_results: Vec<Outcome>,
    ) -> Self {
        Self {
            topic: topic.into(),
            current_question_index,
            score,
            session_results,
        }
    }

    /// Check internal consistency of a rehydrated snapshot.
    ///
    /// While a session is active there is exactly one outcome per answered
    /// question and the score never exceeds the answered count. A stored
    /// value violating either is corrupt and must be treated as absent by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` describing the first violated invariant.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.session_results.len() != self.current_question_index {
            return Err(SnapshotError::CountMismatch {
                answered: self.current_question_index,
                outcomes: self.session_results.len(),
            });
        }
        let answered = self.current_question_index;
        if self.score as usize > answered {
            return Err(SnapshotError::ScoreOutOfRange {
                score: self.score,
                answered,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(correct: bool) -> Outcome {
        Outcome::new("Q", "am", "am", correct, false)
    }

    #[test]
    fn consistent_snapshot_validates() {
        let snap = ProgressSnapshot::new("iamyouare", 2, 1, vec![outcome(true), outcome(false)]);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn outcome_count_mismatch_is_rejected() {
        let snap = ProgressSnapshot::new("iamyouare", 2, 1, vec![outcome(true)]);
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, SnapshotError::CountMismatch { .. }));
    }

    #[test]
    fn score_beyond_answered_count_is_rejected() {
        let snap = ProgressSnapshot::new("iamyouare", 1, 2, vec![outcome(true)]);
        let err = snap.validate().unwrap_err();
        assert!(matches!(err, SnapshotError::ScoreOutOfRange { .. }));
    }

    #[test]
    fn json_shape_matches_the_stored_progress_object() {
        let snap = ProgressSnapshot::new("heshe", 1, 1, vec![outcome(true)]);
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["topic"], "heshe");
        assert_eq!(json["currentQuestionIndex"], 1);
        assert_eq!(json["score"], 1);
        assert!(json["sessionResults"].is_array());
    }
}
