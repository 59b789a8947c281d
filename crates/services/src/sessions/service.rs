use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{Outcome, ProgressSnapshot, Question};
use quiz_core::summary::{ShareContent, render_summary};
use quiz_core::translate;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── ANSWER FEEDBACK ───────────────────────────────────────────────────────────
//

/// What the presentation layer shows after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub outcome: Outcome,
    /// Explanation text with bundled translations appended.
    pub explanation: String,
}

/// Result of advancing past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    NextQuestion,
    Finished,
}

/// Per-question sub-phase while a session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionPhase {
    Presenting,
    Answered,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a topic's questions.
///
/// Owns the fixed question set (snapshotted at start, in bank filter
/// order), the cursor, the score, and the per-question outcomes. Exactly
/// one instance is live at a time; every transition runs to completion
/// before the next event is accepted, so no interior locking is needed.
pub struct QuizSession {
    topic: String,
    questions: Vec<Question>,
    cursor: usize,
    score: u32,
    outcomes: Vec<Outcome>,
    hint_viewed_for_current: bool,
    phase: QuestionPhase,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a fresh session over the given questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyTopic` if no questions are provided.
    /// This is a user-facing condition (inline alert), not a fault.
    pub fn start(
        topic: impl Into<String>,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        Ok(Self {
            topic: topic.into(),
            questions,
            cursor: 0,
            score: 0,
            outcomes: Vec::new(),
            hint_viewed_for_current: false,
            phase: QuestionPhase::Presenting,
            started_at,
            completed_at: None,
        })
    }

    /// Rebuild an interrupted session from a persisted snapshot.
    ///
    /// `questions` must be re-derived by filtering the bank on the
    /// snapshot's topic. Cursor, score, and outcomes are restored verbatim
    /// and the session re-enters presentation at the first unanswered
    /// question. A snapshot pointing past the end of the question set is
    /// accepted defensively as a completed session (the terminal state
    /// normally clears the snapshot, so this should not occur).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Snapshot` for an internally inconsistent
    /// snapshot and `SessionError::SnapshotMismatch` when the reloaded bank
    /// no longer fits it. Callers treat both as "no resumable progress".
    pub fn resume(
        snapshot: ProgressSnapshot,
        questions: Vec<Question>,
        resumed_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        snapshot.validate()?;
        if questions.is_empty() || snapshot.current_question_index > questions.len() {
            return Err(SessionError::SnapshotMismatch);
        }

        let completed_at = if snapshot.current_question_index == questions.len() {
            Some(resumed_at)
        } else {
            None
        };

        Ok(Self {
            topic: snapshot.topic,
            questions,
            cursor: snapshot.current_question_index,
            score: snapshot.score,
            outcomes: snapshot.session_results,
            hint_viewed_for_current: false,
            phase: QuestionPhase::Presenting,
            started_at: resumed_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether the hint was already shown for the current question.
    #[must_use]
    pub fn hint_viewed_for_current(&self) -> bool {
        self.hint_viewed_for_current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            None
        } else {
            self.questions.get(self.cursor)
        }
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.outcomes.len(),
            remaining: self.questions.len().saturating_sub(self.outcomes.len()),
            is_complete: self.is_complete(),
        }
    }

    /// Show the hint for the current question.
    ///
    /// Safe to call more than once per question: the first call marks the
    /// hint as viewed, later calls return the same text without changing
    /// anything (the control is expected to be disabled after first use,
    /// but the core must not rely on that).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last question and
    /// `SessionError::AlreadyAnswered` during the answer/feedback window.
    pub fn request_hint(&mut self) -> Result<String, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.phase == QuestionPhase::Answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let Some(question) = self.current_question() else {
            return Err(SessionError::Completed);
        };

        let hint = translate::annotate(question.hint(), question.text());
        self.hint_viewed_for_current = true;
        Ok(hint)
    }

    /// Submit an answer for the current question.
    ///
    /// The only place the score is mutated. Appends an outcome capturing
    /// whether the hint was viewed, then moves to the answered sub-phase so
    /// further submits and hint requests for this question are rejected
    /// until `advance` (this also covers the presentation layer's delayed
    /// feedback reveal).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last question and
    /// `SessionError::AlreadyAnswered` on a second submit.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerFeedback, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.phase == QuestionPhase::Answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let Some(question) = self.current_question() else {
            return Err(SessionError::Completed);
        };

        let is_correct = question.is_correct(selected);
        let outcome = Outcome::new(
            question.text(),
            selected,
            question.answer(),
            is_correct,
            self.hint_viewed_for_current,
        );
        let explanation = translate::annotate(question.explanation(), question.text());

        if is_correct {
            self.score += 1;
        }
        self.outcomes.push(outcome.clone());
        self.phase = QuestionPhase::Answered;

        Ok(AnswerFeedback {
            outcome,
            explanation,
        })
    }

    /// Move past an answered question.
    ///
    /// Re-enters presentation for the next question with the hint flag
    /// reset, or completes the session. `completed_at` is stamped from the
    /// services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last question and
    /// `SessionError::NotAnswered` when the current question has no answer
    /// yet.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advanced, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.phase == QuestionPhase::Presenting {
            return Err(SessionError::NotAnswered);
        }

        self.cursor += 1;
        self.hint_viewed_for_current = false;
        if self.cursor < self.questions.len() {
            self.phase = QuestionPhase::Presenting;
            Ok(Advanced::NextQuestion)
        } else {
            self.completed_at = Some(now);
            Ok(Advanced::Finished)
        }
    }

    /// Snapshot of the resumable state: topic, cursor, score, outcomes.
    ///
    /// Taken right after `submit_answer` it still points at the answered
    /// question, so a resume re-presents that question's successor once the
    /// caller re-filters the bank — exactly the state `advance` would
    /// produce.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(
            self.topic.clone(),
            self.outcomes.len(),
            self.score,
            self.outcomes.clone(),
        )
    }

    /// Shareable plain-text report of the finished session.
    #[must_use]
    pub fn summary_text(&self) -> String {
        render_summary(self.score, self.questions.len(), &self.outcomes)
    }

    /// Share payload (title + report body) for the finished session.
    #[must_use]
    pub fn share_content(&self) -> ShareContent {
        ShareContent::for_results(self.score, self.questions.len(), &self.outcomes)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", &self.topic)
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("outcomes_len", &self.outcomes.len())
            .field("phase", &self.phase)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
