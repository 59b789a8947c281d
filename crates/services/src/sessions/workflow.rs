use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Outcome, QuestionBank, REVIEW_TOPIC, build_review_set};
use storage::repository::ProgressStore;

use super::service::{Advanced, AnswerFeedback, QuizSession};
use super::view::ResumePrompt;
use crate::error::SessionError;
use crate::submit::ResultSink;

/// Orchestrates session start, resumption, and persisted answering.
///
/// The bank is shared read-only; the session itself is owned by the caller
/// and passed in by `&mut`, so there is never more than one writer.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    store: Arc<dyn ProgressStore>,
    sink: Option<Arc<ResultSink>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, store: Arc<dyn ProgressStore>) -> Self {
        Self {
            clock,
            bank,
            store,
            sink: None,
        }
    }

    /// Attach a best-effort result sink, invoked when a session finishes.
    #[must_use]
    pub fn with_result_sink(mut self, sink: Arc<ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Start a new session for the given topic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyTopic` when the bank has no questions
    /// for the topic; the caller surfaces this as an inline alert and stays
    /// on the selection screen.
    pub fn start_topic(&self, topic: &str) -> Result<QuizSession, SessionError> {
        QuizSession::start(topic, self.bank.by_topic(topic), self.clock.now())
    }

    /// Start a review run over the wrong-or-hinted questions of a finished
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyTopic` when nothing qualifies for
    /// review.
    pub fn start_review(&self, outcomes: &[Outcome]) -> Result<QuizSession, SessionError> {
        let questions = build_review_set(outcomes, &self.bank);
        QuizSession::start(REVIEW_TOPIC, questions, self.clock.now())
    }

    /// Peek at saved progress for the selection screen's resume offer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on store access failures.
    pub async fn resume_prompt(&self) -> Result<Option<ResumePrompt>, SessionError> {
        let snapshot = self.store.load_snapshot().await?;
        Ok(snapshot.as_ref().map(ResumePrompt::from_snapshot))
    }

    /// Rebuild the saved session, if any.
    ///
    /// The bank is re-filtered by the snapshot's topic. A snapshot the
    /// reloaded bank no longer fits is cleared and reported as absent
    /// rather than failing the app.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on store access failures.
    pub async fn resume(&self) -> Result<Option<QuizSession>, SessionError> {
        let Some(snapshot) = self.store.load_snapshot().await? else {
            return Ok(None);
        };

        let questions = self.bank.by_topic(&snapshot.topic);
        match QuizSession::resume(snapshot, questions, self.clock.now()) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!("discarding stale saved progress: {err}");
                self.store.clear_snapshot().await?;
                Ok(None)
            }
        }
    }

    /// Answer the current question and persist the updated snapshot.
    ///
    /// The save happens after the outcome is recorded and before any
    /// advance, so a reload mid-feedback resumes at the answered question's
    /// successor.
    ///
    /// # Errors
    ///
    /// Propagates session transition errors and `SessionError::Storage`
    /// when the snapshot cannot be written.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        selected: &str,
    ) -> Result<AnswerFeedback, SessionError> {
        let feedback = session.submit_answer(selected)?;
        self.store.save_snapshot(&session.snapshot()).await?;
        Ok(feedback)
    }

    /// Move past the answered question.
    ///
    /// On completion the saved snapshot is cleared and the finished
    /// outcomes are handed to the result sink (best effort: the sink logs
    /// failures and cannot affect the now-final session state).
    ///
    /// # Errors
    ///
    /// Propagates session transition errors and `SessionError::Storage`
    /// when the snapshot cannot be cleared.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<Advanced, SessionError> {
        let advanced = session.advance(self.clock.now())?;

        if advanced == Advanced::Finished {
            self.store.clear_snapshot().await?;
            if let Some(sink) = &self.sink {
                sink.submit(session.outcomes()).await;
            }
        }

        Ok(advanced)
    }

    /// Discard saved progress. Used by retry/clear actions; idempotent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on store access failures.
    pub async fn clear_progress(&self) -> Result<(), SessionError> {
        self.store.clear_snapshot().await?;
        Ok(())
    }

    /// Abandon the given session and discard its saved progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on store access failures.
    pub async fn abandon(&self, session: QuizSession) -> Result<(), SessionError> {
        drop(session);
        self.clear_progress().await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
