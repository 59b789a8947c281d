use quiz_core::model::build_review_set;

use crate::error::SessionError;
use crate::sessions::{
    Advanced, FeedbackView, QuestionView, QuizCommand, QuizLoopService, QuizSession, ResultsView,
    ResumePrompt,
};

/// Inline alert shown when a topic has no questions.
pub const NO_QUESTIONS_NOTICE: &str = "この単元の問題が見つかりませんでした。";

/// What the presentation layer should render after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Selection {
        topics: Vec<String>,
        resume: Option<ResumePrompt>,
        notice: Option<String>,
    },
    Question(QuestionView),
    Feedback(FeedbackView),
    Results(ResultsView),
}

/// Consumes typed commands and drives the single live session.
///
/// The presentation layer is a thin adapter: it turns UI events into
/// `QuizCommand`s, hands them here, and renders the returned `Screen`.
/// A finished session stays held until the user retries or starts a review
/// run, so the results screen can still build its review set.
pub struct QuizDriver {
    services: QuizLoopService,
    session: Option<QuizSession>,
}

impl QuizDriver {
    #[must_use]
    pub fn new(services: QuizLoopService) -> Self {
        Self {
            services,
            session: None,
        }
    }

    #[must_use]
    pub fn services(&self) -> &QuizLoopService {
        &self.services
    }

    /// The selection screen shown once the bank has loaded, including the
    /// resume offer when saved progress exists.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on store access failures.
    pub async fn initial_screen(&self) -> Result<Screen, SessionError> {
        self.selection_screen(None).await
    }

    /// Apply one user command and return the next screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for commands that are invalid in the current
    /// state (e.g. `Next` before an answer) and for storage failures.
    /// Topic selections with no questions are not errors; they return the
    /// selection screen with an inline notice.
    pub async fn handle(&mut self, command: QuizCommand) -> Result<Screen, SessionError> {
        match command {
            QuizCommand::SelectTopic(topic) => match self.services.start_topic(&topic) {
                Ok(session) => {
                    self.session = Some(session);
                    self.question_screen(None)
                }
                Err(SessionError::EmptyTopic) => {
                    self.selection_screen(Some(NO_QUESTIONS_NOTICE.to_string()))
                        .await
                }
                Err(err) => Err(err),
            },
            QuizCommand::Resume => match self.services.resume().await? {
                Some(session) => {
                    self.session = Some(session);
                    self.question_screen(None)
                }
                None => self.selection_screen(None).await,
            },
            QuizCommand::ClearProgress => {
                self.services.clear_progress().await?;
                self.session = None;
                self.selection_screen(None).await
            }
            QuizCommand::RequestHint => {
                let session = self.session.as_mut().ok_or(SessionError::Idle)?;
                let hint = session.request_hint()?;
                self.question_screen(Some(hint))
            }
            QuizCommand::SelectOption(option) => {
                let session = self.session.as_mut().ok_or(SessionError::Idle)?;
                let feedback = self.services.answer_current(session, &option).await?;
                let is_last = session.outcomes().len() == session.total_questions();
                Ok(Screen::Feedback(FeedbackView {
                    outcome: feedback.outcome,
                    explanation: feedback.explanation,
                    is_last,
                }))
            }
            QuizCommand::Next => {
                let session = self.session.as_mut().ok_or(SessionError::Idle)?;
                match self.services.advance(session).await? {
                    Advanced::NextQuestion => self.question_screen(None),
                    Advanced::Finished => Ok(Screen::Results(ResultsView::from_session(
                        session,
                        self.services.bank(),
                    ))),
                }
            }
            QuizCommand::Review => {
                let finished = self.session.as_ref().ok_or(SessionError::Idle)?;
                match self.services.start_review(finished.outcomes()) {
                    Ok(session) => {
                        self.session = Some(session);
                        self.question_screen(None)
                    }
                    Err(SessionError::EmptyTopic) => {
                        self.selection_screen(Some(NO_QUESTIONS_NOTICE.to_string()))
                            .await
                    }
                    Err(err) => Err(err),
                }
            }
            QuizCommand::Retry => {
                self.services.clear_progress().await?;
                self.session = None;
                self.selection_screen(None).await
            }
        }
    }

    async fn selection_screen(&self, notice: Option<String>) -> Result<Screen, SessionError> {
        let topics = self
            .services
            .bank()
            .topics()
            .iter()
            .map(|t| (*t).to_string())
            .collect();
        let resume = self.services.resume_prompt().await?;
        Ok(Screen::Selection {
            topics,
            resume,
            notice,
        })
    }

    fn question_screen(&self, hint: Option<String>) -> Result<Screen, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::Idle)?;
        let view = QuestionView::from_session(session).ok_or(SessionError::Completed)?;
        let view = match hint {
            Some(hint) => view.with_hint(hint),
            None => view,
        };
        Ok(Screen::Question(view))
    }

    /// Questions the current (finished) session would re-test; empty when
    /// no session is held.
    #[must_use]
    pub fn pending_review_count(&self) -> usize {
        self.session
            .as_ref()
            .map(|s| build_review_set(s.outcomes(), self.services.bank()).len())
            .unwrap_or(0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
