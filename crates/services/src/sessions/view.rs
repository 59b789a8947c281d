use quiz_core::model::{Outcome, ProgressSnapshot, QuestionBank, REVIEW_TOPIC, build_review_set};
use quiz_core::summary::ShareContent;

use super::service::QuizSession;

/// Cosmetic pause between submitting an answer and revealing the feedback.
///
/// Purely a presentation beat: the session has already recorded the answer
/// and saved its snapshot when the pause starts, and rejects further input
/// for the question until `advance`.
pub const FEEDBACK_REVEAL_DELAY_MS: u64 = 700;

/// Display name for a topic key. Unknown topics display as-is.
#[must_use]
pub fn topic_label(topic: &str) -> String {
    match topic {
        "iamyouare" => "I am / You are".to_string(),
        "heshe" => "He is / She is".to_string(),
        REVIEW_TOPIC => "復習".to_string(),
        other => other.to_string(),
    }
}

//
// ─── VIEWS ─────────────────────────────────────────────────────────────────────
//

/// Presentation-agnostic view of the current question.
///
/// This is intentionally **not** a UI view-model: no widget state, no
/// styling. The adapter renders option buttons, the progress bar, and the
/// hint panel from these fields as it sees fit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub topic: String,
    pub topic_label: String,
    /// 1-based position of the current question.
    pub ordinal: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub question: String,
    pub options: Vec<String>,
    /// Annotated hint text, present once the user asked for it.
    pub hint: Option<String>,
}

impl QuestionView {
    /// Build the view for the session's current question. `None` once the
    /// session is complete.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let ordinal = session.cursor() + 1;
        let total = session.total_questions();
        Some(Self {
            topic: session.topic().to_string(),
            topic_label: topic_label(session.topic()),
            ordinal,
            total,
            progress_percent: (ordinal as f64 / total as f64) * 100.0,
            question: question.text().to_string(),
            options: question.options().to_vec(),
            hint: None,
        })
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Progress caption, e.g. `問題 2 / 5`.
    #[must_use]
    pub fn progress_text(&self) -> String {
        format!("問題 {} / {}", self.ordinal, self.total)
    }
}

/// Feedback shown after an answer, once the reveal pause elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub outcome: Outcome,
    pub explanation: String,
    /// True when this was the session's last question.
    pub is_last: bool,
}

/// Terminal results screen data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub topic: String,
    pub topic_label: String,
    pub score: u32,
    pub total: usize,
    pub outcomes: Vec<Outcome>,
    /// Whether a review run would contain at least one question.
    pub review_available: bool,
    pub share: ShareContent,
}

impl ResultsView {
    #[must_use]
    pub fn from_session(session: &QuizSession, bank: &QuestionBank) -> Self {
        Self {
            topic: session.topic().to_string(),
            topic_label: topic_label(session.topic()),
            score: session.score(),
            total: session.total_questions(),
            outcomes: session.outcomes().to_vec(),
            review_available: !build_review_set(session.outcomes(), bank).is_empty(),
            share: session.share_content(),
        }
    }
}

/// Offer shown on the selection screen when saved progress exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePrompt {
    pub topic: String,
    pub topic_label: String,
    /// 1-based number of the question the user would continue from.
    pub next_ordinal: usize,
}

impl ResumePrompt {
    #[must_use]
    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> Self {
        Self {
            topic: snapshot.topic.clone(),
            topic_label: topic_label(&snapshot.topic),
            next_ordinal: snapshot.current_question_index + 1,
        }
    }

    /// Resume offer caption, e.g. `「I am / You are」の続きがあります (3問目から)。`
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "「{}」の続きがあります ({}問目から)。",
            self.topic_label, self.next_ordinal
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
