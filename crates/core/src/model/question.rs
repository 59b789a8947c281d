use thiserror::Error;

use crate::model::ids::QuestionId;

/// Hint text substituted when the source row has no hint column.
pub const DEFAULT_HINT: &str = "この問題のヒントはありません。";

/// Reserved pseudo-topic for re-test runs built from a finished session.
pub const REVIEW_TOPIC: &str = "review";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least one option")]
    NoOptions,

    #[error("answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One validated record from the question table. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    topic: String,
    text: String,
    options: Vec<String>,
    answer: String,
    explanation: String,
    hint: String,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the topic, text, or answer is empty
    /// after trimming, or when no options are given.
    pub fn new(
        id: QuestionId,
        topic: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(QuestionError::EmptyTopic);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(Self {
            id,
            topic,
            text,
            options,
            answer,
            explanation: explanation.into(),
            hint: hint.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Whether `selected` is the correct answer for this question.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.answer
    }

    /// Data-quality probe: a question whose answer is not among its options
    /// can never be answered correctly. Checked in tests, never at runtime.
    #[must_use]
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o == &self.answer)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn question_fails_if_topic_empty() {
        let err = Question::new(
            QuestionId::new(2),
            "  ",
            "Q",
            options(&["am", "are"]),
            "am",
            "",
            DEFAULT_HINT,
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyTopic);
    }

    #[test]
    fn question_fails_without_options() {
        let err = Question::new(
            QuestionId::new(2),
            "iamyouare",
            "Q",
            Vec::new(),
            "am",
            "",
            DEFAULT_HINT,
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::NoOptions);
    }

    #[test]
    fn correctness_is_exact_string_match() {
        let q = Question::new(
            QuestionId::new(2),
            "iamyouare",
            "主語が「I」のときのbe動詞は？",
            options(&["am", "are", "is"]),
            "am",
            "主語が「I」のbe動詞は必ず am になります。",
            DEFAULT_HINT,
        )
        .unwrap();

        assert!(q.is_correct("am"));
        assert!(!q.is_correct("are"));
        assert!(!q.is_correct("am "));
    }

    #[test]
    fn answer_in_options_detects_unanswerable_question() {
        let q = Question::new(
            QuestionId::new(2),
            "iamyouare",
            "Q",
            options(&["are", "is"]),
            "am",
            "",
            DEFAULT_HINT,
        )
        .unwrap();
        assert!(!q.answer_in_options());
    }
}
