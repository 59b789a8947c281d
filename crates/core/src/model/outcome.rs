use serde::{Deserialize, Serialize};

/// Recorded result of answering one question within a session.
///
/// Serialized field names are camelCase because this struct is stored
/// verbatim inside the persisted progress snapshot and submitted to the
/// result endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub hint_viewed: bool,
}

impl Outcome {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        is_correct: bool,
        hint_viewed: bool,
    ) -> Self {
        Self {
            question: question.into(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
            is_correct,
            hint_viewed,
        }
    }

    /// A question is re-tested when it was answered wrong or needed a hint.
    #[must_use]
    pub fn needs_review(&self) -> bool {
        !self.is_correct || self.hint_viewed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_predicate_covers_wrong_and_hinted() {
        let wrong = Outcome::new("Q", "are", "am", false, false);
        let hinted = Outcome::new("Q", "am", "am", true, true);
        let clean = Outcome::new("Q", "am", "am", true, false);

        assert!(wrong.needs_review());
        assert!(hinted.needs_review());
        assert!(!clean.needs_review());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let outcome = Outcome::new("Q", "are", "am", false, true);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["question"], "Q");
        assert_eq!(json["userAnswer"], "are");
        assert_eq!(json["correctAnswer"], "am");
        assert_eq!(json["isCorrect"], false);
        assert_eq!(json["hintViewed"], true);
    }
}
