use std::collections::HashSet;

use crate::model::{Outcome, Question, QuestionBank};

/// Derive the set of questions to re-test from a finished session.
///
/// An outcome is selected when the answer was wrong or a hint was viewed.
/// Each selected outcome is resolved back to a bank question by text;
/// outcomes the bank no longer contains are dropped silently (stale data is
/// accepted as lossy, not an error). The result is deduplicated by resolved
/// question id and ordered by first occurrence among the selected outcomes.
#[must_use]
pub fn build_review_set(outcomes: &[Outcome], bank: &QuestionBank) -> Vec<Question> {
    let mut seen = HashSet::new();
    let mut review = Vec::new();

    for outcome in outcomes.iter().filter(|o| o.needs_review()) {
        if let Some(question) = bank.find_by_text(&outcome.question)
            && seen.insert(question.id())
        {
            review.push(question.clone());
        }
    }

    review
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_HINT, QuestionId};

    fn question(line: u32, text: &str) -> Question {
        Question::new(
            QuestionId::new(line),
            "iamyouare",
            text,
            vec!["am".to_string(), "are".to_string()],
            "am",
            "explanation",
            DEFAULT_HINT,
        )
        .unwrap()
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![question(2, "Q1"), question(3, "Q2"), question(4, "Q3")])
    }

    #[test]
    fn selects_wrong_and_hinted_in_first_occurrence_order() {
        let outcomes = vec![
            Outcome::new("Q1", "am", "am", true, false),
            Outcome::new("Q2", "are", "am", false, false),
            Outcome::new("Q3", "am", "am", true, true),
        ];

        let review = build_review_set(&outcomes, &bank());

        assert_eq!(review.len(), 2);
        assert_eq!(review[0].text(), "Q2");
        assert_eq!(review[1].text(), "Q3");
    }

    #[test]
    fn duplicate_outcomes_collapse_to_one_question() {
        let outcomes = vec![
            Outcome::new("Q2", "are", "am", false, false),
            Outcome::new("Q2", "is", "am", false, true),
        ];

        let review = build_review_set(&outcomes, &bank());
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].text(), "Q2");
    }

    #[test]
    fn outcomes_missing_from_the_bank_are_dropped() {
        let outcomes = vec![
            Outcome::new("gone", "are", "am", false, false),
            Outcome::new("Q1", "are", "am", false, false),
        ];

        let review = build_review_set(&outcomes, &bank());
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].text(), "Q1");
    }

    #[test]
    fn all_correct_unhinted_session_yields_empty_review_set() {
        let outcomes = vec![
            Outcome::new("Q1", "am", "am", true, false),
            Outcome::new("Q2", "am", "am", true, false),
        ];

        assert!(build_review_set(&outcomes, &bank()).is_empty());
    }
}
