use crate::model::Question;

/// All parsed questions, in source order. Immutable after construction and
/// freely shared read-only between the session workflow and the review-set
/// builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// All questions for `topic`, in bank order. An empty result is valid;
    /// the caller decides how to surface "no questions for this topic".
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.topic() == topic)
            .cloned()
            .collect()
    }

    /// First question whose text matches exactly.
    ///
    /// The table has no id column, so outcomes are mapped back to questions
    /// by text; distinct records sharing identical text resolve to the
    /// first one in bank order.
    #[must_use]
    pub fn find_by_text(&self, text: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.text() == text)
    }

    /// Distinct topics in first-occurrence order, for the selection screen.
    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !topics.contains(&question.topic()) {
                topics.push(question.topic());
            }
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_HINT, QuestionId};

    fn question(line: u32, topic: &str, text: &str) -> Question {
        Question::new(
            QuestionId::new(line),
            topic,
            text,
            vec!["am".to_string(), "are".to_string(), "is".to_string()],
            "am",
            "explanation",
            DEFAULT_HINT,
        )
        .unwrap()
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            question(2, "iamyouare", "Q1"),
            question(3, "heshe", "Q2"),
            question(4, "iamyouare", "Q3"),
        ])
    }

    #[test]
    fn by_topic_filters_in_bank_order() {
        let hits = bank().by_topic("iamyouare");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text(), "Q1");
        assert_eq!(hits[1].text(), "Q3");
    }

    #[test]
    fn by_topic_returns_empty_for_absent_topic() {
        assert!(bank().by_topic("missing").is_empty());
    }

    #[test]
    fn find_by_text_returns_first_exact_match() {
        let bank = bank();
        assert_eq!(bank.find_by_text("Q2").unwrap().topic(), "heshe");
        assert!(bank.find_by_text("Q2 ").is_none());
    }

    #[test]
    fn topics_are_distinct_in_first_occurrence_order() {
        assert_eq!(bank().topics(), vec!["iamyouare", "heshe"]);
    }
}
