mod command;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use command::QuizCommand;
pub use progress::SessionProgress;
pub use service::{Advanced, AnswerFeedback, QuizSession};
pub use view::{
    FEEDBACK_REVEAL_DELAY_MS, FeedbackView, QuestionView, ResultsView, ResumePrompt, topic_label,
};
pub use workflow::QuizLoopService;
