#![forbid(unsafe_code)]

pub mod app_services;
pub mod driver;
pub mod error;
pub mod loader;
pub mod sessions;
pub mod submit;

pub use quiz_core::Clock;

pub use app_services::{AppServices, QuizConfig};
pub use driver::{QuizDriver, Screen};
pub use error::{AppServicesError, LoadError, SessionError};
pub use loader::{BankLoader, HttpQuestionFetcher, QuestionFetcher};
pub use sessions::{
    Advanced, AnswerFeedback, FEEDBACK_REVEAL_DELAY_MS, FeedbackView, QuestionView, QuizCommand,
    QuizLoopService, QuizSession, ResultsView, ResumePrompt, SessionProgress,
};
pub use submit::ResultSink;
