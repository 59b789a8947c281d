use std::env;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::QuestionBank;
use storage::repository::{InMemoryProgressStore, ProgressStore};
use storage::sqlite::SqliteProgressStore;

use crate::driver::QuizDriver;
use crate::error::AppServicesError;
use crate::loader::BankLoader;
use crate::sessions::QuizLoopService;
use crate::submit::ResultSink;

/// Startup configuration for the quiz app.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    /// Location of the raw question table.
    pub source_url: String,
    /// `SQLite` URL for the progress store.
    pub database_url: String,
    /// Optional endpoint for the best-effort result upload.
    pub submit_url: Option<String>,
}

impl QuizConfig {
    /// Read configuration from the environment.
    ///
    /// `QUIZ_SOURCE_URL` is required; `QUIZ_DATABASE_URL` defaults to a
    /// local file, `QUIZ_SUBMIT_URL` is optional.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let source_url = env::var("QUIZ_SOURCE_URL").ok()?;
        if source_url.trim().is_empty() {
            return None;
        }
        let database_url = env::var("QUIZ_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:quiz_progress.db?mode=rwc".into());
        let submit_url = env::var("QUIZ_SUBMIT_URL").ok().filter(|u| !u.trim().is_empty());
        Some(Self {
            source_url,
            database_url,
            submit_url,
        })
    }
}

/// Assembles app-facing services around one loaded question bank.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Bootstrap against `SQLite` storage.
    ///
    /// The question bank is fetched and parsed here, before anything else
    /// is shown: a failed load returns the error (the app renders it with a
    /// retry affordance) and never reaches topic selection.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` when the bank cannot be loaded or storage
    /// initialization fails.
    pub async fn new_sqlite(config: &QuizConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let bank = BankLoader::over_http(&config.source_url).load().await?;
        let store = SqliteProgressStore::open(&config.database_url).await?;
        let sink = config.submit_url.as_deref().map(ResultSink::new);
        Ok(Self::assemble(bank, Arc::new(store), sink, clock))
    }

    /// Assemble around an already-parsed bank with in-memory storage.
    #[must_use]
    pub fn in_memory(bank: QuestionBank, clock: Clock) -> Self {
        Self::assemble(bank, Arc::new(InMemoryProgressStore::new()), None, clock)
    }

    fn assemble(
        bank: QuestionBank,
        store: Arc<dyn ProgressStore>,
        sink: Option<ResultSink>,
        clock: Clock,
    ) -> Self {
        let bank = Arc::new(bank);
        let mut quiz_loop = QuizLoopService::new(clock, Arc::clone(&bank), store);
        if let Some(sink) = sink {
            quiz_loop = quiz_loop.with_result_sink(Arc::new(sink));
        }
        Self {
            bank,
            quiz_loop: Arc::new(quiz_loop),
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    /// Hand out a command driver over these services.
    #[must_use]
    pub fn driver(&self) -> QuizDriver {
        QuizDriver::new((*self.quiz_loop).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{DEFAULT_HINT, Question, QuestionId};
    use quiz_core::time::fixed_clock;

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::new(
                QuestionId::new(2),
                "iamyouare",
                "Q1",
                vec!["am".to_string(), "are".to_string()],
                "am",
                "explanation",
                DEFAULT_HINT,
            )
            .unwrap(),
        ])
    }

    #[tokio::test]
    async fn in_memory_services_drive_a_session() {
        let services = AppServices::in_memory(bank(), fixed_clock());

        let mut session = services.quiz_loop().start_topic("iamyouare").unwrap();
        services
            .quiz_loop()
            .answer_current(&mut session, "am")
            .await
            .unwrap();

        assert_eq!(session.score(), 1);
    }

    #[test]
    fn driver_shares_the_same_bank() {
        let services = AppServices::in_memory(bank(), fixed_clock());
        let driver = services.driver();
        assert_eq!(driver.services().bank().len(), 1);
    }
}
