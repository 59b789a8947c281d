use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, LAST_MODIFIED};

use quiz_core::model::QuestionBank;
use quiz_core::parser::parse_question_table;

use crate::error::LoadError;

/// Source of the raw question-table text.
///
/// The app fetches the table exactly once at startup; a failed fetch keeps
/// the app in an error-display state instead of showing topic selection.
#[async_trait]
pub trait QuestionFetcher: Send + Sync {
    /// Retrieve the raw table text.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the source cannot be read.
    async fn fetch_text(&self) -> Result<String, LoadError>;
}

/// Fetches the question table over HTTP, bypassing intermediary caches so
/// an updated table is picked up on the next reload.
pub struct HttpQuestionFetcher {
    client: Client,
    url: String,
}

impl HttpQuestionFetcher {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionFetcher for HttpQuestionFetcher {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

/// Static-text fetcher for tests and prototyping.
pub struct StaticQuestionFetcher(pub String);

#[async_trait]
impl QuestionFetcher for StaticQuestionFetcher {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        Ok(self.0.clone())
    }
}

/// Fetches and parses the question table into an immutable bank.
#[derive(Clone)]
pub struct BankLoader {
    fetcher: Arc<dyn QuestionFetcher>,
}

impl BankLoader {
    #[must_use]
    pub fn new(fetcher: Arc<dyn QuestionFetcher>) -> Self {
        Self { fetcher }
    }

    #[must_use]
    pub fn over_http(url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpQuestionFetcher::new(url)))
    }

    /// Fetch and parse the question bank.
    ///
    /// Malformed rows are logged and skipped; only an unreadable source or
    /// a table with zero usable records fails the load.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on fetch failure, non-success status,
    /// empty source, or zero parsed records.
    pub async fn load(&self) -> Result<QuestionBank, LoadError> {
        let raw = self.fetcher.fetch_text().await?;
        let table = parse_question_table(&raw)?;

        for skip in &table.skipped {
            tracing::warn!(
                line = skip.line_number,
                reason = %skip.reason,
                "skipped question row: {}",
                skip.content
            );
        }
        tracing::info!(questions = table.questions.len(), "question bank loaded");

        Ok(table.into_bank())
    }
}

/// Best-effort probe for the source's `Last-Modified` header, displayed as
/// a version hint. Failures are logged and swallowed; the probe never
/// affects loading.
pub async fn probe_last_modified(client: &Client, url: &str) -> Option<String> {
    match client.head(url).header(CACHE_CONTROL, "no-cache").send().await {
        Ok(response) => response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        Err(err) => {
            tracing::debug!("last-modified probe for {url} failed: {err}");
            None
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::parser::ParseError;

    fn loader(raw: &str) -> BankLoader {
        BankLoader::new(Arc::new(StaticQuestionFetcher(raw.to_string())))
    }

    #[tokio::test]
    async fn load_builds_a_bank_and_tolerates_bad_rows() {
        let raw = "\
topic,question,options,answer,explanation
iamyouare,Q1,am|are,am,e1
iamyouare,broken row
heshe,Q2,is|are,is,e2
";
        let bank = loader(raw).load().await.unwrap();

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.topics(), vec!["iamyouare", "heshe"]);
    }

    #[tokio::test]
    async fn empty_and_unusable_sources_are_distinct_fatal_errors() {
        let err = loader("").load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::EmptySource)));

        let err = loader("topic,question,options,answer,explanation\nbad,row\n")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::NoValidRecords)));
    }
}
