use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::Outcome;

use crate::error::SubmitError;

/// Best-effort sink for finished-session answers.
///
/// The upload is fire and forget: the response and any failure are logged,
/// nothing is retried, and nothing the endpoint does can influence
/// displayed state. Availability of the endpoint is not part of the app's
/// contract.
#[derive(Clone)]
pub struct ResultSink {
    client: Client,
    endpoint: String,
}

impl ResultSink {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build a sink from `QUIZ_SUBMIT_URL`, or `None` when unset (the app
    /// then runs without submission).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let endpoint = env::var("QUIZ_SUBMIT_URL").ok()?;
        if endpoint.trim().is_empty() {
            return None;
        }
        Some(Self::new(endpoint))
    }

    /// Submit the finished session's answers.
    ///
    /// Never fails from the caller's perspective; the outcome is logged
    /// either way.
    pub async fn submit(&self, outcomes: &[Outcome]) {
        match self.try_submit(outcomes).await {
            Ok(message) => tracing::info!("result submission accepted: {message}"),
            Err(err) => tracing::warn!("result submission failed: {err}"),
        }
    }

    async fn try_submit(&self, outcomes: &[Outcome]) -> Result<String, SubmitError> {
        let payload = SubmissionRequest {
            answers: outcomes
                .iter()
                .map(|outcome| SubmittedAnswer {
                    question: &outcome.question,
                    user_answer: &outcome.user_answer,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmitError::Status(response.status()));
        }

        let body: SubmissionResponse = response.json().await?;
        Ok(body.message.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    answers: Vec<SubmittedAnswer<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedAnswer<'a> {
    question: &'a str,
    user_answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    message: Option<String>,
}
