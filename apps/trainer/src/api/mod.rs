//! HTTP client for the question service.

use async_trait::async_trait;
use declension_core::{QuestionSource, RawQuestion, Selection, SourceError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::form_urlencoded;

/// Path of the question endpoint, relative to the base URL.
pub const QUESTIONS_ENDPOINT: &str = "questions";

/// Inner state shared across clones.
struct HttpQuestionSourceInner {
    client: Client,
    base_url: String,
}

/// [`QuestionSource`] backed by `GET <base_url>/questions`.
///
/// Clone-able; clones share one connection pool.
#[derive(Clone)]
pub struct HttpQuestionSource {
    inner: Arc<HttpQuestionSourceInner>,
}

impl HttpQuestionSource {
    /// Create a source talking to `base_url`, giving up on requests after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpQuestionSourceInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Full request URL for a batch.
    pub fn questions_url(&self, selection: &Selection, count: usize) -> String {
        format!(
            "{}/{}?{}",
            self.inner.base_url,
            QUESTIONS_ENDPOINT,
            encode_query(selection, count)
        )
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_batch(
        &self,
        selection: &Selection,
        count: usize,
    ) -> Result<Vec<RawQuestion>, SourceError> {
        let url = self.questions_url(selection, count);
        tracing::debug!(%url, "Requesting questions");

        let resp = self
            .inner
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Backend { status, message });
        }

        let records: Vec<RawQuestion> = resp
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        if records.len() < count {
            tracing::debug!(requested = count, received = records.len(), "Short batch");
        }

        Ok(records)
    }
}

/// Query string for a batch request.
///
/// Multi-valued parameters repeat their key, e.g.
/// `numbers=singular&cases=nominative&cases=dative&num=10`.
pub fn encode_query(selection: &Selection, count: usize) -> String {
    let count = count.to_string();
    let numbers = selection.numbers().map(|n| ("numbers", n.as_str()));
    let cases = selection.cases().map(|c| ("cases", c.as_str()));

    encode_pairs(numbers.chain(cases).chain([("num", count.as_str())]))
}

/// Encode key/value pairs the way a browser submits a form
/// (`application/x-www-form-urlencoded`, spaces as `+`).
pub fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
