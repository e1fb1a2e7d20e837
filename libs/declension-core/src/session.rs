//! Quiz session: question queue, scoring and the evaluate/advance protocol.
//!
//! A session is driven by one caller at a time. The only suspension point is
//! the [`QuestionSource`] fetch; everything else runs to completion.

use crate::diff::{diff, DiffSegment};
use crate::error::{Result, SessionError, SourceError, ValidationError};
use crate::source::{questions_from_records, QuestionSource};
use crate::types::{Question, Score, Selection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// A current question is waiting for an answer.
    AwaitingAnswer,
    /// The source ran dry and nothing is left to ask.
    Exhausted,
}

/// Outcome of evaluating one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub is_correct: bool,
    /// Present only for wrong answers.
    pub diff: Option<Vec<DiffSegment>>,
    /// The answer as compared, i.e. trimmed.
    pub submitted: String,
    pub expected: String,
}

/// One quiz attempt.
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    source: Arc<dyn QuestionSource>,
    selection: Selection,
    queue: VecDeque<Question>,
    score: Score,
    current: Option<Question>,
    source_exhausted: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("selection", &self.selection)
            .field("queued", &self.queue.len())
            .field("score", &self.score)
            .field("current", &self.current)
            .field("source_exhausted", &self.source_exhausted)
            .finish()
    }
}

impl Session {
    /// Fetch the first batch and make its first question current.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a zero batch size, `SourceError` if the fetch
    /// fails, a record is malformed or the batch is empty.
    pub async fn start(
        source: Arc<dyn QuestionSource>,
        selection: Selection,
        batch_size: usize,
    ) -> Result<Self> {
        let mut session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            source,
            selection,
            queue: VecDeque::new(),
            score: Score::default(),
            current: None,
            source_exhausted: false,
        };

        let batch = session.fetch(batch_size).await?;
        if batch.is_empty() {
            return Err(SourceError::Empty.into());
        }

        session.queue.extend(batch);
        session.current = session.queue.pop_front();
        tracing::info!(session = %session.id, queued = session.queue.len(), "Session started");

        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// The question waiting for an answer, if any.
    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Number of questions waiting behind the current one.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::AwaitingAnswer
        } else {
            SessionState::Exhausted
        }
    }

    /// Score `submitted` against the current question.
    ///
    /// Only surrounding whitespace is ignored; case, diacritics and
    /// punctuation must match exactly. The queue is not advanced.
    ///
    /// # Errors
    ///
    /// `SessionError::Exhausted` when there is no current question.
    pub fn evaluate(&mut self, submitted: &str) -> Result<Evaluation> {
        let question = self.current.as_ref().ok_or(SessionError::Exhausted)?;

        let submitted = submitted.trim();
        let is_correct = submitted == question.expected_answer;
        let evaluation = Evaluation {
            is_correct,
            diff: (!is_correct).then(|| diff(submitted, &question.expected_answer)),
            submitted: submitted.to_string(),
            expected: question.expected_answer.clone(),
        };

        self.score.record(is_correct);
        tracing::debug!(
            session = %self.id,
            is_correct,
            correct = self.score.correct,
            total = self.score.total,
            "Answer evaluated"
        );

        Ok(evaluation)
    }

    /// Move to the next question, refilling the queue once it runs empty.
    ///
    /// Returns `None` once the source has delivered an empty batch and the
    /// queue is drained.
    ///
    /// # Errors
    ///
    /// `SourceError` if a refill fails. When the eager refill after the pop
    /// fails, the popped question is still current and the queue stays empty.
    pub async fn advance(&mut self, batch_size: usize) -> Result<Option<&Question>> {
        if batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize.into());
        }

        // A previous refill failed; try again before giving up on the queue.
        if self.queue.is_empty() && !self.source_exhausted {
            self.refill(batch_size).await?;
        }

        self.current = self.queue.pop_front();
        if self.current.is_none() {
            tracing::info!(session = %self.id, "Session exhausted");
            return Ok(None);
        }

        if self.queue.is_empty() && !self.source_exhausted {
            self.refill(batch_size).await?;
        }

        Ok(self.current.as_ref())
    }

    async fn refill(&mut self, batch_size: usize) -> Result<()> {
        let batch = self.fetch(batch_size).await?;
        if batch.is_empty() {
            tracing::info!(session = %self.id, "Question source returned an empty batch");
            self.source_exhausted = true;
        }
        self.queue.extend(batch);
        Ok(())
    }

    /// Fetch and map one batch without touching session state.
    async fn fetch(&self, batch_size: usize) -> Result<Vec<Question>> {
        if batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize.into());
        }

        let records = self
            .source
            .fetch_batch(&self.selection, batch_size)
            .await
            .inspect_err(|e| {
                tracing::warn!(session = %self.id, error = %e, "Fetching questions failed")
            })?;
        let questions = questions_from_records(records)?;
        tracing::debug!(session = %self.id, "Fetched {} new questions", questions.len());

        Ok(questions)
    }
}
