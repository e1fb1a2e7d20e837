//! Quiz session engine for noun/adjective declension drills.
//!
//! Provides:
//! - Selection and question types (cases, numbers, genders)
//! - The `QuestionSource` contract and raw record mapping
//! - Character-level answer diff (longest common subsequence)
//! - The quiz session state machine with batched prefetching

pub mod diff;
pub mod error;
pub mod session;
pub mod source;
pub mod types;

pub use diff::{diff, DiffKind, DiffSegment};
pub use error::{MalformedRecordError, Result, SessionError, SourceError, ValidationError};
pub use session::{Evaluation, Session, SessionState};
pub use source::{
    questions_from_records, QuestionSource, RawAnswerElements, RawQuestion, RawQuestionElements,
};
pub use types::{CaseLabel, GenderLabel, NumberLabel, Question, Score, Selection};
