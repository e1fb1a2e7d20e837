//! Terminal output for questions, feedback and scores.

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use declension_core::{DiffKind, DiffSegment, Evaluation, Question, Score};
use std::io::{self, Write};

pub const API_ERROR_MESSAGE: &str =
    "An error occurred while trying to get data from the API. Please try again later.";
pub const SELECTION_ERROR_MESSAGE: &str =
    "Invalid. Please select at least one number and one case!";
pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter your answer in the input field!";
pub const EXHAUSTED_MESSAGE: &str = "No more questions available for this selection.";

pub fn question(out: &mut impl Write, question: &Question) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Noun:      {}", question.prompt_noun.as_str().bold())?;
    writeln!(out, "Adjective: {}", question.prompt_adjective.as_str().bold())?;
    writeln!(out, "Gender:    {}", question.gender.label())?;
    writeln!(out, "Number:    {}", question.target_number)?;
    writeln!(out, "Case:      {}", question.target_case)
}

pub fn evaluation(
    out: &mut impl Write,
    evaluation: &Evaluation,
    question: &Question,
) -> io::Result<()> {
    if evaluation.is_correct {
        return writeln!(out, "Correct! \u{1F44D}");
    }

    writeln!(out, "That wasn't quite right! \u{1F641}")?;
    writeln!(out, "Target: {} {}", question.target_case, question.target_number)?;
    writeln!(out, "Correct: {}", evaluation.expected)?;
    writeln!(out, "Your answer: {}", evaluation.submitted)?;
    if let Some(segments) = &evaluation.diff {
        writeln!(out, "{}", diff_line(segments))?;
    }
    Ok(())
}

/// Colour each segment: green for text to add, red for text to remove.
pub fn diff_line(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|segment| {
            let text = segment.text.as_str();
            match segment.kind {
                DiffKind::Equal => text.grey().to_string(),
                DiffKind::Inserted => text.green().to_string(),
                DiffKind::Deleted => text.red().crossed_out().to_string(),
            }
        })
        .collect()
}

pub fn score_line(score: &Score) -> String {
    let percentage = score.percentage().unwrap_or(0.0);
    format!("Score: {percentage:.2}% ({}/{})", score.correct, score.total)
}

pub fn summary(
    out: &mut impl Write,
    score: &Score,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
) -> io::Result<()> {
    let elapsed = (finished_at - started_at).num_seconds().max(0);
    writeln!(out)?;
    writeln!(
        out,
        "Answered {} question{} in {}m {:02}s. {}",
        score.total,
        if score.total == 1 { "" } else { "s" },
        elapsed / 60,
        elapsed % 60,
        score_line(score)
    )
}
