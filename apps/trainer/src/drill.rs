//! Interactive answer loop.

use crate::render;
use declension_core::{Session, SessionError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Typing this instead of an answer ends the drill.
pub const QUIT_COMMAND: &str = ":q";

/// Why the drill loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillEnd {
    /// The user quit or input ended.
    Quit,
    /// The question source has nothing more for this selection.
    Exhausted,
    /// Fetching more questions failed; the session cannot continue.
    SourceFailed,
}

/// Ask questions from `session` until the user quits or no more can be asked.
///
/// Each non-empty line of `input` is one answer.
pub async fn run<R, W>(
    session: &mut Session,
    batch_size: usize,
    input: R,
    out: &mut W,
) -> anyhow::Result<DrillEnd>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    match session.current() {
        Some(question) => render::question(out, question)?,
        None => {
            writeln!(out, "{}", render::EXHAUSTED_MESSAGE)?;
            return Ok(DrillEnd::Exhausted);
        }
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(DrillEnd::Quit);
        };
        let answer = line.trim();
        if answer == QUIT_COMMAND {
            return Ok(DrillEnd::Quit);
        }
        if answer.is_empty() {
            writeln!(out, "{}", render::EMPTY_ANSWER_MESSAGE)?;
            continue;
        }

        let evaluation = session.evaluate(answer)?;
        let question = session.current().ok_or(SessionError::Exhausted)?;
        render::evaluation(out, &evaluation, question)?;
        writeln!(out, "{}", render::score_line(&session.score()))?;

        match session.advance(batch_size).await {
            Ok(Some(question)) => render::question(out, question)?,
            Ok(None) => {
                writeln!(out, "{}", render::EXHAUSTED_MESSAGE)?;
                return Ok(DrillEnd::Exhausted);
            }
            Err(SessionError::Source(e)) => {
                tracing::error!(error = %e, "Could not refill the question queue");
                writeln!(out, "{}", render::API_ERROR_MESSAGE)?;
                return Ok(DrillEnd::SourceFailed);
            }
            Err(e) => return Err(e.into()),
        }
    }
}
