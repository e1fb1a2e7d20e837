//! Terminal trainer for Polish noun/adjective declension.
//!
//! Fetches questions from the question service over HTTP and drills them
//! one at a time, showing a character diff for wrong answers.

pub mod api;
pub mod config;
pub mod drill;
pub mod render;

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use declension_core::{Session, SessionError};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::HttpQuestionSource;
use crate::config::Args;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let selection = args.selection().inspect_err(|_| {
        eprintln!("{}", render::SELECTION_ERROR_MESSAGE);
    })?;

    tracing::info!(api_url = %args.api_url, batch_size = args.batch_size, "Starting drill");
    let source = Arc::new(HttpQuestionSource::new(&args.api_url, args.timeout())?);

    let mut session = match Session::start(source, selection, args.batch_size).await {
        Ok(session) => session,
        Err(SessionError::Source(e)) => {
            eprintln!("{}", render::API_ERROR_MESSAGE);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout();
    let end = drill::run(
        &mut session,
        args.batch_size,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await?;
    tracing::info!(session = %session.id(), ?end, "Drill finished");

    render::summary(&mut stdout, &session.score(), session.started_at(), Utc::now())?;

    Ok(())
}
