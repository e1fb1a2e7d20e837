//! Common test utilities for integration tests.
//!
//! Provides an in-process stand-in for the question service: it answers
//! `GET /questions` with scripted responses and records every query string.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    routing::get,
    Router,
};

type Reply = (StatusCode, String);

#[derive(Clone)]
struct StubState {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

/// Question service stub listening on an ephemeral local port.
pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    /// Start a stub that answers requests with `replies` in order, then with `[]`.
    pub async fn start(replies: Vec<Reply>) -> Self {
        let state = StubState {
            replies: Arc::new(Mutex::new(replies.into())),
            queries: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/questions", get(questions))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("stub server address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Query strings received so far.
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }
}

async fn questions(
    State(state): State<StubState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.queries.lock().unwrap().push(query.unwrap_or_default());

    let (status, body) = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| (StatusCode::OK, "[]".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Base URL of a port nobody listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}
