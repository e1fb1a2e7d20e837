//! Test fixtures for question service payloads.

use axum::http::StatusCode;
use serde_json::{json, Value};

/// A complete question record.
pub fn record(
    noun: &str,
    adjective: &str,
    noun_correct: &str,
    adj_correct: &str,
    case: &str,
    number: &str,
) -> Value {
    json!({
        "question_elements": {
            "noun_base_form": noun,
            "adj_base_form": adjective,
            "noun_gender": "m anim",
            "target_number": number,
            "target_case": case
        },
        "answer_elements": {
            "noun_correct": noun_correct,
            "adj_correct": adj_correct
        }
    })
}

/// A nominative singular record whose answer is just the base forms.
pub fn nominative(noun: &str, adjective: &str) -> Value {
    record(noun, adjective, noun, adjective, "nominative", "singular")
}

/// A `200 OK` reply carrying `records` as a JSON array.
pub fn ok(records: Vec<Value>) -> (StatusCode, String) {
    (StatusCode::OK, Value::Array(records).to_string())
}
