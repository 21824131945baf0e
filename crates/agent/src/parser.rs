//! Structured-response parsing.
//!
//! Models asked for "ONLY this JSON" still wrap it in fences or prose.
//! [`parse_structured`] tries, in order: the whole text, the contents of
//! the first fenced block, and the span from the first `{` to the last `}`.

use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern is valid"));

static BRACED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("brace pattern is valid"));

/// Extract a JSON object from `text`, or `None` if no strategy yields one.
pub fn parse_structured(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    as_object(text)
        .or_else(|| {
            FENCED_BLOCK
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| as_object(m.as_str().trim()))
        })
        .or_else(|| BRACED_SPAN.find(text).and_then(|m| as_object(m.as_str())))
}

fn as_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
